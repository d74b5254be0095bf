//! User sessions carried in private cookies

use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};

use crate::error::{Error, InternalServerError};
use crate::{AppState, Config};

/// A session for any logged-in profile
///
/// ```rs
/// pub async fn foo_route(session: Session) -> impl IntoResponse {
///     println!("{:?}", session.data.profile_id);
///
///     ()
/// }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Session {
	pub data: SessionData,
}

/// A session for any site-wide admin profile
#[derive(Clone, Copy, Debug)]
pub struct AdminSession {
	pub data: SessionData,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct SessionData {
	pub profile_id:       i32,
	pub profile_is_admin: bool,
}

impl FromRequestParts<AppState> for Session {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		_state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let Some(data) = parts.extensions.get::<SessionData>() else {
			return Err(InternalServerError::SessionWithoutAuthError.into());
		};

		Ok(Self { data: *data })
	}
}

impl FromRequestParts<AppState> for AdminSession {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let session =
			parts.extract_with_state::<Session, AppState>(state).await?;

		if !session.data.profile_is_admin {
			return Err(Error::Forbidden);
		}

		Ok(Self { data: session.data })
	}
}

impl SessionData {
	/// Convert this [`SessionData`] into an access token cookie
	pub fn to_access_token_cookie(
		self,
		config: &Config,
	) -> Result<Cookie<'static>, Error> {
		let value = serde_json::to_string(&self)
			.map_err(InternalServerError::SerdeJsonError)?;

		let cookie = Cookie::build((config.access_cookie_name.clone(), value))
			.http_only(true)
			.max_age(config.access_cookie_lifetime)
			.path("/")
			.same_site(SameSite::Lax)
			.secure(config.production)
			.into();

		Ok(cookie)
	}
}
