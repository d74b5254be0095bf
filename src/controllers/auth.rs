//! Controllers for registration and login

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use axum_extra::extract::PrivateCookieJar;
use axum_extra::extract::cookie::Cookie;
use validator::Validate;

use crate::error::{Error, LoginError};
use crate::models::{NewProfile, Profile};
use crate::schemas::auth::{LoginRequest, RegisterRequest};
use crate::schemas::profile::ProfileResponse;
use crate::session::SessionData;
use crate::{Config, DbPool};

#[instrument(skip(pool, request))]
pub(crate) async fn register(
	State(pool): State<DbPool>,
	Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let salt = SaltString::generate(&mut OsRng);
	let password_hash = Argon2::default()
		.hash_password(request.password.as_bytes(), &salt)?
		.to_string();

	let new_profile = NewProfile {
		username: request.username,
		email: request.email,
		password_hash,
	};

	let conn = pool.get().await?;
	let new_profile = new_profile.insert(&conn).await?;

	let response = ProfileResponse::from(new_profile);

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool, config, jar, request))]
pub(crate) async fn login(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	jar: PrivateCookieJar,
	Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let profile = Profile::get_by_username(request.username.clone(), &conn)
		.await?
		.ok_or(LoginError::UnknownUsername(request.username))?;

	let parsed_hash = PasswordHash::new(&profile.password_hash)?;
	Argon2::default()
		.verify_password(request.password.as_bytes(), &parsed_hash)?;

	let data = SessionData {
		profile_id:       profile.id,
		profile_is_admin: profile.is_admin,
	};
	let jar = jar.add(data.to_access_token_cookie(&config)?);

	info!("logged in profile {} ({})", profile.id, profile.username);

	let response = ProfileResponse::from(profile);

	Ok((jar, Json(response)))
}

#[instrument(skip_all)]
pub(crate) async fn logout(
	State(config): State<Config>,
	jar: PrivateCookieJar,
) -> Result<impl IntoResponse, Error> {
	let jar = jar.remove(Cookie::from(config.access_cookie_name.clone()));

	Ok((jar, NoContent))
}
