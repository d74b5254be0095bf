//! Controllers for [`Profile`]s

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, NoContent};
use validator::Validate;

use crate::error::Error;
use crate::models::Profile;
use crate::schemas::profile::{ChangePasswordRequest, ProfileResponse};
use crate::{AdminSession, DbPool, Session};

#[instrument(skip(pool))]
pub(crate) async fn get_all_profiles(
	State(pool): State<DbPool>,
	_session: AdminSession,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let profiles = Profile::get_all(&conn).await?;
	let response: Vec<ProfileResponse> =
		profiles.into_iter().map(Into::into).collect();

	Ok(Json(response))
}

#[instrument(skip(pool))]
pub(crate) async fn get_current_profile(
	State(pool): State<DbPool>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let profile = Profile::get(session.data.profile_id, &conn).await?;

	Ok(Json(ProfileResponse::from(profile)))
}

#[instrument(skip(pool, request))]
pub(crate) async fn change_password(
	State(pool): State<DbPool>,
	session: Session,
	Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let profile = Profile::get(session.data.profile_id, &conn).await?;

	let parsed_hash = PasswordHash::new(&profile.password_hash)?;
	Argon2::default()
		.verify_password(request.current_password.as_bytes(), &parsed_hash)?;

	let salt = SaltString::generate(&mut OsRng);
	let new_hash = Argon2::default()
		.hash_password(request.new_password.as_bytes(), &salt)?
		.to_string();

	Profile::set_password_hash(profile.id, new_hash, &conn).await?;

	Ok(NoContent)
}
