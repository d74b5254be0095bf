use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::models::Profile;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
	pub id:         i32,
	pub username:   String,
	pub email:      String,
	pub is_admin:   bool,
	pub created_at: NaiveDateTime,
}

impl From<Profile> for ProfileResponse {
	fn from(value: Profile) -> Self {
		Self {
			id:         value.id,
			username:   value.username,
			email:      value.email,
			is_admin:   value.is_admin,
			created_at: value.created_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
	pub current_password: String,
	#[validate(length(
		min = 8,
		message = "password must be at least 8 characters long",
		code = "password-length"
	))]
	pub new_password:     String,
}
