use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::models::{
	InvitationStatus,
	MemberRole,
	Profile,
	Property,
	PropertyMember,
	PropertyUpdate,
};
use crate::schemas::profile::ProfileResponse;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponse {
	pub id:          i32,
	pub name:        String,
	pub description: Option<String>,
	pub owner_id:    i32,
	pub is_active:   bool,
	pub created_at:  NaiveDateTime,
}

impl From<Property> for PropertyResponse {
	fn from(value: Property) -> Self {
		Self {
			id:          value.id,
			name:        value.name,
			description: value.description,
			owner_id:    value.owner_id,
			is_active:   value.is_active,
			created_at:  value.created_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
	#[validate(length(
		min = 1,
		max = 100,
		message = "property name must be between 1 and 100 characters long",
		code = "property-name-length"
	))]
	pub name:        String,
	pub description: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyRequest {
	#[validate(length(
		min = 1,
		max = 100,
		message = "property name must be between 1 and 100 characters long",
		code = "property-name-length"
	))]
	pub name:        Option<String>,
	pub description: Option<String>,
}

impl From<UpdatePropertyRequest> for PropertyUpdate {
	fn from(value: UpdatePropertyRequest) -> Self {
		Self { name: value.name, description: value.description }
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPropertyActiveRequest {
	pub is_active: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMemberResponse {
	pub id:                i32,
	pub property_id:       i32,
	pub role:              MemberRole,
	pub invitation_status: InvitationStatus,
	pub joined_at:         NaiveDateTime,
	pub profile:           ProfileResponse,
}

impl From<(PropertyMember, Profile)> for PropertyMemberResponse {
	fn from(value: (PropertyMember, Profile)) -> Self {
		let (member, profile) = value;

		Self {
			id:                member.id,
			property_id:       member.property_id,
			role:              member.role,
			invitation_status: member.invitation_status,
			joined_at:         member.joined_at,
			profile:           profile.into(),
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitePropertyMemberRequest {
	pub profile_id: i32,
	#[serde(default)]
	pub role:       MemberRole,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RespondInvitationRequest {
	pub accept: bool,
}
