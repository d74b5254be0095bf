//! Controllers for [`Property`]s and their members

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::error::Error;
use crate::models::{
	InvitationStatus,
	NewProperty,
	NewPropertyMember,
	Profile,
	Property,
	PropertyMember,
	PropertyRole,
	PropertyUpdate,
};
use crate::schemas::property::{
	CreatePropertyRequest,
	InvitePropertyMemberRequest,
	PropertyMemberResponse,
	PropertyResponse,
	RespondInvitationRequest,
	SetPropertyActiveRequest,
	UpdatePropertyRequest,
};
use crate::{DbPool, Session};

#[instrument(skip(pool))]
pub(crate) async fn get_properties(
	State(pool): State<DbPool>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let properties =
		Property::get_for_profile(session.data.profile_id, &conn).await?;
	let response: Vec<PropertyResponse> =
		properties.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub(crate) async fn create_property(
	State(pool): State<DbPool>,
	session: Session,
	Json(request): Json<CreatePropertyRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let new_property = NewProperty {
		name:        request.name,
		description: request.description,
		owner_id:    session.data.profile_id,
	};

	let conn = pool.get().await?;
	let (new_property, _allocation) = new_property.insert(&conn).await?;

	let response = PropertyResponse::from(new_property);

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub(crate) async fn get_property(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let property = Property::check_role(
		id,
		session.data.profile_id,
		PropertyRole::Member,
		&conn,
	)
	.await?;

	Ok((StatusCode::OK, Json(PropertyResponse::from(property))))
}

#[instrument(skip(pool))]
pub(crate) async fn update_property(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
	Json(request): Json<UpdatePropertyRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	Property::check_role(
		id,
		session.data.profile_id,
		PropertyRole::Admin,
		&conn,
	)
	.await?;

	let property = PropertyUpdate::from(request).apply_to(id, &conn).await?;

	Ok((StatusCode::OK, Json(PropertyResponse::from(property))))
}

#[instrument(skip(pool))]
pub(crate) async fn set_property_active(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
	Json(request): Json<SetPropertyActiveRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Property::check_role(
		id,
		session.data.profile_id,
		PropertyRole::Owner,
		&conn,
	)
	.await?;

	let property = Property::set_active(id, request.is_active, &conn).await?;

	Ok((StatusCode::OK, Json(PropertyResponse::from(property))))
}

#[instrument(skip(pool))]
pub(crate) async fn get_property_members(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Property::check_role(
		id,
		session.data.profile_id,
		PropertyRole::Member,
		&conn,
	)
	.await?;

	let members = PropertyMember::for_property(id, &conn).await?;
	let response: Vec<PropertyMemberResponse> =
		members.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub(crate) async fn invite_property_member(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
	Json(request): Json<InvitePropertyMemberRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Property::check_role(
		id,
		session.data.profile_id,
		PropertyRole::Admin,
		&conn,
	)
	.await?;

	let new_member = NewPropertyMember {
		property_id: id,
		profile_id:  request.profile_id,
		role:        request.role,
	};

	let member = new_member.insert(&conn).await?;
	let profile = Profile::get(member.profile_id, &conn).await?;

	let response = PropertyMemberResponse::from((member, profile));

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub(crate) async fn respond_property_invitation(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
	Json(request): Json<RespondInvitationRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let response_status = if request.accept {
		InvitationStatus::Accepted
	} else {
		InvitationStatus::Rejected
	};

	let member = PropertyMember::respond(
		id,
		session.data.profile_id,
		response_status,
		&conn,
	)
	.await?;

	let profile = Profile::get(member.profile_id, &conn).await?;

	let response = PropertyMemberResponse::from((member, profile));

	Ok((StatusCode::OK, Json(response)))
}
