//! Controllers for [`Room`]s

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::error::Error;
use crate::models::{NewRoom, Property, PropertyRole, Room, RoomUpdate};
use crate::schemas::room::{
	CreateRoomRequest,
	RoomFilter,
	RoomResponse,
	UpdateRoomRequest,
};
use crate::{DbPool, Session};

#[instrument(skip(pool))]
pub(crate) async fn get_rooms(
	State(pool): State<DbPool>,
	session: Session,
	Query(filter): Query<RoomFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Property::check_role(
		filter.property_id,
		session.data.profile_id,
		PropertyRole::Member,
		&conn,
	)
	.await?;

	let rooms = Room::for_property(filter.property_id, &conn).await?;
	let response: Vec<RoomResponse> =
		rooms.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub(crate) async fn create_room(
	State(pool): State<DbPool>,
	session: Session,
	Json(request): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	Property::check_role(
		request.property_id,
		session.data.profile_id,
		PropertyRole::Admin,
		&conn,
	)
	.await?;

	let new_room = NewRoom::from(request).insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(RoomResponse::from(new_room))))
}

#[instrument(skip(pool))]
pub(crate) async fn get_room(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let room = Room::get_by_id(id, &conn).await?;

	Property::check_role(
		room.property_id,
		session.data.profile_id,
		PropertyRole::Member,
		&conn,
	)
	.await?;

	Ok((StatusCode::OK, Json(RoomResponse::from(room))))
}

#[instrument(skip(pool))]
pub(crate) async fn update_room(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
	Json(request): Json<UpdateRoomRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let room = Room::get_by_id(id, &conn).await?;

	Property::check_role(
		room.property_id,
		session.data.profile_id,
		PropertyRole::Admin,
		&conn,
	)
	.await?;

	let room = RoomUpdate::from(request).apply_to(id, &conn).await?;

	Ok((StatusCode::OK, Json(RoomResponse::from(room))))
}
