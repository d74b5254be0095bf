//! Controllers for [`TimeAllocation`]s

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use validator::Validate;

use crate::error::Error;
use crate::models::{
	Property,
	PropertyRole,
	TimeAllocation,
	TimeAllocationUpdate,
};
use crate::schemas::time_allocation::{
	TimeAllocationResponse,
	UpdateTimeAllocationRequest,
};
use crate::{DbPool, Session};

#[instrument(skip(pool))]
pub(crate) async fn get_time_allocation(
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

	let Some(allocation) =
		TimeAllocation::get_for_property(id, &conn).await?
	else {
		return Err(Error::NotFound(format!(
			"no time allocation for property {id}"
		)));
	};

	Ok((StatusCode::OK, Json(TimeAllocationResponse::from(allocation))))
}

#[instrument(skip(pool))]
pub(crate) async fn update_time_allocation(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
	Json(request): Json<UpdateTimeAllocationRequest>,
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

	let allocation =
		TimeAllocationUpdate::from(request).apply_to(id, &conn).await?;

	Ok((StatusCode::OK, Json(TimeAllocationResponse::from(allocation))))
}
