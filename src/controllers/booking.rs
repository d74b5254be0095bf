//! Controllers for [`Booking`]s

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{NaiveDate, Utc};

use crate::error::{BookingError, Error};
use crate::models::{
	Booking,
	BookingFilter,
	BookingStatus,
	NewBooking,
	Property,
	PropertyRole,
	Room,
	TimeAllocation,
	WeeklyAllowance,
	week_window,
};
use crate::schemas::booking::{
	BookingResponse,
	CreateBookingRequest,
	ReviewBookingRequest,
};
use crate::{DbPool, Session};

#[instrument(skip(pool))]
pub(crate) async fn get_bookings(
	State(pool): State<DbPool>,
	session: Session,
	Query(filter): Query<BookingFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let bookings =
		Booking::for_profile(session.data.profile_id, filter, &conn).await?;
	let response: Vec<BookingResponse> =
		bookings.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub(crate) async fn create_booking(
	State(pool): State<DbPool>,
	session: Session,
	Json(request): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, Error> {
	check_booking_date(request.booking_date, Utc::now().date_naive())?;

	let conn = pool.get().await?;

	let room = Room::get_by_id(request.room_id, &conn).await?;

	if !room.is_active {
		return Err(Error::NotFound(format!(
			"room {} is not active",
			room.id
		)));
	}

	Property::check_role(
		room.property_id,
		session.data.profile_id,
		PropertyRole::Member,
		&conn,
	)
	.await?;

	let allocation =
		TimeAllocation::get_for_property(room.property_id, &conn).await?;

	// The duration is pinned here; later allocation changes leave already
	// created bookings untouched
	let (duration_value, limit_days, (week_start, week_end)) =
		match &allocation {
			Some(allocation) => (
				allocation.duration_for(request.session_type),
				allocation.weekly_limit_days,
				allocation.week_window(request.booking_date),
			),
			None => (
				request.session_type.default_duration(),
				TimeAllocation::DEFAULT_WEEKLY_LIMIT_DAYS,
				week_window(
					TimeAllocation::DEFAULT_RESET_DAY,
					request.booking_date,
				),
			),
		};

	let allowance = WeeklyAllowance {
		property_id: room.property_id,
		limit_days,
		week_start,
		week_end,
	};

	let new_booking = NewBooking {
		profile_id: session.data.profile_id,
		room_id: room.id,
		booking_date: request.booking_date,
		session_type: request.session_type,
		notes: request.notes,
		duration_value,
	};

	let new_booking = new_booking.insert(allowance, &conn).await?;

	Ok((StatusCode::CREATED, Json(BookingResponse::from(new_booking))))
}

#[instrument(skip(pool))]
pub(crate) async fn get_booking(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let (booking, room) = Booking::get_with_room(id, &conn).await?;

	if booking.profile_id != session.data.profile_id {
		Property::check_role(
			room.property_id,
			session.data.profile_id,
			PropertyRole::Admin,
			&conn,
		)
		.await?;
	}

	Ok((StatusCode::OK, Json(BookingResponse::from(booking))))
}

#[instrument(skip(pool))]
pub(crate) async fn approve_booking(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
	Json(request): Json<ReviewBookingRequest>,
) -> Result<impl IntoResponse, Error> {
	review_booking(pool, session, id, true, request).await
}

#[instrument(skip(pool))]
pub(crate) async fn reject_booking(
	State(pool): State<DbPool>,
	session: Session,
	Path(id): Path<i32>,
	Json(request): Json<ReviewBookingRequest>,
) -> Result<impl IntoResponse, Error> {
	review_booking(pool, session, id, false, request).await
}

/// Shared approve/reject path
async fn review_booking(
	pool: DbPool,
	session: Session,
	b_id: i32,
	approve: bool,
	request: ReviewBookingRequest,
) -> Result<(StatusCode, Json<BookingResponse>), Error> {
	let conn = pool.get().await?;

	let (booking, room) = Booking::get_with_room(b_id, &conn).await?;

	if booking.status != BookingStatus::Pending {
		return Err(BookingError::InvalidTransition(booking.status).into());
	}

	Property::check_role(
		room.property_id,
		session.data.profile_id,
		PropertyRole::Admin,
		&conn,
	)
	.await?;

	let reviewer_id = session.data.profile_id;

	let booking = if approve {
		Booking::approve(booking.id, reviewer_id, request.approval_notes, &conn)
			.await?
	} else {
		Booking::reject(booking.id, reviewer_id, request.approval_notes, &conn)
			.await?
	};

	Ok((StatusCode::OK, Json(BookingResponse::from(booking))))
}

fn check_booking_date(date: NaiveDate, today: NaiveDate) -> Result<(), Error> {
	if date <= today {
		return Err(BookingError::DateNotInFuture(date).into());
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn date(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	#[test]
	fn todays_date_is_rejected() {
		let today = date(2025, 4, 7);

		assert!(check_booking_date(today, today).is_err());
	}

	#[test]
	fn past_dates_are_rejected() {
		let today = date(2025, 4, 7);

		assert!(check_booking_date(date(2025, 4, 6), today).is_err());
		assert!(check_booking_date(date(2024, 12, 31), today).is_err());
	}

	#[test]
	fn tomorrow_is_accepted() {
		let today = date(2025, 4, 7);

		assert!(check_booking_date(date(2025, 4, 8), today).is_ok());
	}
}
