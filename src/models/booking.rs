use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::dsl::{exists, sum};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

use super::Room;
use crate::DbConn;
use crate::error::{BookingError, Error};
use crate::schema::{booking, room};

#[derive(
	Clone, Copy, DbEnum, Debug, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::SessionType"]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
	Morning,
	Midday,
	Evening,
}

impl SessionType {
	/// Built-in durations, used when a property has no explicit
	/// [`TimeAllocation`](super::TimeAllocation)
	#[must_use]
	pub fn default_duration(self) -> f64 {
		match self {
			Self::Morning => 0.5,
			Self::Midday | Self::Evening => 1.0,
		}
	}
}

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::BookingStatus"]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
	#[default]
	Pending,
	Approved,
	Rejected,
}

impl BookingStatus {
	/// Whether an application in this status holds its slot
	#[must_use]
	pub fn occupies_slot(self) -> bool {
		matches!(self, Self::Pending | Self::Approved)
	}
}

/// An application of a profile for one room session on one date
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = booking)]
#[diesel(check_for_backend(Pg))]
pub struct Booking {
	pub id:             i32,
	pub profile_id:     i32,
	pub room_id:        i32,
	pub booking_date:   NaiveDate,
	pub session_type:   SessionType,
	pub status:         BookingStatus,
	pub notes:          Option<String>,
	pub duration_value: f64,
	pub approved_by:    Option<i32>,
	pub approval_notes: Option<String>,
	pub created_at:     NaiveDateTime,
	pub updated_at:     NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter {
	pub status:      Option<BookingStatus>,
	pub property_id: Option<i32>,
}

impl Booking {
	/// Get a [`Booking`] together with the [`Room`] it applies to
	#[instrument(skip(conn))]
	pub async fn get_with_room(
		b_id: i32,
		conn: &DbConn,
	) -> Result<(Self, Room), Error> {
		let result = conn
			.interact(move |conn| {
				booking::table
					.inner_join(room::table)
					.filter(booking::id.eq(b_id))
					.select((Self::as_select(), Room::as_select()))
					.get_result(conn)
			})
			.await??;

		Ok(result)
	}

	/// Get all the bookings a profile created, newest date first
	#[instrument(skip(conn))]
	pub async fn for_profile(
		prof_id: i32,
		filter: BookingFilter,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let bookings = conn
			.interact(move |conn| {
				let mut query = booking::table
					.inner_join(room::table)
					.filter(booking::profile_id.eq(prof_id))
					.order(booking::booking_date.desc())
					.select(Self::as_select())
					.into_boxed();

				if let Some(status) = filter.status {
					query = query.filter(booking::status.eq(status));
				}

				if let Some(property_id) = filter.property_id {
					query = query.filter(room::property_id.eq(property_id));
				}

				query.load(conn)
			})
			.await??;

		Ok(bookings)
	}

	/// Approve a pending [`Booking`]
	pub async fn approve(
		b_id: i32,
		reviewer_id: i32,
		notes: Option<String>,
		conn: &DbConn,
	) -> Result<Self, Error> {
		Self::review(b_id, BookingStatus::Approved, reviewer_id, notes, conn)
			.await
	}

	/// Reject a pending [`Booking`], freeing its slot for new applications
	pub async fn reject(
		b_id: i32,
		reviewer_id: i32,
		notes: Option<String>,
		conn: &DbConn,
	) -> Result<Self, Error> {
		Self::review(b_id, BookingStatus::Rejected, reviewer_id, notes, conn)
			.await
	}

	/// Move a pending [`Booking`] into a terminal status
	///
	/// The status check and the update are a single conditional statement,
	/// so two concurrent reviews cannot both take effect.
	#[instrument(skip(conn))]
	async fn review(
		b_id: i32,
		new_status: BookingStatus,
		reviewer_id: i32,
		notes: Option<String>,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let reviewed = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let updated: Option<Booking> =
						diesel::update(
							booking::table.filter(booking::id.eq(b_id)).filter(
								booking::status.eq(BookingStatus::Pending),
							),
						)
							.set((
								booking::status.eq(new_status),
								booking::approved_by.eq(reviewer_id),
								booking::approval_notes.eq(notes),
								booking::updated_at
									.eq(Utc::now().naive_utc()),
							))
							.returning(Booking::as_returning())
							.get_result(conn)
							.optional()?;

					if let Some(updated) = updated {
						return Ok(updated);
					}

					// Nothing matched: the booking is either gone or has
					// already left the pending state
					let current: Booking = booking::table
						.find(b_id)
						.select(Booking::as_select())
						.get_result(conn)?;

					Err(BookingError::InvalidTransition(current.status).into())
				})
			})
			.await??;

		info!(
			"booking {} moved to {:?} by profile {}",
			reviewed.id, reviewed.status, reviewer_id
		);

		Ok(reviewed)
	}
}

/// Everything needed to charge a new application against a property's
/// weekly allowance
#[derive(Clone, Copy, Debug)]
pub struct WeeklyAllowance {
	pub property_id: i32,
	pub limit_days:  f64,
	pub week_start:  NaiveDate,
	pub week_end:    NaiveDate,
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = booking)]
pub struct NewBooking {
	pub profile_id:     i32,
	pub room_id:        i32,
	pub booking_date:   NaiveDate,
	pub session_type:   SessionType,
	pub notes:          Option<String>,
	pub duration_value: f64,
}

impl NewBooking {
	/// Insert this [`NewBooking`] as a pending application
	///
	/// The slot check, the allowance check, and the insert run in one
	/// transaction. A concurrent create that slips past the pre-check
	/// trips the partial unique slot index instead and surfaces as the
	/// same [`BookingError::SlotTaken`].
	#[instrument(skip(conn))]
	pub async fn insert(
		self,
		allowance: WeeklyAllowance,
		conn: &DbConn,
	) -> Result<Booking, Error> {
		let active = [BookingStatus::Pending, BookingStatus::Approved];

		let new_booking = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					let slot_taken: bool = diesel::select(exists(
						booking::table
							.filter(booking::room_id.eq(self.room_id))
							.filter(
								booking::booking_date.eq(self.booking_date),
							)
							.filter(
								booking::session_type.eq(self.session_type),
							)
							.filter(booking::status.eq_any(active)),
					))
					.get_result(conn)?;

					if slot_taken {
						return Err(BookingError::SlotTaken.into());
					}

					let committed: f64 = booking::table
						.inner_join(room::table)
						.filter(room::property_id.eq(allowance.property_id))
						.filter(booking::profile_id.eq(self.profile_id))
						.filter(booking::status.eq_any(active))
						.filter(
							booking::booking_date.ge(allowance.week_start),
						)
						.filter(booking::booking_date.lt(allowance.week_end))
						.select(sum(booking::duration_value))
						.get_result::<Option<f64>>(conn)?
						.unwrap_or_default();

					if committed + self.duration_value > allowance.limit_days
					{
						return Err(BookingError::QuotaExceeded {
							limit: allowance.limit_days,
							committed,
						}
						.into());
					}

					let new_booking = diesel::insert_into(booking::table)
						.values(self)
						.returning(Booking::as_returning())
						.get_result(conn)?;

					Ok(new_booking)
				})
			})
			.await??;

		info!("created booking {new_booking:?}");

		Ok(new_booking)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_pending_and_approved_occupy_a_slot() {
		assert!(BookingStatus::Pending.occupies_slot());
		assert!(BookingStatus::Approved.occupies_slot());
		assert!(!BookingStatus::Rejected.occupies_slot());
	}

	#[test]
	fn builtin_durations_match_the_session_types() {
		assert_eq!(SessionType::Morning.default_duration(), 0.5);
		assert_eq!(SessionType::Midday.default_duration(), 1.0);
		assert_eq!(SessionType::Evening.default_duration(), 1.0);
	}

	#[test]
	fn session_types_use_lowercase_wire_names() {
		let json = serde_json::to_string(&SessionType::Morning).unwrap();

		assert_eq!(json, "\"morning\"");

		let parsed: SessionType =
			serde_json::from_str("\"evening\"").unwrap();

		assert_eq!(parsed, SessionType::Evening);
	}

	#[test]
	fn unknown_session_types_are_rejected() {
		let parsed = serde_json::from_str::<SessionType>("\"midnight\"");

		assert!(parsed.is_err());
	}

	#[test]
	fn statuses_use_lowercase_wire_names() {
		let parsed: BookingStatus =
			serde_json::from_str("\"approved\"").unwrap();

		assert_eq!(parsed, BookingStatus::Approved);
	}
}
