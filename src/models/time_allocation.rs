use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::SessionType;
use crate::schema::time_allocation;
use crate::{DbConn, Error};

/// Per-property session durations and weekly allowance
///
/// Every property gets exactly one of these, created together with the
/// property itself and deleted along with it.
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = time_allocation)]
#[diesel(check_for_backend(Pg))]
pub struct TimeAllocation {
	pub id:                i32,
	pub property_id:       i32,
	pub weekly_limit_days: f64,
	pub morning_duration:  f64,
	pub midday_duration:   f64,
	pub evening_duration:  f64,
	pub reset_day_of_week: i32,
	pub created_at:        NaiveDateTime,
	pub updated_at:        NaiveDateTime,
}

impl TimeAllocation {
	/// ISO weekday the weekly allowance resets on by default (Monday)
	pub const DEFAULT_RESET_DAY: i32 = 1;
	pub const DEFAULT_WEEKLY_LIMIT_DAYS: f64 = 7.0;

	/// The configured duration for the given session type
	#[must_use]
	pub fn duration_for(&self, session_type: SessionType) -> f64 {
		match session_type {
			SessionType::Morning => self.morning_duration,
			SessionType::Midday => self.midday_duration,
			SessionType::Evening => self.evening_duration,
		}
	}

	/// The allowance window containing `as_of`
	#[must_use]
	pub fn week_window(&self, as_of: NaiveDate) -> (NaiveDate, NaiveDate) {
		week_window(self.reset_day_of_week, as_of)
	}

	/// Get the [`TimeAllocation`] for a property, if one exists
	#[instrument(skip(conn))]
	pub async fn get_for_property(
		p_id: i32,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let allocation = conn
			.interact(move |conn| {
				use self::time_allocation::dsl::*;

				time_allocation
					.filter(property_id.eq(p_id))
					.select(Self::as_select())
					.first(conn)
					.optional()
			})
			.await??;

		Ok(allocation)
	}
}

/// The 7-day window containing `as_of`, anchored on the most recent
/// occurrence of `reset_day` (ISO weekday, Monday = 1)
///
/// The start date is inclusive, the end date exclusive.
#[must_use]
pub fn week_window(reset_day: i32, as_of: NaiveDate) -> (NaiveDate, NaiveDate) {
	let weekday = as_of.weekday().number_from_monday() as i32;
	let days_since_reset = (weekday - reset_day).rem_euclid(7);

	let start = as_of - Duration::days(days_since_reset.into());

	(start, start + Duration::days(7))
}

#[derive(Clone, Copy, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = time_allocation)]
pub struct NewTimeAllocation {
	pub property_id:       i32,
	pub weekly_limit_days: f64,
	pub morning_duration:  f64,
	pub midday_duration:   f64,
	pub evening_duration:  f64,
	pub reset_day_of_week: i32,
}

impl NewTimeAllocation {
	/// The allocation every new property starts out with
	#[must_use]
	pub fn defaults(property_id: i32) -> Self {
		Self {
			property_id,
			weekly_limit_days: TimeAllocation::DEFAULT_WEEKLY_LIMIT_DAYS,
			morning_duration: SessionType::Morning.default_duration(),
			midday_duration: SessionType::Midday.default_duration(),
			evening_duration: SessionType::Evening.default_duration(),
			reset_day_of_week: TimeAllocation::DEFAULT_RESET_DAY,
		}
	}
}

#[derive(AsChangeset, Clone, Copy, Debug, Deserialize, Serialize)]
#[diesel(table_name = time_allocation)]
pub struct TimeAllocationUpdate {
	pub weekly_limit_days: Option<f64>,
	pub morning_duration:  Option<f64>,
	pub midday_duration:   Option<f64>,
	pub evening_duration:  Option<f64>,
	pub reset_day_of_week: Option<i32>,
}

impl TimeAllocationUpdate {
	/// Apply this update to the allocation of the property with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		p_id: i32,
		conn: &DbConn,
	) -> Result<TimeAllocation, Error> {
		let allocation = conn
			.interact(move |conn| {
				use self::time_allocation::dsl::*;

				diesel::update(time_allocation.filter(property_id.eq(p_id)))
					.set((self, updated_at.eq(Utc::now().naive_utc())))
					.returning(TimeAllocation::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("updated time allocation for property {p_id}");

		Ok(allocation)
	}
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;

	use super::*;

	fn date(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	#[test]
	fn window_starts_on_the_anchor_day_itself() {
		// 2025-04-07 is a Monday
		let (start, end) = week_window(1, date(2025, 4, 7));

		assert_eq!(start, date(2025, 4, 7));
		assert_eq!(end, date(2025, 4, 14));
	}

	#[test]
	fn window_walks_back_to_the_most_recent_anchor() {
		// 2025-04-10 is a Thursday
		let (start, end) = week_window(1, date(2025, 4, 10));

		assert_eq!(start, date(2025, 4, 7));
		assert_eq!(end, date(2025, 4, 14));
	}

	#[test]
	fn window_wraps_around_the_week_boundary() {
		// Sunday anchor (7), asked on a Wednesday 2025-04-09
		let (start, end) = week_window(7, date(2025, 4, 9));

		assert_eq!(start, date(2025, 4, 6));
		assert_eq!(end, date(2025, 4, 13));
	}

	#[test]
	fn every_day_of_the_window_maps_back_to_the_same_window() {
		let anchor = date(2025, 4, 7);

		for offset in 0..7 {
			let day = anchor + Duration::days(offset);
			let (start, end) = week_window(1, day);

			assert_eq!(start, anchor);
			assert_eq!(end, anchor + Duration::days(7));
		}
	}

	#[test]
	fn default_allocation_matches_builtin_durations() {
		let defaults = NewTimeAllocation::defaults(1);

		assert_eq!(defaults.morning_duration, 0.5);
		assert_eq!(defaults.midday_duration, 1.0);
		assert_eq!(defaults.evening_duration, 1.0);
		assert_eq!(defaults.weekly_limit_days, 7.0);
		assert_eq!(defaults.reset_day_of_week, 1);
	}
}
