use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::models::{TimeAllocation, TimeAllocationUpdate};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeAllocationResponse {
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

impl From<TimeAllocation> for TimeAllocationResponse {
	fn from(value: TimeAllocation) -> Self {
		Self {
			id:                value.id,
			property_id:       value.property_id,
			weekly_limit_days: value.weekly_limit_days,
			morning_duration:  value.morning_duration,
			midday_duration:   value.midday_duration,
			evening_duration:  value.evening_duration,
			reset_day_of_week: value.reset_day_of_week,
			created_at:        value.created_at,
			updated_at:        value.updated_at,
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimeAllocationRequest {
	#[validate(range(
		exclusive_min = 0.0,
		message = "weekly limit must be greater than zero",
		code = "allocation-weekly-limit"
	))]
	pub weekly_limit_days: Option<f64>,
	#[validate(range(
		exclusive_min = 0.0,
		message = "session duration must be greater than zero",
		code = "allocation-duration"
	))]
	pub morning_duration:  Option<f64>,
	#[validate(range(
		exclusive_min = 0.0,
		message = "session duration must be greater than zero",
		code = "allocation-duration"
	))]
	pub midday_duration:   Option<f64>,
	#[validate(range(
		exclusive_min = 0.0,
		message = "session duration must be greater than zero",
		code = "allocation-duration"
	))]
	pub evening_duration:  Option<f64>,
	#[validate(range(
		min = 1,
		max = 7,
		message = "reset day must be an ISO weekday between 1 and 7",
		code = "allocation-reset-day"
	))]
	pub reset_day_of_week: Option<i32>,
}

impl From<UpdateTimeAllocationRequest> for TimeAllocationUpdate {
	fn from(value: UpdateTimeAllocationRequest) -> Self {
		Self {
			weekly_limit_days: value.weekly_limit_days,
			morning_duration:  value.morning_duration,
			midday_duration:   value.midday_duration,
			evening_duration:  value.evening_duration,
			reset_day_of_week: value.reset_day_of_week,
		}
	}
}

#[cfg(test)]
mod tests {
	use validator::Validate;

	use super::*;

	fn request() -> UpdateTimeAllocationRequest {
		UpdateTimeAllocationRequest {
			weekly_limit_days: None,
			morning_duration:  None,
			midday_duration:   None,
			evening_duration:  None,
			reset_day_of_week: None,
		}
	}

	#[test]
	fn zero_durations_are_rejected() {
		let update =
			UpdateTimeAllocationRequest { morning_duration: Some(0.0), ..request() };

		assert!(update.validate().is_err());
	}

	#[test]
	fn negative_weekly_limits_are_rejected() {
		let update = UpdateTimeAllocationRequest {
			weekly_limit_days: Some(-1.0),
			..request()
		};

		assert!(update.validate().is_err());
	}

	#[test]
	fn out_of_range_reset_days_are_rejected() {
		for day in [0, 8] {
			let update = UpdateTimeAllocationRequest {
				reset_day_of_week: Some(day),
				..request()
			};

			assert!(update.validate().is_err());
		}
	}

	#[test]
	fn sensible_updates_pass_validation() {
		let update = UpdateTimeAllocationRequest {
			weekly_limit_days: Some(5.0),
			morning_duration:  Some(0.5),
			midday_duration:   Some(1.0),
			evening_duration:  Some(1.5),
			reset_day_of_week: Some(7),
		};

		assert!(update.validate().is_ok());
	}
}
