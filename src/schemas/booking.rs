use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{Booking, BookingStatus, SessionType};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
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

impl From<Booking> for BookingResponse {
	fn from(value: Booking) -> Self {
		Self {
			id:             value.id,
			profile_id:     value.profile_id,
			room_id:        value.room_id,
			booking_date:   value.booking_date,
			session_type:   value.session_type,
			status:         value.status,
			notes:          value.notes,
			duration_value: value.duration_value,
			approved_by:    value.approved_by,
			approval_notes: value.approval_notes,
			created_at:     value.created_at,
			updated_at:     value.updated_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
	pub room_id:      i32,
	pub booking_date: NaiveDate,
	pub session_type: SessionType,
	pub notes:        Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBookingRequest {
	pub approval_notes: Option<String>,
}
