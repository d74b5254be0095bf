use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::models::{NewRoom, Room, RoomUpdate};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
	pub id:          i32,
	pub property_id: i32,
	pub name:        String,
	pub description: Option<String>,
	pub capacity:    i32,
	pub is_active:   bool,
	pub created_at:  NaiveDateTime,
}

impl From<Room> for RoomResponse {
	fn from(value: Room) -> Self {
		Self {
			id:          value.id,
			property_id: value.property_id,
			name:        value.name,
			description: value.description,
			capacity:    value.capacity,
			is_active:   value.is_active,
			created_at:  value.created_at,
		}
	}
}

/// Query parameters for listing rooms
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomFilter {
	pub property_id: i32,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
	pub property_id: i32,
	#[validate(length(
		min = 1,
		max = 100,
		message = "room name must be between 1 and 100 characters long",
		code = "room-name-length"
	))]
	pub name:        String,
	pub description: Option<String>,
	#[validate(range(
		min = 1,
		message = "capacity must be at least 1",
		code = "room-capacity"
	))]
	#[serde(default = "default_capacity")]
	pub capacity:    i32,
}

fn default_capacity() -> i32 { 1 }

impl From<CreateRoomRequest> for NewRoom {
	fn from(value: CreateRoomRequest) -> Self {
		Self {
			property_id: value.property_id,
			name:        value.name,
			description: value.description,
			capacity:    value.capacity,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
	#[validate(length(
		min = 1,
		max = 100,
		message = "room name must be between 1 and 100 characters long",
		code = "room-name-length"
	))]
	pub name:        Option<String>,
	pub description: Option<String>,
	#[validate(range(
		min = 1,
		message = "capacity must be at least 1",
		code = "room-capacity"
	))]
	pub capacity:    Option<i32>,
	pub is_active:   Option<bool>,
}

impl From<UpdateRoomRequest> for RoomUpdate {
	fn from(value: UpdateRoomRequest) -> Self {
		Self {
			name:        value.name,
			description: value.description,
			capacity:    value.capacity,
			is_active:   value.is_active,
		}
	}
}
