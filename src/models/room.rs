use chrono::NaiveDateTime;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::room;
use crate::{DbConn, Error};

/// A bookable room within a property
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = room)]
#[diesel(check_for_backend(Pg))]
pub struct Room {
	pub id:          i32,
	pub property_id: i32,
	pub name:        String,
	pub description: Option<String>,
	pub capacity:    i32,
	pub is_active:   bool,
	pub created_at:  NaiveDateTime,
}

impl Room {
	/// Get a [`Room`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let result = conn
			.interact(move |conn| {
				use self::room::dsl::*;

				room.find(r_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(result)
	}

	/// Get all the active rooms of a property
	#[instrument(skip(conn))]
	pub async fn for_property(
		p_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let rooms = conn
			.interact(move |conn| {
				use self::room::dsl::*;

				room.filter(property_id.eq(p_id))
					.filter(is_active.eq(true))
					.select(Self::as_select())
					.load(conn)
			})
			.await??;

		Ok(rooms)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = room)]
pub struct NewRoom {
	pub property_id: i32,
	pub name:        String,
	pub description: Option<String>,
	pub capacity:    i32,
}

impl NewRoom {
	/// Insert this [`NewRoom`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Room, Error> {
		let new_room = conn
			.interact(|conn| {
				use self::room::dsl::*;

				diesel::insert_into(room)
					.values(self)
					.returning(Room::as_returning())
					.get_result(conn)
			})
			.await??;

		info!(
			"created room {} in property {}",
			new_room.id, new_room.property_id
		);

		Ok(new_room)
	}
}

#[derive(AsChangeset, Clone, Debug, Deserialize, Serialize)]
#[diesel(table_name = room)]
pub struct RoomUpdate {
	pub name:        Option<String>,
	pub description: Option<String>,
	pub capacity:    Option<i32>,
	pub is_active:   Option<bool>,
}

impl RoomUpdate {
	/// Apply this update to the [`Room`] with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		r_id: i32,
		conn: &DbConn,
	) -> Result<Room, Error> {
		let result = conn
			.interact(move |conn| {
				use self::room::dsl::*;

				diesel::update(room.find(r_id))
					.set(self)
					.returning(Room::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(result)
	}
}
