use chrono::NaiveDateTime;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::profile;
use crate::{DbConn, Error};

/// A single profile
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = profile)]
#[diesel(check_for_backend(Pg))]
pub struct Profile {
	pub id:            i32,
	pub username:      String,
	pub email:         String,
	#[serde(skip)]
	pub password_hash: String,
	pub is_admin:      bool,
	pub created_at:    NaiveDateTime,
}

impl Profile {
	/// Get a [`Profile`] given its id
	#[instrument(skip(conn))]
	pub async fn get(query_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let result = conn
			.interact(move |conn| {
				use self::profile::dsl::*;

				profile
					.find(query_id)
					.select(Self::as_select())
					.get_result(conn)
			})
			.await??;

		Ok(result)
	}

	/// Get a list of all [`Profile`]s
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let profiles = conn
			.interact(|conn| {
				use self::profile::dsl::*;

				profile.select(Self::as_select()).load(conn)
			})
			.await??;

		Ok(profiles)
	}

	/// Get a [`Profile`] given its username, if one exists
	#[instrument(skip(conn))]
	pub async fn get_by_username(
		query_username: String,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let result = conn
			.interact(|conn| {
				use self::profile::dsl::*;

				profile
					.filter(username.eq(query_username))
					.select(Self::as_select())
					.first(conn)
					.optional()
			})
			.await??;

		Ok(result)
	}

	/// Replace the password hash for the [`Profile`] with the given id
	#[instrument(skip(conn, hash))]
	pub async fn set_password_hash(
		p_id: i32,
		hash: String,
		conn: &DbConn,
	) -> Result<(), Error> {
		conn.interact(move |conn| {
			use self::profile::dsl::*;

			diesel::update(profile.find(p_id))
				.set(password_hash.eq(hash))
				.execute(conn)
		})
		.await??;

		info!("replaced password hash for profile {p_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = profile)]
pub struct NewProfile {
	pub username:      String,
	pub email:         String,
	#[serde(skip)]
	pub password_hash: String,
}

impl NewProfile {
	/// Insert this [`NewProfile`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Profile, Error> {
		let new_profile = conn
			.interact(|conn| {
				use self::profile::dsl::*;

				diesel::insert_into(profile)
					.values(self)
					.returning(Profile::as_returning())
					.get_result(conn)
			})
			.await??;

		info!(
			"registered new profile id: {} username: {}",
			new_profile.id, new_profile.username
		);

		Ok(new_profile)
	}
}
