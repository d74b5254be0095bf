use chrono::NaiveDateTime;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

use super::{NewTimeAllocation, Profile, TimeAllocation};
use crate::schema::{profile, property, property_member};
use crate::{DbConn, Error};

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::MemberRole"]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
	#[default]
	Member,
	Admin,
}

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::InvitationStatus"]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
	#[default]
	Pending,
	Accepted,
	Rejected,
}

/// What a profile is allowed to do within a property
///
/// The variants are ordered so permission checks read as plain
/// comparisons: `role >= PropertyRole::Admin`.
#[derive(
	Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PropertyRole {
	None,
	Member,
	Admin,
	Owner,
}

impl PropertyRole {
	/// Derive the effective role of a profile from the property row and its
	/// membership edge, if any
	///
	/// Ownership wins over any membership edge; a membership edge only
	/// counts once the invitation has been accepted.
	#[must_use]
	pub fn resolve(
		profile_id: i32,
		property: &Property,
		membership: Option<&PropertyMember>,
	) -> Self {
		if property.owner_id == profile_id {
			return Self::Owner;
		}

		match membership {
			Some(member)
				if member.invitation_status == InvitationStatus::Accepted =>
			{
				match member.role {
					MemberRole::Admin => Self::Admin,
					MemberRole::Member => Self::Member,
				}
			},
			_ => Self::None,
		}
	}
}

/// A single shared property
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = property)]
#[diesel(check_for_backend(Pg))]
pub struct Property {
	pub id:          i32,
	pub name:        String,
	pub description: Option<String>,
	pub owner_id:    i32,
	pub is_active:   bool,
	pub created_at:  NaiveDateTime,
}

impl Property {
	/// Get a [`Property`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(p_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let result = conn
			.interact(move |conn| {
				use self::property::dsl::*;

				property.find(p_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(result)
	}

	/// Get all active properties a profile owns or has accepted a
	/// membership for
	#[instrument(skip(conn))]
	pub async fn get_for_profile(
		prof_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let (mut properties, joined) = conn
			.interact(move |conn| {
				let owned: Vec<Property> = property::table
					.filter(property::owner_id.eq(prof_id))
					.filter(property::is_active.eq(true))
					.select(Property::as_select())
					.load(conn)?;

				let joined: Vec<Property> = property::table
					.inner_join(property_member::table)
					.filter(property_member::profile_id.eq(prof_id))
					.filter(
						property_member::invitation_status
							.eq(InvitationStatus::Accepted),
					)
					.filter(property::is_active.eq(true))
					.select(Property::as_select())
					.load(conn)?;

				Ok::<_, diesel::result::Error>((owned, joined))
			})
			.await??;

		for prop in joined {
			if !properties.iter().any(|p| p.id == prop.id) {
				properties.push(prop);
			}
		}

		Ok(properties)
	}

	/// The effective [`PropertyRole`] of a profile within this property
	#[instrument(skip(self, conn))]
	pub async fn role_of(
		&self,
		prof_id: i32,
		conn: &DbConn,
	) -> Result<PropertyRole, Error> {
		if self.owner_id == prof_id {
			return Ok(PropertyRole::Owner);
		}

		let membership = PropertyMember::get(self.id, prof_id, conn).await?;

		Ok(PropertyRole::resolve(prof_id, self, membership.as_ref()))
	}

	/// Get the property with the given id and fail with
	/// [`Error::Forbidden`] unless the profile holds at least `min_role`
	/// in it
	#[instrument(skip(conn))]
	pub async fn check_role(
		p_id: i32,
		prof_id: i32,
		min_role: PropertyRole,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let property = Self::get_by_id(p_id, conn).await?;

		let role = property.role_of(prof_id, conn).await?;

		if role < min_role {
			warn!(
				"profile {prof_id} acted as {role:?} on property {p_id} but \
				 {min_role:?} is required"
			);

			return Err(Error::Forbidden);
		}

		Ok(property)
	}

	/// Set the active flag of the [`Property`] with the given id
	#[instrument(skip(conn))]
	pub async fn set_active(
		p_id: i32,
		active: bool,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let result = conn
			.interact(move |conn| {
				use self::property::dsl::*;

				diesel::update(property.find(p_id))
					.set(is_active.eq(active))
					.returning(Property::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("set property {p_id} active flag to {active}");

		Ok(result)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = property)]
pub struct NewProperty {
	pub name:        String,
	pub description: Option<String>,
	pub owner_id:    i32,
}

impl NewProperty {
	/// Insert this [`NewProperty`] along with its default
	/// [`TimeAllocation`]
	///
	/// Both rows are created in the same transaction so a property can
	/// never be observed without an allocation.
	#[instrument(skip(conn))]
	pub async fn insert(
		self,
		conn: &DbConn,
	) -> Result<(Property, TimeAllocation), Error> {
		let (new_property, allocation) = conn
			.interact(|conn| {
				conn.transaction::<_, diesel::result::Error, _>(|conn| {
					let new_property: Property =
						diesel::insert_into(property::table)
							.values(self)
							.returning(Property::as_returning())
							.get_result(conn)?;

					let allocation: TimeAllocation =
						diesel::insert_into(crate::schema::time_allocation::table)
							.values(NewTimeAllocation::defaults(new_property.id))
							.returning(TimeAllocation::as_returning())
							.get_result(conn)?;

					Ok((new_property, allocation))
				})
			})
			.await??;

		info!("created property {} ({})", new_property.id, new_property.name);

		Ok((new_property, allocation))
	}
}

#[derive(AsChangeset, Clone, Debug, Deserialize, Serialize)]
#[diesel(table_name = property)]
pub struct PropertyUpdate {
	pub name:        Option<String>,
	pub description: Option<String>,
}

impl PropertyUpdate {
	/// Apply this update to the [`Property`] with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		p_id: i32,
		conn: &DbConn,
	) -> Result<Property, Error> {
		let result = conn
			.interact(move |conn| {
				use self::property::dsl::*;

				diesel::update(property.find(p_id))
					.set(self)
					.returning(Property::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(result)
	}
}

/// A membership edge between a profile and a property
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = property_member)]
#[diesel(check_for_backend(Pg))]
pub struct PropertyMember {
	pub id:                i32,
	pub property_id:       i32,
	pub profile_id:        i32,
	pub role:              MemberRole,
	pub invitation_status: InvitationStatus,
	pub joined_at:         NaiveDateTime,
}

impl PropertyMember {
	/// Get the membership edge for a profile in a property, if any
	#[instrument(skip(conn))]
	pub async fn get(
		prop_id: i32,
		prof_id: i32,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let membership = conn
			.interact(move |conn| {
				use self::property_member::dsl::*;

				property_member
					.filter(property_id.eq(prop_id))
					.filter(profile_id.eq(prof_id))
					.select(Self::as_select())
					.first(conn)
					.optional()
			})
			.await??;

		Ok(membership)
	}

	/// Get all the membership edges of a property, with their profiles
	#[instrument(skip(conn))]
	pub async fn for_property(
		prop_id: i32,
		conn: &DbConn,
	) -> Result<Vec<(Self, Profile)>, Error> {
		let members = conn
			.interact(move |conn| {
				property_member::table
					.inner_join(
						profile::table
							.on(profile::id.eq(property_member::profile_id)),
					)
					.filter(property_member::property_id.eq(prop_id))
					.select((Self::as_select(), Profile::as_select()))
					.load(conn)
			})
			.await??;

		Ok(members)
	}

	/// Answer the pending invitation of a profile in a property
	#[instrument(skip(conn))]
	pub async fn respond(
		prop_id: i32,
		prof_id: i32,
		response: InvitationStatus,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let membership = conn
			.interact(move |conn| {
				use self::property_member::dsl::*;

				diesel::update(
					property_member
						.filter(property_id.eq(prop_id))
						.filter(profile_id.eq(prof_id))
						.filter(
							invitation_status.eq(InvitationStatus::Pending),
						),
				)
				.set(invitation_status.eq(response))
				.returning(Self::as_returning())
				.get_result(conn)
				.optional()
			})
			.await??;

		let Some(membership) = membership else {
			return Err(Error::NotFound(format!(
				"no pending invitation for profile {prof_id} in property \
				 {prop_id}"
			)));
		};

		info!(
			"profile {prof_id} answered invitation for property {prop_id} \
			 with {response:?}"
		);

		Ok(membership)
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = property_member)]
pub struct NewPropertyMember {
	pub property_id: i32,
	pub profile_id:  i32,
	pub role:        MemberRole,
}

impl NewPropertyMember {
	/// Insert this [`NewPropertyMember`] as a pending invitation
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<PropertyMember, Error> {
		let membership = conn
			.interact(move |conn| {
				use self::property_member::dsl::*;

				diesel::insert_into(property_member)
					.values(self)
					.returning(PropertyMember::as_returning())
					.get_result(conn)
			})
			.await??;

		info!(
			"invited profile {} to property {}",
			self.profile_id, self.property_id
		);

		Ok(membership)
	}
}

#[cfg(test)]
mod tests {
	use chrono::Utc;

	use super::*;

	fn property(owner_id: i32) -> Property {
		Property {
			id: 1,
			name: "Beach house".to_string(),
			description: None,
			owner_id,
			is_active: true,
			created_at: Utc::now().naive_utc(),
		}
	}

	fn membership(
		role: MemberRole,
		invitation_status: InvitationStatus,
	) -> PropertyMember {
		PropertyMember {
			id: 1,
			property_id: 1,
			profile_id: 2,
			role,
			invitation_status,
			joined_at: Utc::now().naive_utc(),
		}
	}

	#[test]
	fn owner_wins_over_any_membership_edge() {
		let prop = property(2);
		let edge = membership(MemberRole::Member, InvitationStatus::Pending);

		let role = PropertyRole::resolve(2, &prop, Some(&edge));

		assert_eq!(role, PropertyRole::Owner);
	}

	#[test]
	fn accepted_admin_resolves_to_admin() {
		let prop = property(1);
		let edge = membership(MemberRole::Admin, InvitationStatus::Accepted);

		let role = PropertyRole::resolve(2, &prop, Some(&edge));

		assert_eq!(role, PropertyRole::Admin);
	}

	#[test]
	fn accepted_member_resolves_to_member() {
		let prop = property(1);
		let edge = membership(MemberRole::Member, InvitationStatus::Accepted);

		let role = PropertyRole::resolve(2, &prop, Some(&edge));

		assert_eq!(role, PropertyRole::Member);
	}

	#[test]
	fn unanswered_or_rejected_invitations_grant_nothing() {
		let prop = property(1);

		for status in
			[InvitationStatus::Pending, InvitationStatus::Rejected]
		{
			let edge = membership(MemberRole::Admin, status);

			let role = PropertyRole::resolve(2, &prop, Some(&edge));

			assert_eq!(role, PropertyRole::None);
		}
	}

	#[test]
	fn strangers_resolve_to_none() {
		let prop = property(1);

		let role = PropertyRole::resolve(3, &prop, None);

		assert_eq!(role, PropertyRole::None);
	}

	#[test]
	fn roles_order_by_privilege() {
		assert!(PropertyRole::None < PropertyRole::Member);
		assert!(PropertyRole::Member < PropertyRole::Admin);
		assert!(PropertyRole::Admin < PropertyRole::Owner);
	}
}
