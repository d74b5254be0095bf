use std::time::Duration;

use axum::Router;
use axum::routing::{get, post, put};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::auth::{login, logout, register};
use crate::controllers::booking::{
	approve_booking,
	create_booking,
	get_booking,
	get_bookings,
	reject_booking,
};
use crate::controllers::healthcheck;
use crate::controllers::profile::{
	change_password,
	get_all_profiles,
	get_current_profile,
};
use crate::controllers::property::{
	create_property,
	get_properties,
	get_property,
	get_property_members,
	invite_property_member,
	respond_property_invitation,
	set_property_active,
	update_property,
};
use crate::controllers::room::{create_room, get_room, get_rooms, update_room};
use crate::controllers::time_allocation::{
	get_time_allocation,
	update_time_allocation,
};
use crate::middleware::AuthLayer;

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest("/auth", auth_routes(&state))
		.nest("/profile", profile_routes(&state))
		.nest("/properties", property_routes(&state))
		.nest("/rooms", room_routes(&state))
		.nest("/bookings", booking_routes(&state));

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(10)))
				.layer(CompressionLayer::new()),
		)
		.with_state(state)
}

/// Authentication routes
fn auth_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/register", post(register))
		.route("/login", post(login))
		.route(
			"/logout",
			post(logout).route_layer(AuthLayer::new(state.clone())),
		)
}

/// Profile routes
fn profile_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/", get(get_all_profiles))
		.route("/me", get(get_current_profile))
		.route("/me/password", put(change_password))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Property routes, including members and time allocations
fn property_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/", get(get_properties).post(create_property))
		.route("/{id}", get(get_property).put(update_property))
		.route("/{id}/active", put(set_property_active))
		.route(
			"/{id}/members",
			get(get_property_members).post(invite_property_member),
		)
		.route("/{id}/members/respond", put(respond_property_invitation))
		.route(
			"/{id}/time-allocation",
			get(get_time_allocation).put(update_time_allocation),
		)
		.route_layer(AuthLayer::new(state.clone()))
}

/// Room routes
fn room_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/", get(get_rooms).post(create_room))
		.route("/{id}", get(get_room).put(update_room))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Booking application routes
fn booking_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/", get(get_bookings).post(create_booking))
		.route("/{id}", get(get_booking))
		.route("/{id}/approve", put(approve_booking))
		.route("/{id}/reject", put(reject_booking))
		.route_layer(AuthLayer::new(state.clone()))
}
