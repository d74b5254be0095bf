#[macro_use]
extern crate tracing;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use deadpool_diesel::postgres::{Object, Pool};

mod config;

pub mod controllers;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod schema;
pub mod schemas;
pub mod session;

pub type DbPool = Pool;
pub type DbConn = Object;

pub use config::Config;
pub use error::Error;
pub use session::{AdminSession, Session};

/// Shared state for the app router
#[derive(Clone, FromRef)]
pub struct AppState {
	pub config:         Config,
	pub database_pool:  DbPool,
	pub cookie_jar_key: Key,
}
