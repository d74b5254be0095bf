use axum_extra::extract::cookie::Key;
use deadpool_diesel::postgres::{Manager, Pool};
use time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
	pub database_url: String,

	pub access_cookie_name:     String,
	pub access_cookie_lifetime: Duration,
	pub cookie_jar_secret:      String,

	pub production: bool,
}

impl Config {
	fn get_env_var(var: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| panic!("{var} must be set"))
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if an environment variable is missing
	#[must_use]
	pub fn from_env() -> Self {
		let database_url = Self::get_env_var("DATABASE_URL");

		let access_cookie_name = Self::get_env_var("ACCESS_COOKIE_NAME");
		let access_cookie_lifetime = Duration::minutes(
			Self::get_env_var("ACCESS_COOKIE_LIFETIME_MINUTES")
				.parse::<i64>()
				.expect("ACCESS_COOKIE_LIFETIME_MINUTES must be an integer"),
		);
		let cookie_jar_secret = Self::get_env_var("COOKIE_JAR_SECRET");

		let production = std::env::var("PRODUCTION")
			.map(|v| v == "true")
			.unwrap_or_default();

		Self {
			database_url,
			access_cookie_name,
			access_cookie_lifetime,
			cookie_jar_secret,
			production,
		}
	}

	/// Create a database pool for the given config
	///
	/// # Panics
	/// Panics if creating the pool fails
	#[must_use]
	pub fn create_database_pool(&self) -> Pool {
		let manager = Manager::new(
			self.database_url.to_string(),
			deadpool_diesel::Runtime::Tokio1,
		);

		Pool::builder(manager).build().unwrap()
	}

	/// Derive the private cookie jar key from the configured secret
	///
	/// # Panics
	/// Panics if the secret is shorter than 64 bytes
	#[must_use]
	pub fn create_cookie_jar_key(&self) -> Key {
		Key::from(self.cookie_jar_secret.as_bytes())
	}
}
