//! Library-wide error types and [`From`] impls

use std::collections::HashMap;
use std::sync::LazyLock;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use diesel::result::DatabaseErrorKind;
use thiserror::Error;

use crate::models::BookingStatus;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Any error related to a booking application
	#[error(transparent)]
	BookingError(#[from] BookingError),
	/// Duplicate resource created
	#[error("{0}")]
	Duplicate(String),
	/// Request/operation forbidden
	#[error("forbidden")]
	Forbidden,
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// Any error related to logging in
	#[error(transparent)]
	LoginError(#[from] LoginError),
	/// Resource not found
	#[error("not found - {0}")]
	NotFound(String),
	/// Invalid or missing session cookie
	#[error(transparent)]
	TokenError(#[from] TokenError),
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// When modifying this function the error code should only ever increase,
	/// an error code should never be reused once its assigned to avoid
	/// unexpectedly breaking the frontend
	fn code(&self) -> i32 {
		match self {
			Self::Duplicate(_) => 1,
			Self::Forbidden => 2,
			Self::InternalServerError => 3,
			Self::NotFound(_) => 4,
			Self::LoginError(e) => {
				match e {
					LoginError::UnknownUsername(_) => 5,
					LoginError::InvalidPassword => 6,
				}
			},
			Self::TokenError(e) => {
				match e {
					TokenError::MissingAccessToken => 7,
					TokenError::InvalidAccessToken => 8,
				}
			},
			Self::ValidationError(_) => 9,
			Self::BookingError(e) => {
				match e {
					BookingError::DateNotInFuture(_) => 10,
					BookingError::SlotTaken => 11,
					BookingError::QuotaExceeded { .. } => 12,
					BookingError::InvalidTransition(_) => 13,
				}
			},
		}
	}

	/// Return additional information about the error
	fn info(&self) -> Option<String> {
		match self {
			Self::Duplicate(m)
			| Self::NotFound(m)
			| Self::LoginError(LoginError::UnknownUsername(m))
			| Self::ValidationError(m) => Some(m.to_owned()),
			Self::BookingError(e) => {
				match e {
					BookingError::DateNotInFuture(date) => {
						Some(serde_json::json!({"date": date}).to_string())
					},
					BookingError::SlotTaken => None,
					BookingError::QuotaExceeded { limit, committed } => Some(
						serde_json::json!({
							"limit": limit,
							"committed": committed,
						})
						.to_string(),
					),
					BookingError::InvalidTransition(status) => {
						Some(serde_json::json!({"status": status}).to_string())
					},
				}
			},
			_ => None,
		}
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		error!("{self:?}");

		let message = self.to_string();

		let data = serde_json::json!({
			"message": message,
			"code": self.code(),
			"info": self.info(),
		});

		let status = match self {
			Self::Duplicate(_) | Self::BookingError(BookingError::SlotTaken) => {
				StatusCode::CONFLICT
			},
			Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
			Self::TokenError(_) => StatusCode::UNAUTHORIZED,
			Self::Forbidden | Self::LoginError(_) => StatusCode::FORBIDDEN,
			Self::BookingError(_) => StatusCode::BAD_REQUEST,
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
		};

		(status, axum::Json(data)).into_response()
	}
}

/// Any error related to logging in
#[derive(Debug, Error)]
pub enum LoginError {
	#[error("no profile with username '{0}' was found")]
	UnknownUsername(String),
	#[error("invalid password")]
	InvalidPassword,
}

/// Any error related to a session cookie
#[derive(Debug, Error)]
pub enum TokenError {
	#[error("missing access token")]
	MissingAccessToken,
	#[error("invalid access token")]
	InvalidAccessToken,
}

/// Any error related to creating or reviewing a booking application
#[derive(Debug, Error)]
pub enum BookingError {
	/// The requested date is today or in the past
	#[error("booking date must be after today")]
	DateNotInFuture(NaiveDate),
	/// An application with pending or approved status already holds the slot
	#[error("this slot is already booked or awaiting approval")]
	SlotTaken,
	/// The booking would push the caller past the weekly allowance
	#[error("weekly time allowance for this property is exhausted")]
	QuotaExceeded { limit: f64, committed: f64 },
	/// The booking already left the pending state
	#[error("only pending bookings can be approved or rejected")]
	InvalidTransition(BookingStatus),
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Error executing some database operation
	#[error("database error -- {0:?}")]
	DatabaseError(diesel::result::Error),
	/// Error interacting with a database connection
	#[error("database interaction error -- {0:?}")]
	DatabaseInteractionError(deadpool_diesel::InteractError),
	/// Error hashing some value
	#[error("hash error -- {0:?}")]
	HashError(argon2::password_hash::Error),
	/// Error acquiring database pool connection
	#[error("database pool error -- {0:?}")]
	PoolError(deadpool_diesel::PoolError),
	/// Error related to `serde_json`
	#[error("serde_json error -- {0:?}")]
	SerdeJsonError(serde_json::Error),
	/// Attempted to extract a session from a request that has not been
	/// authorized
	#[error("attempted to extract session without checking authorization")]
	SessionWithoutAuthError,
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		let errs = err.field_errors();
		let repr = errs
			.values()
			.map(|v| {
				v.iter()
					.map(ToString::to_string)
					.collect::<Vec<String>>()
					.join("\n")
			})
			.collect::<Vec<String>>()
			.join("\n");

		Self::ValidationError(repr)
	}
}

/// Map password hashing errors to application errors
impl From<argon2::password_hash::Error> for Error {
	fn from(err: argon2::password_hash::Error) -> Self {
		match err {
			argon2::password_hash::Error::Password => {
				LoginError::InvalidPassword.into()
			},
			_ => InternalServerError::HashError(err).into(),
		}
	}
}

/// Map database interaction errors to application errors
impl From<deadpool_diesel::InteractError> for Error {
	fn from(value: deadpool_diesel::InteractError) -> Self {
		InternalServerError::DatabaseInteractionError(value).into()
	}
}

/// Map of constraint names to column names.
static CONSTRAINT_TO_COLUMN: LazyLock<HashMap<&str, &str>> =
	LazyLock::new(|| {
		HashMap::from([
			("profile_username_key", "username"),
			("profile_email_key", "email"),
			("property_member_edge_key", "membership"),
			("time_allocation_property_id_key", "time allocation"),
		])
	});

/// Map database result errors to application errors.
impl From<diesel::result::Error> for Error {
	fn from(err: diesel::result::Error) -> Self {
		match &err {
			// No rows returned by query that expected at least one
			diesel::result::Error::NotFound => {
				Self::NotFound("no context provided".to_string())
			},
			// Unique constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::UniqueViolation,
				info,
			) => {
				let constraint_name = info.constraint_name().unwrap_or_default();

				// A violation of the partial slot index means a concurrent
				// create won the slot between our pre-check and the insert;
				// callers see the same error either way
				if constraint_name == "booking_active_slot_key" {
					return BookingError::SlotTaken.into();
				}

				match CONSTRAINT_TO_COLUMN.get(constraint_name) {
					Some(field) => {
						Self::Duplicate(format!("{field} is already in use"))
					},
					None => InternalServerError::DatabaseError(err).into(),
				}
			},
			// Foreign key constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::ForeignKeyViolation,
				info,
			) => Error::ValidationError(info.message().to_string()),
			_ => InternalServerError::DatabaseError(err).into(),
		}
	}
}

impl From<deadpool_diesel::PoolError> for Error {
	fn from(value: deadpool_diesel::PoolError) -> Self {
		InternalServerError::PoolError(value).into()
	}
}
