//! Request and response schemas for the HTTP API

pub mod auth;
pub mod booking;
pub mod profile;
pub mod property;
pub mod room;
pub mod time_allocation;
