//! HTTP request handlers for all API endpoints.
//!
//! Each handler is responsible for:
//! - Request validation and deserialization
//! - Business logic execution via database repositories
//! - Response serialization and status mapping
//!
//! Handlers return [`crate::errors::Error`] which converts to the
//! appropriate HTTP status code and message.

pub mod reviews;
