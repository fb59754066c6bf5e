//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for the review endpoints
//! - **[`models`]**: Request/response data structures for API communication
//! - **[`extract`]**: The validating JSON extractor used by mutating handlers
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`;
//! interactive documentation is served at `/docs` when the server is running.

pub mod extract;
pub mod handlers;
pub mod models;
