//! Repository implementations for database access.
//!
//! Each repository wraps a SQLx connection, provides strongly-typed CRUD
//! operations, and returns domain models from [`crate::db::models`]. All
//! repositories implement the [`Repository`] trait.

pub mod repository;
pub mod reviews;

pub use repository::Repository;
pub use reviews::Reviews;
