//! Shared identifier types.

/// Identifier of a review row. Assigned by the database on insert.
pub type ReviewId = i64;
