//! Database models for book reviews.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::api::models::reviews::{ReviewCreate, ReviewUpdate};
use crate::types::ReviewId;

/// Database row for a book review.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Review {
    pub id: ReviewId,
    pub book_title: String,
    pub author: String,
    pub rating: i32,
    pub review: String,
    pub date_added: DateTime<Utc>,
}

/// Request to insert a new review. `id` and `date_added` are assigned by the
/// repository at insert time.
#[derive(Debug, Clone)]
pub struct ReviewCreateDBRequest {
    pub book_title: String,
    pub author: String,
    pub rating: i32,
    pub review: String,
}

impl From<ReviewCreate> for ReviewCreateDBRequest {
    fn from(create: ReviewCreate) -> Self {
        Self {
            book_title: create.book_title,
            author: create.author,
            rating: create.rating,
            review: create.review,
        }
    }
}

/// Request to overwrite the client-settable fields of an existing review.
/// All four fields are replaced; identity and creation time are preserved.
#[derive(Debug, Clone)]
pub struct ReviewUpdateDBRequest {
    pub book_title: String,
    pub author: String,
    pub rating: i32,
    pub review: String,
}

impl From<ReviewUpdate> for ReviewUpdateDBRequest {
    fn from(update: ReviewUpdate) -> Self {
        Self {
            book_title: update.book_title,
            author: update.author,
            rating: update.rating,
            review: update.review,
        }
    }
}
