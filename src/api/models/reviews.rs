//! API request/response models for book reviews.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::db::models::reviews::Review;
use crate::types::ReviewId;

/// Request body for creating a new review.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReviewCreate {
    /// Title of the reviewed book
    #[schema(example = "Dune")]
    pub book_title: String,
    /// Author of the reviewed book
    #[schema(example = "Frank Herbert")]
    pub author: String,
    /// Star rating from 1 to 5
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub rating: i32,
    /// Free-text review body
    #[schema(example = "A masterpiece of world-building")]
    pub review: String,
}

/// Request body for updating an existing review. All four client-settable
/// fields are replaced; `id` and `date_added` are preserved.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReviewUpdate {
    /// New title of the reviewed book
    #[schema(example = "Dune")]
    pub book_title: String,
    /// New author of the reviewed book
    #[schema(example = "Frank Herbert")]
    pub author: String,
    /// New star rating from 1 to 5
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    #[schema(example = 4, minimum = 1, maximum = 5)]
    pub rating: i32,
    /// New free-text review body
    #[schema(example = "Still great on a second read")]
    pub review: String,
}

/// Full review details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    /// Unique identifier for the review
    pub id: ReviewId,
    /// Title of the reviewed book
    pub book_title: String,
    /// Author of the reviewed book
    pub author: String,
    /// Star rating from 1 to 5
    pub rating: i32,
    /// Free-text review body
    pub review: String,
    /// When the review was created
    pub date_added: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(db: Review) -> Self {
        Self {
            id: db.id,
            book_title: db.book_title,
            author: db.author,
            rating: db.rating,
            review: db.review,
            date_added: db.date_added,
        }
    }
}
