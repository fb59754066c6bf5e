//! Database repository for book review records.

use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::instrument;

use crate::db::errors::Result;
use crate::db::handlers::repository::Repository;
use crate::db::models::reviews::{Review, ReviewCreateDBRequest, ReviewUpdateDBRequest};
use crate::types::ReviewId;

/// Repository for review operations.
///
/// Every method is a single statement against the `reviews` table, so each
/// call is atomic under SQLite's per-statement transaction.
pub struct Reviews<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Reviews<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl Repository for Reviews<'_> {
    type CreateRequest = ReviewCreateDBRequest;
    type UpdateRequest = ReviewUpdateDBRequest;
    type Response = Review;
    type Id = ReviewId;

    /// Insert a new review. `id` comes from the table's autoincrement key and
    /// `date_added` from the application clock at call time.
    #[instrument(skip(self, request), err)]
    async fn create(&mut self, request: &ReviewCreateDBRequest) -> Result<Review> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (book_title, author, rating, review, date_added)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&request.book_title)
        .bind(&request.author)
        .bind(request.rating)
        .bind(&request.review)
        .bind(Utc::now())
        .fetch_one(&mut *self.db)
        .await?;

        Ok(review)
    }

    /// Get a review by ID. Absence is a normal outcome, not an error.
    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: ReviewId) -> Result<Option<Review>> {
        let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(review)
    }

    /// List all reviews in insertion order.
    #[instrument(skip(self), err)]
    async fn list(&mut self) -> Result<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>("SELECT * FROM reviews ORDER BY id")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(reviews)
    }

    /// Overwrite the four client-settable fields of a review. `id` and
    /// `date_added` are left untouched. Applying the same update twice yields
    /// the same stored state.
    #[instrument(skip(self, request), err)]
    async fn update(&mut self, id: ReviewId, request: &ReviewUpdateDBRequest) -> Result<Option<Review>> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
            SET book_title = ?, author = ?, rating = ?, review = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&request.book_title)
        .bind(&request.author)
        .bind(request.rating)
        .bind(&request.review)
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(review)
    }

    /// Delete a review by ID.
    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: ReviewId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
