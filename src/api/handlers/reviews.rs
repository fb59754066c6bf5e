use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::AppState;
use crate::api::extract::ValidatedJson;
use crate::api::models::reviews::{ReviewCreate, ReviewResponse, ReviewUpdate};
use crate::db::handlers::{Repository, Reviews};
use crate::db::models::reviews::{ReviewCreateDBRequest, ReviewUpdateDBRequest};
use crate::errors::{Error, Result};
use crate::types::ReviewId;

#[utoipa::path(
    get,
    path = "/reviews",
    tag = "reviews",
    summary = "List reviews",
    responses(
        (status = 200, description = "All reviews in insertion order", body = Vec<ReviewResponse>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_reviews(State(state): State<AppState>) -> Result<Json<Vec<ReviewResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Reviews::new(&mut conn);

    let reviews = repo.list().await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/reviews",
    tag = "reviews",
    summary = "Create review",
    request_body = ReviewCreate,
    responses(
        (status = 201, description = "Review created successfully", body = ReviewResponse),
        (status = 422, description = "Invalid request body"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_review(
    State(state): State<AppState>,
    ValidatedJson(create): ValidatedJson<ReviewCreate>,
) -> Result<(StatusCode, Json<ReviewResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Reviews::new(&mut conn);
    let request = ReviewCreateDBRequest::from(create);

    let review = repo.create(&request).await?;
    Ok((StatusCode::CREATED, Json(ReviewResponse::from(review))))
}

#[utoipa::path(
    get,
    path = "/reviews/{id}",
    tag = "reviews",
    summary = "Get review",
    responses(
        (status = 200, description = "Review details", body = ReviewResponse),
        (status = 404, description = "Review not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i64, Path, description = "Review ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_review(State(state): State<AppState>, Path(id): Path<ReviewId>) -> Result<Json<ReviewResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Reviews::new(&mut conn);

    match repo.get_by_id(id).await? {
        Some(review) => Ok(Json(ReviewResponse::from(review))),
        None => Err(Error::NotFound { resource: "Review", id }),
    }
}

#[utoipa::path(
    put,
    path = "/reviews/{id}",
    tag = "reviews",
    summary = "Update review",
    request_body = ReviewUpdate,
    responses(
        (status = 200, description = "Review updated successfully", body = ReviewResponse),
        (status = 404, description = "Review not found"),
        (status = 422, description = "Invalid request body"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i64, Path, description = "Review ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<ReviewId>,
    ValidatedJson(update): ValidatedJson<ReviewUpdate>,
) -> Result<Json<ReviewResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Reviews::new(&mut conn);
    let request = ReviewUpdateDBRequest::from(update);

    match repo.update(id, &request).await? {
        Some(review) => Ok(Json(ReviewResponse::from(review))),
        None => Err(Error::NotFound { resource: "Review", id }),
    }
}

#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    tag = "reviews",
    summary = "Delete review",
    responses(
        (status = 204, description = "Review deleted successfully"),
        (status = 404, description = "Review not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i64, Path, description = "Review ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_review(State(state): State<AppState>, Path(id): Path<ReviewId>) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Reviews::new(&mut conn);

    if repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound { resource: "Review", id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_app;
    use serde_json::json;
    use sqlx::SqlitePool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_and_get_review(pool: SqlitePool) {
        let app = create_test_app(pool).await;

        let response = app
            .post("/reviews")
            .json(&json!({
                "book_title": "Dune",
                "author": "Frank Herbert",
                "rating": 5,
                "review": "A masterpiece"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let created: ReviewResponse = response.json();
        assert_eq!(created.book_title, "Dune");
        assert_eq!(created.author, "Frank Herbert");
        assert_eq!(created.rating, 5);
        assert_eq!(created.review, "A masterpiece");

        let response = app.get(&format!("/reviews/{}", created.id)).await;
        response.assert_status_ok();
        let fetched: ReviewResponse = response.json();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.date_added, created.date_added);

        // date_added is stable across repeated fetches
        let again: ReviewResponse = app.get(&format!("/reviews/{}", created.id)).await.json();
        assert_eq!(again.date_added, created.date_added);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_review_missing_field(pool: SqlitePool) {
        let app = create_test_app(pool).await;

        // No author
        let response = app
            .post("/reviews")
            .json(&json!({
                "book_title": "Dune",
                "rating": 5,
                "review": "A masterpiece"
            }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        // Mistyped rating
        let response = app
            .post("/reviews")
            .json(&json!({
                "book_title": "Dune",
                "author": "Frank Herbert",
                "rating": "five",
                "review": "A masterpiece"
            }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let reviews: Vec<ReviewResponse> = app.get("/reviews").await.json();
        assert!(reviews.is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_review_rating_out_of_range(pool: SqlitePool) {
        let app = create_test_app(pool).await;

        for rating in [0, 6] {
            let response = app
                .post("/reviews")
                .json(&json!({
                    "book_title": "Dune",
                    "author": "Frank Herbert",
                    "rating": rating,
                    "review": "A masterpiece"
                }))
                .await;
            response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_reviews(pool: SqlitePool) {
        let app = create_test_app(pool).await;

        let empty: Vec<ReviewResponse> = app.get("/reviews").await.json();
        assert!(empty.is_empty());

        for (title, rating) in [("Dune", 5), ("Foundation", 4), ("Hyperion", 5)] {
            app.post("/reviews")
                .json(&json!({
                    "book_title": title,
                    "author": "Someone",
                    "rating": rating,
                    "review": "Good"
                }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let reviews: Vec<ReviewResponse> = app.get("/reviews").await.json();
        assert_eq!(reviews.len(), 3);

        // Each record is individually fetchable by its id
        for review in &reviews {
            let fetched: ReviewResponse = app.get(&format!("/reviews/{}", review.id)).await.json();
            assert_eq!(fetched.book_title, review.book_title);
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_review_not_found(pool: SqlitePool) {
        let app = create_test_app(pool).await;

        let response = app.get("/reviews/999").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.text(), "Review not found");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_review(pool: SqlitePool) {
        let app = create_test_app(pool).await;

        let created: ReviewResponse = app
            .post("/reviews")
            .json(&json!({
                "book_title": "Dune",
                "author": "Frank Herbert",
                "rating": 5,
                "review": "Great"
            }))
            .await
            .json();

        let update = json!({
            "book_title": "Dune",
            "author": "Frank Herbert",
            "rating": 4,
            "review": "Still great"
        });

        let response = app.put(&format!("/reviews/{}", created.id)).json(&update).await;
        response.assert_status_ok();
        let updated: ReviewResponse = response.json();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.date_added, created.date_added);
        assert_eq!(updated.rating, 4);
        assert_eq!(updated.review, "Still great");

        // Idempotent: the identical update yields the same stored state
        let twice: ReviewResponse = app.put(&format!("/reviews/{}", created.id)).json(&update).await.json();
        assert_eq!(twice.rating, updated.rating);
        assert_eq!(twice.date_added, updated.date_added);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_review_not_found(pool: SqlitePool) {
        let app = create_test_app(pool).await;

        let created: ReviewResponse = app
            .post("/reviews")
            .json(&json!({
                "book_title": "Dune",
                "author": "Frank Herbert",
                "rating": 5,
                "review": "Great"
            }))
            .await
            .json();

        let response = app
            .put("/reviews/999")
            .json(&json!({
                "book_title": "Ghost",
                "author": "Nobody",
                "rating": 1,
                "review": "Never stored"
            }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.text(), "Review not found");

        // Table contents are unchanged
        let reviews: Vec<ReviewResponse> = app.get("/reviews").await.json();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].book_title, created.book_title);
        assert_eq!(reviews[0].rating, created.rating);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_review(pool: SqlitePool) {
        let app = create_test_app(pool).await;

        let created: ReviewResponse = app
            .post("/reviews")
            .json(&json!({
                "book_title": "Dune",
                "author": "Frank Herbert",
                "rating": 5,
                "review": "Great"
            }))
            .await
            .json();

        let response = app.delete(&format!("/reviews/{}", created.id)).await;
        response.assert_status(StatusCode::NO_CONTENT);
        assert!(response.text().is_empty());

        app.get(&format!("/reviews/{}", created.id))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        // Deleting the same id again is a 404, not a crash
        let response = app.delete(&format!("/reviews/{}", created.id)).await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.text(), "Review not found");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_review_lifecycle(pool: SqlitePool) {
        let app = create_test_app(pool).await;

        let response = app
            .post("/reviews")
            .json(&json!({
                "book_title": "Dune",
                "author": "Herbert",
                "rating": 5,
                "review": "Great"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: ReviewResponse = response.json();
        assert_eq!(created.id, 1);

        let fetched: ReviewResponse = app.get("/reviews/1").await.json();
        assert_eq!(fetched.book_title, "Dune");
        assert_eq!(fetched.author, "Herbert");
        assert_eq!(fetched.rating, 5);

        let updated: ReviewResponse = app
            .put("/reviews/1")
            .json(&json!({
                "book_title": "Dune",
                "author": "Herbert",
                "rating": 4,
                "review": "Still great"
            }))
            .await
            .json();
        assert_eq!(updated.rating, 4);

        app.delete("/reviews/1").await.assert_status(StatusCode::NO_CONTENT);
        app.get("/reviews/1").await.assert_status(StatusCode::NOT_FOUND);
    }
}
