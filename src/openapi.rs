//! OpenAPI documentation configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "reviewd",
        description = "A self-hostable book review service with a JSON HTTP API"
    ),
    paths(
        crate::api::handlers::reviews::list_reviews,
        crate::api::handlers::reviews::create_review,
        crate::api::handlers::reviews::get_review,
        crate::api::handlers::reviews::update_review,
        crate::api::handlers::reviews::delete_review,
    ),
    components(schemas(
        crate::api::models::reviews::ReviewCreate,
        crate::api::models::reviews::ReviewUpdate,
        crate::api::models::reviews::ReviewResponse,
    )),
    tags(
        (name = "reviews", description = "Book review management")
    )
)]
pub struct ApiDoc;
