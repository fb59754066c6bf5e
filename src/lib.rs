//! # reviewd: a book review service
//!
//! `reviewd` is a small self-hostable service for keeping book reviews. It
//! exposes a JSON HTTP API for creating, reading, updating, and deleting
//! review records (book title, author, star rating, free-text review, and a
//! creation timestamp) backed by a SQLite database.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and uses SQLx over SQLite for persistence. It is organized
//! in two layers:
//!
//! The **API layer** ([`api`]) exposes RESTful CRUD routes under `/reviews`.
//! Handlers deserialize and validate request bodies into typed input structs,
//! delegate to the database layer, and map results and absence onto HTTP
//! status codes. Every endpoint is documented with OpenAPI annotations;
//! interactive docs are served at `/docs`.
//!
//! The **database layer** ([`db`]) uses the repository pattern: the
//! [`db::handlers::Reviews`] repository owns every statement issued against
//! the `reviews` table. Each request acquires one pooled connection, performs
//! exactly one repository call, and releases the connection on every exit
//! path. Cross-request consistency (atomic id assignment, no lost updates
//! within a statement) is delegated to SQLite's own transaction semantics.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use reviewd::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = reviewd::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     reviewd::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! The service runs its schema migrations on startup; the SQLite database
//! file is created on first start. See the [`config`] module for
//! configuration options.

pub mod api;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
mod types;

#[cfg(test)]
pub mod test_utils;

use std::str::FromStr;
use std::time::Duration;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{delete, get, post, put};
pub use config::Config;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::openapi::ApiDoc;
pub use types::ReviewId;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
}

/// Get the reviewd database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Open the connection pool described by the configuration. The database
/// file is created if it does not exist yet.
async fn setup_database(config: &Config) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database.url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.pool.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.pool.acquire_timeout_secs))
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    if config.cors.allowed_origins.iter().any(|origin| origin == "*") {
        return Ok(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));
    }

    let mut origins = Vec::new();
    for origin in &config.cors.allowed_origins {
        origins.push(origin.parse::<HeaderValue>()?);
    }

    Ok(CorsLayer::new().allow_origin(origins).allow_methods(Any).allow_headers(Any))
}

/// Build the application router with all endpoints and middleware.
///
/// - Review CRUD routes at `/reviews`
/// - Liveness probe at `/healthz`
/// - Interactive OpenAPI docs at `/docs`
/// - CORS configuration and tracing middleware
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors_layer = create_cors_layer(&state.config)?;

    let api_routes = Router::new()
        .route("/reviews", get(api::handlers::reviews::list_reviews))
        .route("/reviews", post(api::handlers::reviews::create_review))
        .route("/reviews/{id}", get(api::handlers::reviews::get_review))
        .route("/reviews/{id}", put(api::handlers::reviews::update_review))
        .route("/reviews/{id}", delete(api::handlers::reviews::delete_review))
        .with_state(state);

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .merge(api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .layer(cors_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// 1. **Create**: [`Application::new`] opens the database pool and runs
///    migrations
/// 2. **Serve**: [`Application::serve`] binds a TCP port and handles requests
/// 3. **Shutdown**: on the shutdown signal, drains in-flight requests and
///    closes the pool
pub struct Application {
    router: Router,
    config: Config,
    pool: SqlitePool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        Self::new_with_pool(config, None).await
    }

    /// Create an application over an existing pool (used by tests); opens a
    /// new pool from the configuration when none is given.
    pub async fn new_with_pool(config: Config, pool: Option<SqlitePool>) -> anyhow::Result<Self> {
        debug!("Starting review service with configuration: {:#?}", config);

        let pool = match pool {
            Some(pool) => pool,
            None => setup_database(&config).await?,
        };

        // Explicit, idempotent schema migration before any request is served
        migrator().run(&pool).await?;

        let state = AppState {
            db: pool.clone(),
            config: config.clone(),
        };
        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Review service listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        // Run the server with graceful shutdown
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        // Close database connections
        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::test_utils::create_test_app;
    use sqlx::SqlitePool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_healthz(pool: SqlitePool) {
        let app = create_test_app(pool).await;

        let response = app.get("/healthz").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "OK");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_openapi_docs_served(pool: SqlitePool) {
        let app = create_test_app(pool).await;

        app.get("/docs").await.assert_status_ok();
    }
}
