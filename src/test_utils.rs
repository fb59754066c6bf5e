//! Test utilities for integration testing.

use axum_test::TestServer;
use sqlx::SqlitePool;

use crate::config::Config;

/// Build a test server over the full application stack, backed by the given
/// per-test database pool.
pub async fn create_test_app(pool: SqlitePool) -> TestServer {
    let config = create_test_config();

    let app = crate::Application::new_with_pool(config, Some(pool))
        .await
        .expect("Failed to create application");

    app.into_test_server()
}

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..Default::default()
    }
}
