//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! backed by a temporary SQLite store and a mock PokeAPI listing source.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use pokedex_core::{
    testing::MockPokemonSource, Config, DatabaseConfig, PaginationConfig, PokemonRepository,
    PokemonSource, SeedConfig, ServerConfig, SqlitePokemonRepository,
};

/// Re-export fixtures for test convenience
pub use pokedex_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_create() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture.post("/api/v1/pokemon", json!({
///         "no": 25,
///         "name": "Pikachu"
///     })).await;
///
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock listing source - configure what a seed run fetches
    pub source: Arc<MockPokemonSource>,
    /// The store behind the router, for direct inspection
    pub repository: Arc<dyn PokemonRepository>,
    /// Temporary directory for the test database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with the default seed limit.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let repository: Arc<dyn PokemonRepository> = Arc::new(
            SqlitePokemonRepository::new(&db_path).expect("Failed to create pokemon store"),
        );
        Self::build(test_config, repository, temp_dir)
    }

    /// Create a test fixture over a caller-supplied store.
    pub async fn with_repository(repository: Arc<dyn PokemonRepository>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self::build(TestConfig::default(), repository, temp_dir)
    }

    fn build(
        test_config: TestConfig,
        repository: Arc<dyn PokemonRepository>,
        temp_dir: TempDir,
    ) -> Self {
        let db_path = temp_dir.path().join("test.db");

        let source = Arc::new(MockPokemonSource::with_listing(fixtures::starters()));

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            pagination: PaginationConfig {
                default_limit: test_config.default_limit,
            },
            seed: SeedConfig {
                limit: test_config.seed_limit,
                ..Default::default()
            },
        };

        let state = Arc::new(pokedex_server::state::AppState::new(
            config,
            Arc::clone(&repository),
            Arc::clone(&source) as Arc<dyn PokemonSource>,
        ));

        let router = pokedex_server::api::create_router(state);

        Self {
            router,
            source,
            repository,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a PATCH request with JSON body.
    pub async fn patch(&self, path: &str, body: Value) -> TestResponse {
        self.request("PATCH", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await.0
    }

    /// Send a GET request and return the raw body text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let (response, bytes) = self.send(request).await;
        (response.status, String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Create a record through the API and return its body.
    pub async fn create(&self, no: i64, name: &str) -> Value {
        let response = self
            .post(
                "/api/v1/pokemon",
                serde_json::json!({ "no": no, "name": name }),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "create failed: {}",
            response.body
        );
        response.body
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();
        self.send(request).await.0
    }

    async fn send(&self, request: Request<Body>) -> (TestResponse, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        (TestResponse { status, body }, body_bytes.to_vec())
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Page size for list requests without `limit`
    pub default_limit: u32,
    /// Listing size requested by a seed run
    pub seed_limit: u32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            seed_limit: 650,
        }
    }
}

impl TestConfig {
    /// Create config with a custom seed limit.
    pub fn with_seed_limit(seed_limit: u32) -> Self {
        Self {
            seed_limit,
            ..Default::default()
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
