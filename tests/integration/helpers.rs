//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use bazaar_api::AppState;
use bazaar_auth::{AccessGuard, PasswordHasher, PasswordValidator, TokenAuthority};
use bazaar_core::config::AppConfig;
use bazaar_core::config::app::ServerConfig;
use bazaar_core::config::auth::AuthConfig;
use bazaar_core::config::database::DatabaseConfig;
use bazaar_core::config::logging::LoggingConfig;
use bazaar_database::{MemoryAccountStore, MemoryListingStore};
use bazaar_service::{AccountDirectory, ListingEngine};

pub const PASSWORD: &str = "Passw0rd!";

/// Full router over in-memory stores.
pub struct TestApp {
    pub router: Router,
    pub accounts: MemoryAccountStore,
    pub listings: MemoryListingStore,
    pub tokens: Arc<TokenAuthority>,
}

impl TestApp {
    pub fn new() -> Self {
        let config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://unused".to_string(),
                max_connections: 1,
                min_connections: 0,
                connect_timeout_seconds: 1,
                idle_timeout_seconds: 1,
                run_migrations: false,
            },
            auth: AuthConfig {
                jwt_secret: "integration-test-secret".to_string(),
                argon2_memory_kib: 1024,
                argon2_iterations: 1,
                ..AuthConfig::default()
            },
            logging: LoggingConfig::default(),
        };

        let accounts = MemoryAccountStore::new();
        let listings = MemoryListingStore::new();
        let tokens = Arc::new(TokenAuthority::new(&config.auth));
        let directory = Arc::new(AccountDirectory::new(
            Arc::new(accounts.clone()),
            Arc::new(PasswordHasher::new(&config.auth).expect("argon2 params")),
            Arc::new(PasswordValidator::new()),
            tokens.clone(),
        ));
        let engine = Arc::new(ListingEngine::new(
            Arc::new(listings.clone()),
            directory.clone(),
        ));

        let state = AppState {
            config: Arc::new(config),
            db: None,
            guard: Arc::new(AccessGuard::new(tokens.clone())),
            directory,
            listings: engine,
        };

        Self {
            router: bazaar_api::build_app(state),
            accounts,
            listings,
            tokens,
        }
    }

    /// Registers `handle` and returns its account ID and token.
    pub async fn register(&self, handle: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/api/accounts/register",
                Some(json!({ "handle": handle, "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

        let data = &response.body["data"];
        (
            data["account"]["id"].as_str().expect("account id").to_string(),
            data["token"].as_str().expect("token").to_string(),
        )
    }

    /// Creates a listing and returns its `data` object.
    pub async fn create_listing(&self, token: &str, title: &str, price: f64) -> Value {
        let response = self
            .request(
                "POST",
                "/api/listings",
                Some(json!({
                    "title": title,
                    "body": format!("{title} in good condition"),
                    "image_url": "http://x.test/a.jpg",
                    "price": price,
                })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"].clone()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        self.send(req.body(Body::from(body_str)).expect("Failed to build request"))
            .await
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    /// Parsed JSON body, `Null` when empty.
    pub body: Value,
}
