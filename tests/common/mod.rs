use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rollcall::router::init_router;
use rollcall::state::AppState;
use rollcall_cli::{SeedOptions, seed_sample_data};
use rollcall_config::{CorsConfig, JwtConfig};
use rollcall_db::{MemoryStore, Store};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const PASSWORD: &str = "password123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        access_token_expiry: None,
    }
}

pub struct TestApp {
    pub router: Router,
    #[allow(dead_code)]
    pub store: Arc<dyn Store>,
}

/// Router over a `MemoryStore` seeded with the sample teachers and classes.
pub async fn setup_test_app() -> TestApp {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    seed_sample_data(store.as_ref(), SeedOptions { password_cost: 4 })
        .await
        .unwrap();

    let state = AppState::new(
        store.clone(),
        test_jwt_config(),
        CorsConfig {
            allowed_origins: vec!["*".to_string()],
        },
    );

    TestApp {
        router: init_router(state),
        store,
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, body)
}

pub fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Logs in and returns the access token.
pub async fn login(router: &Router, username: &str) -> String {
    let (status, body) = send(
        router,
        post_json(
            "/api/auth/login",
            None,
            &json!({"username": username, "password": PASSWORD}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["access_token"].as_str().unwrap().to_string()
}

/// Id of the first class (by name) owned by the token's teacher.
#[allow(dead_code)]
pub async fn first_class_id(router: &Router, token: &str) -> String {
    let (status, body) = send(router, get("/api/classes", token)).await;
    assert_eq!(status, StatusCode::OK);
    body[0]["id"].as_str().unwrap().to_string()
}
