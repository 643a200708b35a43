// Not every test binary uses every helper
#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde::de::DeserializeOwned;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower::ServiceExt;

use recipe_cart::db::MIGRATOR;

/// Fresh in-memory database with the schema applied.
///
/// A single connection keeps every query on the same in-memory instance.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("in-memory pool");

    MIGRATOR.run(&pool).await.expect("migrations");

    pool
}

/// Response captured with its body read eagerly
pub struct TestResponse {
    pub status: StatusCode,
    body: Vec<u8>,
}

impl TestResponse {
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("JSON response body")
    }
}

async fn request(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);

    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).expect("request body"))
        }
        None => Body::empty(),
    };

    let response = app
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body")
        .to_vec();

    TestResponse { status, body }
}

pub async fn get(app: Router, uri: &str) -> TestResponse {
    request(app, Method::GET, uri, None).await
}

pub async fn post(app: Router, uri: &str) -> TestResponse {
    request(app, Method::POST, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> TestResponse {
    request(app, Method::POST, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> TestResponse {
    request(app, Method::DELETE, uri, None).await
}
