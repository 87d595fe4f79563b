#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use bloom_api::config::ServerConfig;
use bloom_api::router::build_app_router;
use bloom_api::state::AppState;
use bloom_core::types::Price;
use bloom_db::models::product::{CreateProduct, ProductRow};
use bloom_db::repositories::ProductRepo;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        media_root: "media".to_string(),
        db_max_connections: 5,
    }
}

/// Build the full application router, with the production middleware stack,
/// over the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a GET request to the router.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as UTF-8 text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Insert a product with the given core fields.
pub async fn insert_product(
    pool: &PgPool,
    name: &str,
    price: &str,
    category: &str,
    quantity_sold: i32,
    available_quantity: i32,
) -> ProductRow {
    let input = CreateProduct {
        name: name.to_string(),
        price: Price::from_str(price).unwrap(),
        category: category.to_string(),
        created_at: None,
        quantity_sold: Some(quantity_sold),
        available_quantity: Some(available_quantity),
        description: None,
        image: None,
    };
    ProductRepo::create(pool, &input).await.unwrap()
}
