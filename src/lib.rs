pub mod config;
pub mod db;
pub mod error;
pub mod ingredient;
pub mod model;
pub mod routes;
pub mod seed;
pub mod store;

use axum::Router;
use sqlx::SqlitePool;

pub use crate::error::{ApiError, ApiResult};
pub use crate::ingredient::{Ingredient, ParseError};

/// Assemble the full application router over a connected pool
pub fn app(pool: SqlitePool) -> Router {
    Router::new()
        .merge(routes::recipes::routes())
        .merge(routes::carts::routes())
        .with_state(pool)
}
