use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use sqlx::SqlitePool;

use crate::error::ApiResult;
use crate::model::{CartDetails, Data};
use crate::store;

/// Cart endpoints: create, list, fetch one, delete, add recipe
pub fn routes() -> Router<SqlitePool> {
    Router::new()
        .route("/carts", get(retrieve_all).post(create))
        .route("/carts/:cart_id", get(retrieve).delete(delete_cart))
        .route("/carts/:cart_id/recipes/:recipe_id", post(add_recipe))
}

async fn create(
    State(pool): State<SqlitePool>,
) -> ApiResult<(StatusCode, Json<Data<CartDetails>>)> {
    let cart = store::insert_cart(&pool).await?;

    Ok((StatusCode::CREATED, Json(Data { data: cart })))
}

async fn retrieve_all(State(pool): State<SqlitePool>) -> ApiResult<Json<Data<Vec<CartDetails>>>> {
    let carts = store::fetch_all_carts(&pool).await?;

    Ok(Json(Data { data: carts }))
}

async fn retrieve(
    State(pool): State<SqlitePool>,
    Path(cart_id): Path<i64>,
) -> ApiResult<Json<Data<CartDetails>>> {
    let cart = store::fetch_cart_with_recipes(&pool, cart_id).await?;

    Ok(Json(Data { data: cart }))
}

async fn delete_cart(
    State(pool): State<SqlitePool>,
    Path(cart_id): Path<i64>,
) -> ApiResult<StatusCode> {
    store::delete_cart(&pool, cart_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn add_recipe(
    State(pool): State<SqlitePool>,
    Path((cart_id, recipe_id)): Path<(i64, i64)>,
) -> ApiResult<(StatusCode, Json<Data<CartDetails>>)> {
    let cart = store::add_recipe_to_cart(&pool, cart_id, recipe_id).await?;

    Ok((StatusCode::CREATED, Json(Data { data: cart })))
}
