use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use sqlx::SqlitePool;

use crate::error::ApiResult;
use crate::model::{Data, NewRecipe, RecipeDetails};
use crate::store;

/// Recipe endpoints: create, list, fetch one
pub fn routes() -> Router<SqlitePool> {
    Router::new()
        .route("/recipes", get(retrieve_all).post(create))
        .route("/recipes/:recipe_id", get(retrieve))
}

async fn create(
    State(pool): State<SqlitePool>,
    Json(new_recipe): Json<NewRecipe>,
) -> ApiResult<(StatusCode, Json<Data<RecipeDetails>>)> {
    let recipe = store::insert_recipe(&pool, &new_recipe).await?;

    Ok((StatusCode::CREATED, Json(Data { data: recipe })))
}

async fn retrieve_all(
    State(pool): State<SqlitePool>,
) -> ApiResult<Json<Data<Vec<RecipeDetails>>>> {
    let recipes = store::fetch_all_recipes(&pool).await?;

    Ok(Json(Data { data: recipes }))
}

async fn retrieve(
    State(pool): State<SqlitePool>,
    Path(recipe_id): Path<i64>,
) -> ApiResult<Json<Data<RecipeDetails>>> {
    let recipe = store::fetch_recipe(&pool, recipe_id).await?;

    Ok(Json(Data { data: recipe }))
}
