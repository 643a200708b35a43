use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::SqlitePool;

use crate::error::{ApiError, ApiResult};
use crate::ingredient::Ingredient;
use crate::model::{CartDetails, NewRecipe, RecipeDetails, StoredIngredient};

/// SQLite stores CURRENT_TIMESTAMP in UTC without an offset
fn rfc3339(timestamp: NaiveDateTime) -> String {
    DateTime::<Utc>::from_naive_utc_and_offset(timestamp, Utc).to_rfc3339()
}

/// Insert a recipe with its ingredients and steps in one transaction.
///
/// Every ingredient line is parsed before the database is touched, so an
/// invalid line rejects the whole recipe.
///
/// # Errors
/// `Conflict` when a recipe with the same name exists, `InvalidIngredient`
/// when a line does not parse, `Database` otherwise.
pub async fn insert_recipe(pool: &SqlitePool, new_recipe: &NewRecipe) -> ApiResult<RecipeDetails> {
    let parsed: Vec<Ingredient> = new_recipe
        .ingredients
        .iter()
        .map(|line| Ingredient::parse(line))
        .collect::<Result<_, _>>()?;

    let mut tx = pool.begin().await?;

    let recipe_id: i64 = sqlx::query_scalar("INSERT INTO recipes (name) VALUES ($1) RETURNING id")
        .bind(&new_recipe.name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|error| match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::Conflict(format!("Recipe already exists: {}", new_recipe.name))
            }
            _ => ApiError::Database(error),
        })?;

    let mut ingredients = Vec::with_capacity(parsed.len());
    for ingredient in parsed {
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO ingredients (recipe_id, preposition, name, quantity, unit)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(recipe_id)
        .bind(&ingredient.preposition)
        .bind(&ingredient.name)
        .bind(ingredient.quantity)
        .bind(&ingredient.unit)
        .fetch_one(&mut *tx)
        .await?;

        ingredients.push(StoredIngredient {
            id,
            preposition: ingredient.preposition,
            name: ingredient.name,
            quantity: ingredient.quantity,
            unit: ingredient.unit,
        });
    }

    for step in &new_recipe.steps {
        sqlx::query("INSERT INTO steps (recipe_id, description) VALUES ($1, $2)")
            .bind(recipe_id)
            .bind(step)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(RecipeDetails {
        id: recipe_id,
        name: new_recipe.name.clone(),
        ingredients,
        steps: new_recipe.steps.clone(),
    })
}

async fn fetch_recipe_ingredients(
    pool: &SqlitePool,
    recipe_id: i64,
) -> Result<Vec<StoredIngredient>, sqlx::Error> {
    sqlx::query_as(
        r"
        SELECT id, preposition, name, quantity, unit
        FROM ingredients
        WHERE recipe_id = $1
        ORDER BY id
        ",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await
}

async fn fetch_recipe_steps(
    pool: &SqlitePool,
    recipe_id: i64,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT description FROM steps WHERE recipe_id = $1 ORDER BY id")
        .bind(recipe_id)
        .fetch_all(pool)
        .await
}

/// Fetch one recipe with ingredients and steps hydrated.
///
/// # Errors
/// `NotFound` when no recipe has the given id.
pub async fn fetch_recipe(pool: &SqlitePool, recipe_id: i64) -> ApiResult<RecipeDetails> {
    let name: String = sqlx::query_scalar("SELECT name FROM recipes WHERE id = $1")
        .bind(recipe_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No recipe found with id {recipe_id}")))?;

    let ingredients = fetch_recipe_ingredients(pool, recipe_id).await?;
    let steps = fetch_recipe_steps(pool, recipe_id).await?;

    Ok(RecipeDetails {
        id: recipe_id,
        name,
        ingredients,
        steps,
    })
}

/// Fetch every recipe, hydrated, in insertion order.
pub async fn fetch_all_recipes(pool: &SqlitePool) -> ApiResult<Vec<RecipeDetails>> {
    let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM recipes ORDER BY id")
        .fetch_all(pool)
        .await?;

    let mut recipes = Vec::with_capacity(rows.len());
    for (id, name) in rows {
        recipes.push(RecipeDetails {
            id,
            name,
            ingredients: fetch_recipe_ingredients(pool, id).await?,
            steps: fetch_recipe_steps(pool, id).await?,
        });
    }

    Ok(recipes)
}

/// Create an empty cart.
pub async fn insert_cart(pool: &SqlitePool) -> ApiResult<CartDetails> {
    let (id, created_at): (i64, NaiveDateTime) =
        sqlx::query_as("INSERT INTO carts DEFAULT VALUES RETURNING id, created_at")
            .fetch_one(pool)
            .await?;

    Ok(CartDetails {
        id,
        created_at: rfc3339(created_at),
        recipes: Vec::new(),
    })
}

async fn fetch_cart(pool: &SqlitePool, cart_id: i64) -> ApiResult<NaiveDateTime> {
    sqlx::query_scalar("SELECT created_at FROM carts WHERE id = $1")
        .bind(cart_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No cart found with id {cart_id}")))
}

/// Fetch one cart with its member recipes fully hydrated.
///
/// # Errors
/// `NotFound` when no cart has the given id.
pub async fn fetch_cart_with_recipes(pool: &SqlitePool, cart_id: i64) -> ApiResult<CartDetails> {
    let created_at = fetch_cart(pool, cart_id).await?;

    let recipe_ids: Vec<i64> = sqlx::query_scalar(
        "SELECT recipe_id FROM cart_recipes WHERE cart_id = $1 ORDER BY recipe_id",
    )
    .bind(cart_id)
    .fetch_all(pool)
    .await?;

    let mut recipes = Vec::with_capacity(recipe_ids.len());
    for recipe_id in recipe_ids {
        recipes.push(fetch_recipe(pool, recipe_id).await?);
    }

    Ok(CartDetails {
        id: cart_id,
        created_at: rfc3339(created_at),
        recipes,
    })
}

/// Fetch every cart, newest first, without hydrating member recipes.
pub async fn fetch_all_carts(pool: &SqlitePool) -> ApiResult<Vec<CartDetails>> {
    let rows: Vec<(i64, NaiveDateTime)> =
        sqlx::query_as("SELECT id, created_at FROM carts ORDER BY created_at DESC, id DESC")
            .fetch_all(pool)
            .await?;

    Ok(rows
        .into_iter()
        .map(|(id, created_at)| CartDetails {
            id,
            created_at: rfc3339(created_at),
            recipes: Vec::new(),
        })
        .collect())
}

/// Delete a cart and its recipe associations.
///
/// # Errors
/// `NotFound` when no cart has the given id.
pub async fn delete_cart(pool: &SqlitePool, cart_id: i64) -> ApiResult<()> {
    let deleted = sqlx::query("DELETE FROM carts WHERE id = $1")
        .bind(cart_id)
        .execute(pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(ApiError::NotFound(format!("No cart found with id {cart_id}")));
    }

    Ok(())
}

/// Add a recipe to a cart and return the hydrated cart.
///
/// # Errors
/// `NotFound` naming whichever of the cart or recipe is missing, `Conflict`
/// when the recipe is already in the cart.
pub async fn add_recipe_to_cart(
    pool: &SqlitePool,
    cart_id: i64,
    recipe_id: i64,
) -> ApiResult<CartDetails> {
    let inserted = sqlx::query("INSERT INTO cart_recipes (cart_id, recipe_id) VALUES ($1, $2)")
        .bind(cart_id)
        .bind(recipe_id)
        .execute(pool)
        .await;

    match inserted {
        Ok(_) => {}
        Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
            // The constraint does not say which side is missing
            fetch_cart(pool, cart_id).await?;
            return Err(ApiError::NotFound(format!(
                "No recipe found with id {recipe_id}"
            )));
        }
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            return Err(ApiError::Conflict(format!(
                "Recipe with id {recipe_id} is already in cart with id {cart_id}"
            )));
        }
        Err(error) => return Err(error.into()),
    }

    fetch_cart_with_recipes(pool, cart_id).await
}
