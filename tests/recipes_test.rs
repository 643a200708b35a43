use axum::http::StatusCode;
use serde_json::json;

use recipe_cart::app;
use recipe_cart::error::{Errors, HttpError};
use recipe_cart::model::{Data, RecipeDetails};

mod common;
use common::{get, post_json, test_pool};

#[tokio::test]
async fn create_and_retrieve_recipe() {
    let app = app(test_pool().await);

    let created = post_json(
        app.clone(),
        "/recipes",
        json!({
            "name": "Saumon fumé à la poele",
            "ingredients": ["125 g de saumon fumé"],
            "steps": ["Mettre le saumon dans la poele. Cuire à feu doux pendant 10 minutes."]
        }),
    )
    .await;

    assert_eq!(created.status, StatusCode::CREATED);

    let recipe = created.json::<Data<RecipeDetails>>().data;

    assert_eq!(recipe.name, "Saumon fumé à la poele");
    assert_eq!(recipe.ingredients.len(), 1);
    assert_eq!(recipe.ingredients[0].preposition, "de ");
    assert_eq!(recipe.ingredients[0].name, "saumon fumé");
    assert!((recipe.ingredients[0].quantity - 125.0).abs() < 0.0001);
    assert_eq!(recipe.ingredients[0].unit, "g");
    assert_eq!(
        recipe.steps,
        vec!["Mettre le saumon dans la poele. Cuire à feu doux pendant 10 minutes."]
    );

    let retrieved = get(app, &format!("/recipes/{}", recipe.id)).await;

    assert_eq!(retrieved.status, StatusCode::OK);
    assert_eq!(retrieved.json::<Data<RecipeDetails>>().data, recipe);
}

#[tokio::test]
async fn recipe_not_found() {
    let app = app(test_pool().await);

    let response = get(app, "/recipes/1").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Errors>(),
        Errors {
            errors: vec![HttpError {
                status_code: 404,
                message: "No recipe found with id 1".to_owned(),
            }]
        }
    );
}

#[tokio::test]
async fn duplicate_recipe_name_is_a_conflict() {
    let app = app(test_pool().await);
    let body = json!({"name": "Recette", "ingredients": [], "steps": []});

    let first = post_json(app.clone(), "/recipes", body.clone()).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = post_json(app, "/recipes", body).await;

    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(
        second.json::<Errors>(),
        Errors {
            errors: vec![HttpError {
                status_code: 409,
                message: "Recipe already exists: Recette".to_owned(),
            }]
        }
    );
}

#[tokio::test]
async fn unparseable_ingredient_rejects_the_whole_recipe() {
    let app = app(test_pool().await);

    let response = post_json(
        app.clone(),
        "/recipes",
        json!({
            "name": "Ratée",
            "ingredients": ["125 g de saumon fumé", "sel"],
            "steps": []
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let errors = response.json::<Errors>();
    assert_eq!(errors.errors[0].status_code, 400);
    assert!(errors.errors[0].message.contains("sel"));

    // Nothing was stored
    let listed = get(app, "/recipes").await;
    assert_eq!(listed.status, StatusCode::OK);
    assert!(listed.json::<Data<Vec<RecipeDetails>>>().data.is_empty());
}

#[tokio::test]
async fn list_recipes_in_insertion_order() {
    let app = app(test_pool().await);

    for name in ["Recette 1", "Recette 2"] {
        let created = post_json(
            app.clone(),
            "/recipes",
            json!({"name": name, "ingredients": ["1 oignon"], "steps": []}),
        )
        .await;
        assert_eq!(created.status, StatusCode::CREATED);
    }

    let listed = get(app, "/recipes").await;

    assert_eq!(listed.status, StatusCode::OK);

    let recipes = listed.json::<Data<Vec<RecipeDetails>>>().data;
    let names: Vec<&str> = recipes.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Recette 1", "Recette 2"]);

    // Bare count: no unit, no preposition
    assert_eq!(recipes[0].ingredients[0].unit, "");
    assert_eq!(recipes[0].ingredients[0].preposition, "");
    assert_eq!(recipes[0].ingredients[0].name, "oignon");
}
