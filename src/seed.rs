use log::info;
use sqlx::SqlitePool;

use crate::error::{ApiError, ApiResult};
use crate::model::NewRecipe;
use crate::store;

/// The built-in demo recipes
fn demo_recipes() -> Vec<NewRecipe> {
    vec![
        NewRecipe {
            name: "Saucisses aux lentilles".to_owned(),
            ingredients: vec![
                "350 g de Lentilles vertes".to_owned(),
                "300 g de saucisses de Montbéliard".to_owned(),
                "200 g de lardons fumés".to_owned(),
                "1 oignon".to_owned(),
                "2 gousse d'ail".to_owned(),
                "2 feuille de laurier".to_owned(),
            ],
            steps: vec![
                "Eplucher et émincer l'oignon. Peler les gousses d'ail.".to_owned(),
                "Dans une cocotte, mettre les lentilles, les saucisses, les lardons, l'oignon éminces, les gousses d'ail et les feuilles de laurier. Ajouter 70 cl d'eau, saler et poivrer.".to_owned(),
                "Faire cuire pendant 40 minutes sur feu moyen à couvert. Servir bien chaud.".to_owned(),
            ],
        },
        NewRecipe {
            name: "Gratin de gnocchi au saumon et épinards".to_owned(),
            ingredients: vec![
                "400g de gnocchi".to_owned(),
                "300g d'épinards surgelés".to_owned(),
                "200g de pavé de saumon".to_owned(),
                "150 g parmesan râpé".to_owned(),
                "0.5litre de lait".to_owned(),
                "30.0 g de farine".to_owned(),
                "30g de beurre".to_owned(),
            ],
            steps: vec![
                "Faire cuire les gnocchi dans une grande casserole d'eau bouillante salée en suivant les indications sur le sachet. ".to_owned(),
                "Dans une casserole, faire cuire les épinards avec un peu de beurre pendant 10 minutes.".to_owned(),
                "Découper les pavés de saumon en dés. Préchauffer le four à 180°C.".to_owned(),
                "Préparer la béchamel en faisant fondre le beurre coupé en dés dans une casserole. Ajouter la farine en remuant. Verser le lait progressivement en continuant de remuer jusqu'à ce que la crème épaississe. Ajouter le parmesan, saler et poivrer.".to_owned(),
                "Déposer les gnocchi égouttés dans le fond d'un plat à gratin. Ajoutez la moitié de la béchamel. Recouvrir de saumon et d'épinards et ajouter le reste de béchamel. Enfourner pour 20 minutes à 180°C. Servir aussitôt.".to_owned(),
            ],
        },
        NewRecipe {
            name: "Tapenade : la meilleure recette".to_owned(),
            ingredients: vec![
                "200g d'olive noir".to_owned(),
                "8 câpres".to_owned(),
                "5filet anchois à l'huile".to_owned(),
                "1 gousse d'ail".to_owned(),
            ],
            steps: vec![
                "Hacher finement la gousse d'ail.".to_owned(),
                "Mettre dans le bol d'un mixeur les filets d'anchois, les câpres, la gousse d'ail hachée, les olives noires et l'huile d'olive et mixer assez fin.".to_owned(),
            ],
        },
    ]
}

/// Insert the demo recipes through the normal creation path.
///
/// A recipe that already exists is logged and skipped; any other failure
/// aborts the run so a broken data set never goes half-in.
///
/// # Errors
/// Propagates the first non-conflict insertion error.
pub async fn run(pool: &SqlitePool) -> ApiResult<()> {
    for recipe in demo_recipes() {
        match store::insert_recipe(pool, &recipe).await {
            Ok(inserted) => info!("Inserted recipe: {}", inserted.name),
            Err(ApiError::Conflict(_)) => info!("Recipe already exists: {}", recipe.name),
            Err(error) => return Err(error),
        }
    }

    Ok(())
}
