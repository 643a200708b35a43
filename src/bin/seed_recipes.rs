use recipe_cart::config::AppConfig;
use recipe_cart::{db, seed};

/// One-shot demo-data seeder. Exits non-zero on the first failure that is not
/// an already-seeded recipe.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = AppConfig::load()?;

    let pool = db::connect(&config.database_url).await?;

    seed::run(&pool).await?;

    Ok(())
}
