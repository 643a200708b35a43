use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Schema migrations embedded at compile time
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open a SQLite pool and bring the schema up to date.
///
/// Foreign keys are enforced on every connection; the cart endpoints rely on
/// the constraint violations to tell a missing cart from a missing recipe.
///
/// # Errors
/// Returns `sqlx::Error` when the database cannot be opened or a migration
/// fails.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    MIGRATOR.run(&pool).await?;

    Ok(pool)
}
