use log::info;

use recipe_cart::config::AppConfig;
use recipe_cart::{app, db};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = AppConfig::load()?;

    let pool = db::connect(&config.database_url).await?;

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app(pool))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        log::error!("Failed to install Ctrl-C handler");
    }
}
