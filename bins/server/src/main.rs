//! Fiscora API Server
//!
//! Serves the job trigger, import and fiscal calendar routes.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fiscora_api::{AppState, create_router};
use fiscora_db::connect;
use fiscora_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fiscora_api=debug,fiscora_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    let db = connect(&config.database).await?;
    info!("Connected to database");

    info!(
        start_month = config.fiscal.start_month,
        actual = %config.fiscal.actual_scenario,
        forecast = %config.fiscal.forecast_scenario,
        cutoff_rule = ?config.fiscal.cutoff_rule,
        "Fiscal settings loaded"
    );
    let state = AppState::new(db, config.fiscal)?;
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
