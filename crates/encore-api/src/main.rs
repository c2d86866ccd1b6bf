use std::sync::Arc;

use encore_api::{setup, AppState};
use encore_core::ApiConfig;
use encore_db::PgUploadLogRepository;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "encore=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::from_env()?;
    config.validate()?;

    let pool = setup::database::setup_database(&config).await?;
    let store = Arc::new(PgUploadLogRepository::new(pool.clone()));
    let state = Arc::new(AppState::new(pool, store));

    let router = setup::routes::build_router(&config, state)?;
    setup::server::start_server(&config, router).await?;

    Ok(())
}
