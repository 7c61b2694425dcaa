use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use clinic_core::tracing::init_tracing;
use clinic_migration::{Migrator, MigratorTrait as _};
use clinic_server::config::ClinicConfig;
use clinic_server::router::build_router;
use clinic_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = ClinicConfig::from_env().context("load configuration")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    if config.run_migrations {
        Migrator::up(&db, None).await.context("apply migrations")?;
        info!("database migrations applied");
    }

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
        token_ttl_secs: config.jwt_expires_in_secs,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("bind {http_addr}"))?;

    info!("clinic service listening on {http_addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
