//! Backend entry-point: loads settings, prepares the database, and serves the
//! dish administration API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerSettings, create_server};
use sky_backend::inbound::http::health::HealthState;
use sky_backend::outbound::persistence::{DbPool, run_pending_migrations};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("failed to load server settings")?;
    let pool_config = settings.pool_config()?;

    if settings.run_migrations {
        run_pending_migrations(pool_config.database_url().to_owned())
            .await
            .wrap_err("failed to migrate database")?;
    }

    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database pool")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), &settings, pool)
        .wrap_err("failed to start HTTP server")?;
    info!(host = settings.host(), port = settings.port(), "listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome.wrap_err("HTTP server terminated abnormally")
}
