//! Backend entry-point: loads settings, prepares the drawing store and serves
//! the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use drawing_backend::config::ServerSettings;
use drawing_backend::inbound::http::health::HealthState;
use drawing_backend::outbound::persistence::{DbPool, run_pending_migrations};
use server::{ServerConfig, create_server, drain_on_shutdown, shutdown_signal};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    let mut config = ServerConfig::new(settings.bind_addr());
    if let Some(pool_config) = settings.pool_config() {
        // The server still starts; saves report the failure per request.
        if let Err(e) = run_pending_migrations(pool_config.database_url()).await {
            warn!(error = %e, "database migrations did not run");
        }
        config = config.with_db_pool(DbPool::new_lazy(pool_config));
    }

    let (host, port) = settings.bind_addr();
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on_shutdown(
        health_state,
        server.handle(),
        shutdown_signal(),
    ));
    info!(%host, port, "drawing backend listening");
    server.await
}

#[cfg(test)]
mod tests;
