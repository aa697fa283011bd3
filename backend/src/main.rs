//! Service entry point: loads settings, prepares storage and runs the server.

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use user_api::inbound::http::health::HealthState;
use user_api::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use user_api::settings::{ServerSettings, StorageBackend};

use server::{ServerConfig, create_server, drain_on, shutdown_signal};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

async fn attach_storage(
    settings: &ServerSettings,
    config: ServerConfig,
) -> io::Result<ServerConfig> {
    let backend = settings.storage().map_err(io::Error::other)?;
    info!(storage = %backend, "storage backend configured");
    match backend {
        StorageBackend::Memory => Ok(config),
        StorageBackend::Postgres => {
            let url = settings.database_url().map_err(io::Error::other)?;
            run_pending_migrations(&url)
                .await
                .map_err(io::Error::other)?;
            let pool_config = PoolConfig::new(url).with_max_size(settings.pool_max_size());
            let pool = DbPool::new(pool_config).await.map_err(io::Error::other)?;
            Ok(config.with_db_pool(pool))
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| io::Error::other(format!("failed to load configuration: {err}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let config = ServerConfig::new(bind_addr).with_demo_users(settings.seed_demo_users);
    let config = attach_storage(&settings, config).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state, server.handle()));
    info!(%bind_addr, "user API listening");
    server.await
}
