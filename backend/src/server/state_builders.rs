//! Selection of the repository adapter behind the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use user_api::domain::ports::UserRepository;
use user_api::inbound::http::state::HttpState;
use user_api::outbound::persistence::{DieselUserRepository, InMemoryUserRepository};

use super::ServerConfig;

fn build_repository(config: &ServerConfig) -> std::io::Result<Arc<dyn UserRepository>> {
    match &config.db_pool {
        Some(pool) => {
            if config.seed_demo_users {
                warn!("demo users are only seeded into in-memory storage; ignoring");
            }
            info!(storage = "postgres", "user repository selected");
            Ok(Arc::new(DieselUserRepository::new(pool.clone())))
        }
        None if config.seed_demo_users => {
            info!(storage = "memory", seeded = true, "user repository selected");
            let repo = InMemoryUserRepository::demo().map_err(std::io::Error::other)?;
            Ok(Arc::new(repo))
        }
        None => {
            info!(storage = "memory", seeded = false, "user repository selected");
            Ok(Arc::new(InMemoryUserRepository::new()))
        }
    }
}

/// Build the shared handler state for `config`.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let repository = build_repository(config)?;
    Ok(web::Data::new(HttpState::from_repository(repository)))
}
