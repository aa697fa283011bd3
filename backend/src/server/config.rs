//! HTTP server configuration object.

use std::net::SocketAddr;

use user_api::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) seed_demo_users: bool,
}

impl ServerConfig {
    /// In-memory storage, no demo data.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            seed_demo_users: false,
        }
    }

    /// Back the user repository with PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Seed the in-memory store with demo users. Ignored with a pool.
    #[must_use]
    pub fn with_demo_users(mut self, seed: bool) -> Self {
        self.seed_demo_users = seed;
        self
    }
}
