//! Storage adapters implementing [`crate::domain::ports::UserRepository`].
//!
//! - [`InMemoryUserRepository`]: a mutex-guarded vector for single-process use.
//! - [`DieselUserRepository`]: PostgreSQL through `diesel-async` and a `bb8`
//!   pool, with embedded migrations.
//!
//! Row structs and the table definition stay private; only domain types cross
//! the boundary.
//!
//! # Example
//!
//! ```no_run
//! use user_api::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let repo = DieselUserRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_user_repository;
mod in_memory_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_POOL_MAX_SIZE, DbPool, PoolConfig, PoolError};
