//! Driven port for user storage adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserChanges, UserId, UserLookup};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// No live record matches the lookup.
        NotFound { lookup: UserLookup } => "no user with {lookup}",
        /// The write clashes with a uniqueness constraint.
        Duplicate { message: String } => "user record conflicts with existing data: {message}",
        /// The backing store could not be reached.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Storage contract shared by the in-memory and PostgreSQL adapters.
///
/// Implementations apply no business rules; age checks live in the service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every live record in insertion order.
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<User, UserRepositoryError>;

    /// Fetch the first user whose name matches exactly.
    async fn find_by_name(&self, name: &str) -> Result<User, UserRepositoryError>;

    /// Store a new record under a freshly assigned identifier.
    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Overwrite name and age of an existing record.
    async fn update(&self, id: UserId, changes: &UserChanges)
    -> Result<User, UserRepositoryError>;

    /// Remove a record. Removing an absent id succeeds.
    async fn delete(&self, id: UserId) -> Result<(), UserRepositoryError>;
}
