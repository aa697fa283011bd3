//! Driving port for read-only user use cases.

use async_trait::async_trait;

use crate::domain::{User, UserError, UserId};

/// Read side of the user API, consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// All users in insertion order.
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// A single user, or [`UserError::NotFound`].
    async fn get_user(&self, id: UserId) -> Result<User, UserError>;

    /// A user by exact name, or [`UserError::NotFound`].
    async fn get_user_by_name(&self, name: &str) -> Result<User, UserError>;
}
