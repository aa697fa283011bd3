//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserError, UserId, UserPatch};

/// Write side of the user API, consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create a user after checking the minimum age.
    async fn create_user(&self, user: NewUser) -> Result<User, UserError>;

    /// Apply a partial update to an existing user.
    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, UserError>;

    /// Remove a user; absent ids are not an error here.
    async fn delete_user(&self, id: UserId) -> Result<(), UserError>;
}
