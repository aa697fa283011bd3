//! User service implementing the driving ports.
//!
//! The only business rule is the minimum age. Creation rejects younger users;
//! updates keep the stored age instead. Everything else is delegated
//! to the repository, with storage-level "not found" lifted into
//! [`UserError::NotFound`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{UserRepository, UserRepositoryError, UsersCommand, UsersQuery};
use crate::domain::{MIN_AGE, NewUser, User, UserError, UserId, UserPatch};

/// Service backing both [`UsersQuery`] and [`UsersCommand`].
pub struct UserService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ?Sized> UserService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn lift(error: UserRepositoryError) -> UserError {
    match error {
        UserRepositoryError::NotFound { lookup } => UserError::NotFound { lookup },
        other => UserError::Persistence(other),
    }
}

fn ensure_min_age(age: u32) -> Result<(), UserError> {
    if age < MIN_AGE {
        return Err(UserError::InvalidAge { age: age.into() });
    }
    Ok(())
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list().await.map_err(lift)
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.repository.find_by_id(id).await.map_err(lift)
    }

    async fn get_user_by_name(&self, name: &str) -> Result<User, UserError> {
        self.repository.find_by_name(name).await.map_err(lift)
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn create_user(&self, user: NewUser) -> Result<User, UserError> {
        if let Err(err) = ensure_min_age(user.age()) {
            debug!(age = user.age(), "rejected user below minimum age");
            return Err(err);
        }
        let created = self.repository.create(&user).await.map_err(lift)?;
        info!(user_id = %created.id(), "user created");
        Ok(created)
    }

    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, UserError> {
        let current = self.repository.find_by_id(id).await.map_err(lift)?;
        if patch.age.is_some() && patch.accepted_age().is_none() {
            debug!(user_id = %id, age = ?patch.age, "ignoring age below minimum");
        }
        if patch.is_empty() {
            debug!(user_id = %id, "empty patch; returning current record");
            return Ok(current);
        }
        let changes = patch.merge_onto(&current);
        let updated = self
            .repository
            .update(id, &changes)
            .await
            .map_err(lift)?;
        info!(user_id = %id, "user updated");
        Ok(updated)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), UserError> {
        self.repository.delete(id).await.map_err(lift)?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
