//! Process-local `UserRepository` backed by a mutex-guarded vector.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, User, UserChanges, UserId, UserName};

#[derive(Debug, Default)]
struct Store {
    users: Vec<User>,
    last_id: u64,
}

/// In-memory implementation of the [`UserRepository`] port.
///
/// Records keep insertion order. Ids come from a counter that only moves
/// forward, so an id freed by a deletion is never handed out again.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
}

impl InMemoryUserRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `users`; the counter starts after the
    /// largest seeded id.
    pub fn with_users(users: Vec<User>) -> Self {
        let last_id = users.iter().map(|user| user.id().get()).max().unwrap_or(0);
        Self {
            store: Mutex::new(Store { users, last_id }),
        }
    }

    /// Repository holding the two demo records served by the sample setup.
    pub fn demo() -> Result<Self, UserRepositoryError> {
        let seed = |id: u64, name: &str, age: u32| -> Result<User, UserRepositoryError> {
            let name = UserName::new(name)
                .map_err(|err| UserRepositoryError::query(format!("demo seed: {err}")))?;
            Ok(User::new(UserId::new(id), name, age, None))
        };
        Ok(Self::with_users(vec![
            seed(1, "Алексей", 27)?,
            seed(2, "Валерия", 23)?,
        ]))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, UserRepositoryError> {
        self.store
            .lock()
            .map_err(|_| UserRepositoryError::query("in-memory user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(self.lock()?.users.clone())
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, UserRepositoryError> {
        self.lock()?
            .users
            .iter()
            .find(|user| user.id() == id)
            .cloned()
            .ok_or_else(|| UserRepositoryError::not_found(id))
    }

    async fn find_by_name(&self, name: &str) -> Result<User, UserRepositoryError> {
        self.lock()?
            .users
            .iter()
            .find(|user| user.name().as_ref() == name)
            .cloned()
            .ok_or_else(|| UserRepositoryError::not_found(name))
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut store = self.lock()?;
        let email_taken = user.email().is_some_and(|email| {
            store
                .users
                .iter()
                .any(|existing| existing.email() == Some(email))
        });
        if email_taken {
            return Err(UserRepositoryError::duplicate("email already registered"));
        }
        let next = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| UserRepositoryError::query("user id space exhausted"))?;
        store.last_id = next;
        let created = user.clone().into_user(UserId::new(next));
        store.users.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<User, UserRepositoryError> {
        let mut store = self.lock()?;
        let user = store
            .users
            .iter_mut()
            .find(|user| user.id() == id)
            .ok_or_else(|| UserRepositoryError::not_found(id))?;
        user.apply(changes.clone());
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<(), UserRepositoryError> {
        self.lock()?.users.retain(|user| user.id() != id);
        Ok(())
    }
}
