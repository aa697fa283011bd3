//! PostgreSQL-backed `UserRepository` using Diesel.
//!
//! Deletion is soft: the row keeps its id and gets a `deleted_at` stamp, and
//! every read filters stamped rows out.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Email, NewUser, User, UserChanges, UserId, UserName};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::users;

/// Diesel implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let id = u64::try_from(row.id)
        .map_err(|_| UserRepositoryError::query(format!("negative user id {}", row.id)))?;
    let age = u32::try_from(row.age)
        .map_err(|_| UserRepositoryError::query(format!("negative age for user {id}")))?;
    let name = UserName::new(row.name)
        .map_err(|err| UserRepositoryError::query(format!("stored name for user {id}: {err}")))?;
    let email = row
        .email
        .map(Email::new)
        .transpose()
        .map_err(|err| UserRepositoryError::query(format!("stored email for user {id}: {err}")))?;
    Ok(User::new(UserId::new(id), name, age, email))
}

fn age_column(age: u32) -> Result<i32, UserRepositoryError> {
    i32::try_from(age).map_err(|_| UserRepositoryError::query(format!("age {age} out of range")))
}

/// Ids above `i64::MAX` cannot exist in a BIGSERIAL column.
fn id_column(id: UserId) -> Option<i64> {
    i64::try_from(id.get()).ok()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .filter(users::deleted_at.is_null())
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, UserRepositoryError> {
        let Some(raw) = id_column(id) else {
            return Err(UserRepositoryError::not_found(id));
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::id.eq(raw))
            .filter(users::deleted_at.is_null())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user)
            .unwrap_or_else(|| Err(UserRepositoryError::not_found(id)))
    }

    async fn find_by_name(&self, name: &str) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::name.eq(name))
            .filter(users::deleted_at.is_null())
            .order(users::id.asc())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user)
            .unwrap_or_else(|| Err(UserRepositoryError::not_found(name)))
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let new_row = NewUserRow {
            name: user.name().as_ref(),
            age: age_column(user.age())?,
            email: user.email().map(AsRef::as_ref),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_user(row)
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<User, UserRepositoryError> {
        let Some(raw) = id_column(id) else {
            return Err(UserRepositoryError::not_found(id));
        };
        let changeset = UserUpdate {
            name: changes.name.as_ref(),
            age: age_column(changes.age)?,
            updated_at: Utc::now(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(
            users::table
                .filter(users::id.eq(raw))
                .filter(users::deleted_at.is_null()),
        )
        .set(&changeset)
        .returning(UserRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;
        row.map(row_to_user)
            .unwrap_or_else(|| Err(UserRepositoryError::not_found(id)))
    }

    async fn delete(&self, id: UserId) -> Result<(), UserRepositoryError> {
        let Some(raw) = id_column(id) else {
            return Ok(());
        };
        let now = Utc::now();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            users::table
                .filter(users::id.eq(raw))
                .filter(users::deleted_at.is_null()),
        )
        .set((users::deleted_at.eq(Some(now)), users::updated_at.eq(now)))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(())
    }
}
