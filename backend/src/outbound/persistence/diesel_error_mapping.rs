//! Translation of pool and Diesel failures into user repository errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::UserRepositoryError;

use super::pool::PoolError;

/// Pool failures mean the store is unreachable.
pub(super) fn map_pool_error(error: PoolError) -> UserRepositoryError {
    debug!(%error, "user repository pool failure");
    UserRepositoryError::connection(error.message())
}

pub(super) fn map_diesel_error(error: DieselError) -> UserRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let field = match info.constraint_name() {
                Some(name) if name.contains("email") => "email",
                Some(name) if name.contains("name") => "name",
                _ => "unique column",
            };
            UserRepositoryError::duplicate(format!("{field} already registered"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => UserRepositoryError::query("database query error"),
        _ => UserRepositoryError::query("database error"),
    }
}
