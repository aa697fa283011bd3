//! Diesel row structs. Never exposed outside the persistence adapter.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::users;

/// Columns read back for a live user.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub age: i32,
    pub email: Option<&'a str>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: &'a str,
    pub age: i32,
    pub updated_at: DateTime<Utc>,
}
