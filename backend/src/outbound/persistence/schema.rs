//! Diesel table definitions.
//!
//! Must match `migrations/` exactly; regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// User records. Rows are soft-deleted by stamping `deleted_at`.
    users (id) {
        id -> Int8,
        name -> Varchar,
        age -> Int4,
        email -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
    }
}
