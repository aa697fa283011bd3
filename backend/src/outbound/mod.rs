//! Outbound adapters implementing domain ports.
//!
//! Adapters translate between domain types and storage representations and
//! carry no business rules.

pub mod persistence;
