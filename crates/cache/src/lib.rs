//! SQLite store for the sparse addon projection.
//!
//! This crate persists a sparse projection of upstream addon metadata in a
//! single table keyed by addon identifier. The database is a cache, not a
//! source of truth: rows are only written by an explicit upstream sync, a
//! write replaces the whole row, and nothing here expires or invalidates.
//!
//! Store failures are fatal to the caller; unlike the client crate there
//! is no conversion to absence.

mod db;
pub mod error;
mod models;
mod store;

pub use crate::db::Database;
pub use crate::models::SparseAddon;
pub use crate::store::{AddonStore, ListFilter};
