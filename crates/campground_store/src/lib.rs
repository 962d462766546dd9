//! # Campground Store
//!
//! This crate provides the data model for campgrounds and their reviews, and the
//! store adapters that persist them: a PostgreSQL implementation for production
//! and an in-memory one for tests and local development.

/// Connection pool helpers and schema bootstrap.
pub mod database;

/// Campground and review types.
mod types;
pub use types::*;

/// The store trait implemented by every backend.
mod store;
pub use store::*;

/// PostgreSQL-backed store.
mod postgres;
pub use postgres::PgCampgroundStore;

/// In-memory store.
mod memory;
pub use memory::MemoryCampgroundStore;
