//! # Seeds
//!
//! Generates random campgrounds for development databases. The `seed` binary
//! clears the campground store and fills it with a fresh batch.

/// City and state lookup list used for campground locations.
pub mod cities;

/// Word lists used for campground titles.
pub mod seed_helpers;

/// Campground generation and the seed run itself.
mod generator;
pub use generator::*;
