//! # Web Handlers for the YelpCamp Web Application
//!
//! This crate provides the request handlers, form validation, HTML views and
//! error handling for the campground listings site.

/// Declarative schema validation of submitted forms
pub mod schema;

/// Conversion of submitted forms into store records
pub mod forms;

/// Error normalizer shared by every handler
mod error;
pub use error::*;

/// HTML pages
pub mod views;

/// Tunnelling of PATCH/PUT/DELETE through POST forms
mod method_override;
pub use method_override::*;

/// Handlers for campground pages
mod campground_handlers;
pub use campground_handlers::*;

/// Handlers for reviews
mod review_handlers;
pub use review_handlers::*;

/// Route table
mod routes;
pub use routes::*;
