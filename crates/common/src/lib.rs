//! Movies API Common Library
//!
//! Shared code for the Movies API including:
//! - Database entities, repositories and schema bootstrap
//! - Movie and rating services with the rating reference check
//! - Error types and handling
//! - Configuration management
//! - Metrics helpers

pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::models::{Movie, MovieRating};
pub use db::{DbPool, MovieDraft, RatingDraft};
pub use errors::{AppError, Result};
pub use services::{CreateRatingOutcome, MovieService, RatingService, Services};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
