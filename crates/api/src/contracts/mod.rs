//! Wire contracts for the HTTP layer
//!
//! Requests map into service drafts, domain rows map into responses.
//! Field names are camelCase on the wire.

mod movie;
mod rating;

pub use movie::{MovieRequest, MovieResponse};
pub use rating::{check_rating_value, RatingRequest, RatingResponse};

use movies_common::errors::{AppError, Result};
use validator::Validate;

/// Run derive-based validation, reporting the first failing field
pub(crate) fn validate<T: Validate>(request: &T) -> Result<()> {
    request.validate().map_err(|e| {
        let field = e.field_errors().keys().next().map(|f| f.to_string());
        AppError::Validation {
            message: e.to_string(),
            field,
        }
    })
}
