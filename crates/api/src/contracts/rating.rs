use chrono::{DateTime, Utc};
use movies_common::db::models::{is_valid_rating, MAX_RATING, MIN_RATING};
use movies_common::errors::{AppError, Result};
use movies_common::{MovieRating, RatingDraft};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Body of `POST /ratings`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingRequest {
    pub movie_id: Uuid,

    #[validate(range(min = 1, max = 5))]
    #[schema(minimum = 1, maximum = 5)]
    pub rating: i32,

    /// Accepted for compatibility, always overwritten by the server
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,

    /// Accepted for compatibility, always overwritten by the server
    #[serde(default)]
    pub updated_date: Option<DateTime<Utc>>,
}

/// Rating as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub id: Uuid,
    pub movie_id: Uuid,
    pub rating: i32,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl From<RatingRequest> for RatingDraft {
    fn from(request: RatingRequest) -> Self {
        RatingDraft {
            movie_id: request.movie_id,
            rating: request.rating,
        }
    }
}

impl From<MovieRating> for RatingResponse {
    fn from(rating: MovieRating) -> Self {
        RatingResponse {
            id: rating.id,
            movie_id: rating.movie_id,
            rating: rating.rating,
            created_date: rating.created_date,
            updated_date: rating.updated_date,
        }
    }
}

/// Range check for the bare integer body of `PUT /ratings/{id}`
pub fn check_rating_value(value: i32) -> Result<()> {
    if is_valid_rating(value) {
        Ok(())
    } else {
        Err(AppError::Validation {
            message: format!("rating must be between {} and {}", MIN_RATING, MAX_RATING),
            field: Some("rating".to_string()),
        })
    }
}
