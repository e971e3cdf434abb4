use chrono::{DateTime, NaiveDate, Utc};
use movies_common::{Movie, MovieDraft};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Body of `POST /movies` and `PUT /movies/{id}`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieRequest {
    #[validate(length(min = 1))]
    #[schema(min_length = 1)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub date_of_release: NaiveDate,

    /// Accepted for compatibility, always overwritten by the server
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,

    /// Accepted for compatibility, always overwritten by the server
    #[serde(default)]
    pub updated_date: Option<DateTime<Utc>>,
}

/// Movie as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date_of_release: NaiveDate,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl From<MovieRequest> for MovieDraft {
    fn from(request: MovieRequest) -> Self {
        MovieDraft {
            title: request.title,
            description: request.description,
            date_of_release: request.date_of_release,
        }
    }
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        MovieResponse {
            id: movie.id,
            title: movie.title,
            description: movie.description,
            date_of_release: movie.date_of_release,
            created_date: movie.created_date,
            updated_date: movie.updated_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::validate;

    #[test]
    fn test_request_ignores_tracking_dates() {
        let request: MovieRequest = serde_json::from_value(serde_json::json!({
            "title": "Inception",
            "description": "...",
            "dateOfRelease": "2010-07-16",
            "createdDate": "1999-01-01T00:00:00Z",
            "updatedDate": "1999-01-01T00:00:00Z"
        }))
        .unwrap();

        assert!(request.created_date.is_some());

        let draft = MovieDraft::from(request);
        assert_eq!(draft.title, "Inception");
        assert_eq!(draft.date_of_release, NaiveDate::from_ymd_opt(2010, 7, 16).unwrap());
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let request: MovieRequest = serde_json::from_value(serde_json::json!({
            "title": "",
            "description": "...",
            "dateOfRelease": "2010-07-16"
        }))
        .unwrap();

        let err = validate(&request).unwrap_err();
        assert!(matches!(
            err,
            movies_common::AppError::Validation { field: Some(ref f), .. } if f == "title"
        ));
    }

    #[test]
    fn test_response_uses_camel_case() {
        let now = Utc::now();
        let movie = Movie {
            id: Uuid::new_v4(),
            title: "Inception".to_string(),
            description: "...".to_string(),
            date_of_release: NaiveDate::from_ymd_opt(2010, 7, 16).unwrap(),
            created_date: now,
            updated_date: now,
        };

        let json = serde_json::to_value(MovieResponse::from(movie.clone())).unwrap();
        assert_eq!(json["id"], movie.id.to_string());
        assert_eq!(json["dateOfRelease"], "2010-07-16");
        assert!(json.get("createdDate").is_some());
        assert!(json.get("updatedDate").is_some());
    }
}
