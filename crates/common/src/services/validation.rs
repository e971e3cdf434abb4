//! Cross-entity validation for ratings

use crate::db::{MovieRepository, RatingDraft};
use crate::errors::Result;
use std::sync::Arc;
use uuid::Uuid;

/// Result of checking a candidate rating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingCheck {
    Valid,
    MovieMissing { movie_id: Uuid },
}

/// Ensures a rating points at a movie that exists
#[derive(Clone)]
pub struct RatingValidator {
    movies: Arc<dyn MovieRepository>,
}

impl RatingValidator {
    pub fn new(movies: Arc<dyn MovieRepository>) -> Self {
        Self { movies }
    }

    /// Look up the referenced movie. Not fenced against a concurrent
    /// delete; the foreign key catches that on insert.
    pub async fn check(&self, draft: &RatingDraft) -> Result<RatingCheck> {
        let exists = self.movies.find_by_id(draft.movie_id).await?.is_some();

        if exists {
            Ok(RatingCheck::Valid)
        } else {
            Ok(RatingCheck::MovieMissing { movie_id: draft.movie_id })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, DbMovieRepository, MovieDraft};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_check_existing_and_missing_movie() {
        let movies = Arc::new(DbMovieRepository::new(test_pool().await));
        let movie = movies
            .create(MovieDraft {
                title: "Heat".to_string(),
                description: "Cops and robbers in Los Angeles.".to_string(),
                date_of_release: NaiveDate::from_ymd_opt(1995, 12, 15).unwrap(),
            })
            .await
            .unwrap();

        let validator = RatingValidator::new(movies);

        let valid = validator
            .check(&RatingDraft { movie_id: movie.id, rating: 4 })
            .await
            .unwrap();
        assert_eq!(valid, RatingCheck::Valid);

        let missing_id = Uuid::new_v4();
        let missing = validator
            .check(&RatingDraft { movie_id: missing_id, rating: 4 })
            .await
            .unwrap();
        assert_eq!(missing, RatingCheck::MovieMissing { movie_id: missing_id });
    }
}
