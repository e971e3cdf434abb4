//! Movie rating service

use super::validation::{RatingCheck, RatingValidator};
use crate::db::models::MovieRating;
use crate::db::{RatingDraft, RatingRepository};
use crate::errors::{AppError, Result};
use crate::metrics::{self, WriteAction};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Outcome of creating a rating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateRatingOutcome {
    /// The rating was stored
    Created(MovieRating),
    /// No movie has the referenced id; nothing was written
    MovieMissing { movie_id: Uuid },
}

pub struct RatingService {
    repo: Arc<dyn RatingRepository>,
    validator: RatingValidator,
}

impl RatingService {
    pub fn new(repo: Arc<dyn RatingRepository>, validator: RatingValidator) -> Self {
        Self { repo, validator }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<MovieRating>> {
        self.repo.find_by_id(id).await
    }

    pub async fn get_all(&self) -> Result<Vec<MovieRating>> {
        self.repo.find_all().await
    }

    /// Validate the movie reference, then store the rating
    #[instrument(skip(self), fields(movie_id = %draft.movie_id))]
    pub async fn create(&self, draft: RatingDraft) -> Result<CreateRatingOutcome> {
        if let RatingCheck::MovieMissing { movie_id } = self.validator.check(&draft).await? {
            metrics::record_rating_rejected();
            tracing::debug!("Rating rejected, movie does not exist");
            return Ok(CreateRatingOutcome::MovieMissing { movie_id });
        }

        match self.repo.create(draft).await {
            Ok(rating) => {
                metrics::record_rating_write(WriteAction::Created);
                tracing::info!(rating_id = %rating.id, "Rating created");
                Ok(CreateRatingOutcome::Created(rating))
            }
            // Movie deleted between the check and the insert
            Err(AppError::MovieReferenceNotFound { movie_id }) => {
                metrics::record_rating_rejected();
                tracing::warn!("Movie vanished before rating insert");
                Ok(CreateRatingOutcome::MovieMissing { movie_id })
            }
            Err(e) => Err(e),
        }
    }

    /// Change only the rating value of an existing rating.
    ///
    /// Id, creation date and movie link are carried over from the stored
    /// row. The movie reference is not re-validated.
    #[instrument(skip(self))]
    pub async fn update(&self, id: Uuid, value: i32) -> Result<Option<MovieRating>> {
        let Some(existing) = self.repo.find_by_id(id).await? else {
            tracing::debug!("Rating to update does not exist");
            return Ok(None);
        };

        let replacement = MovieRating {
            rating: value,
            ..existing
        };

        let updated = self.repo.update(replacement).await?;

        if updated.is_some() {
            metrics::record_rating_write(WriteAction::Updated);
            tracing::info!("Rating updated");
        }

        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let deleted = self.repo.delete_by_id(id).await?;

        if deleted {
            metrics::record_rating_write(WriteAction::Deleted);
            tracing::info!("Rating deleted");
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Movie;
    use crate::db::{test_pool, DbRatingRepository, MovieDraft, MovieRepository};
    use crate::services::Services;
    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};
    use std::time::Duration;

    /// Movie store that still reports a movie after it was deleted
    struct StaleMovies;

    #[async_trait]
    impl MovieRepository for StaleMovies {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Movie>> {
            Ok(Some(Movie {
                id,
                title: "Deleted".to_string(),
                description: String::new(),
                date_of_release: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
                created_date: Utc::now(),
                updated_date: Utc::now(),
            }))
        }

        async fn find_all(&self) -> Result<Vec<Movie>> {
            Ok(Vec::new())
        }

        async fn create(&self, _draft: MovieDraft) -> Result<Movie> {
            unimplemented!("not used by rating tests")
        }

        async fn update(&self, _id: Uuid, _draft: MovieDraft) -> Result<Option<Movie>> {
            Ok(None)
        }

        async fn delete_by_id(&self, _id: Uuid) -> Result<bool> {
            Ok(false)
        }
    }

    async fn services_with_movie() -> (Services, Uuid) {
        let services = Services::new(test_pool().await);
        let movie = services
            .movies
            .create(MovieDraft {
                title: "Inception".to_string(),
                description: "...".to_string(),
                date_of_release: NaiveDate::from_ymd_opt(2010, 7, 16).unwrap(),
            })
            .await
            .unwrap();
        (services, movie.id)
    }

    #[tokio::test]
    async fn test_create_for_existing_movie() {
        let (services, movie_id) = services_with_movie().await;

        let outcome = services
            .ratings
            .create(RatingDraft { movie_id, rating: 5 })
            .await
            .unwrap();

        let CreateRatingOutcome::Created(rating) = outcome else {
            panic!("expected rating to be created, got {:?}", outcome);
        };
        assert_eq!(rating.rating, 5);
        assert_eq!(rating.movie_id, movie_id);
        assert_eq!(rating.created_date, rating.updated_date);
        assert_eq!(services.ratings.get_by_id(rating.id).await.unwrap(), Some(rating));
    }

    #[tokio::test]
    async fn test_create_for_unknown_movie_writes_nothing() {
        let (services, _) = services_with_movie().await;
        let unknown = Uuid::new_v4();

        let outcome = services
            .ratings
            .create(RatingDraft { movie_id: unknown, rating: 3 })
            .await
            .unwrap();

        assert_eq!(outcome, CreateRatingOutcome::MovieMissing { movie_id: unknown });
        assert!(services.ratings.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_movie_deleted_after_check_is_reported_missing() {
        let services = Services::with_repositories(
            Arc::new(StaleMovies),
            Arc::new(DbRatingRepository::new(test_pool().await)),
        );
        let movie_id = Uuid::new_v4();

        let outcome = services
            .ratings
            .create(RatingDraft { movie_id, rating: 4 })
            .await
            .unwrap();

        assert_eq!(outcome, CreateRatingOutcome::MovieMissing { movie_id });
        assert!(services.ratings.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_changes_only_value() {
        let (services, movie_id) = services_with_movie().await;
        let CreateRatingOutcome::Created(original) = services
            .ratings
            .create(RatingDraft { movie_id, rating: 5 })
            .await
            .unwrap()
        else {
            panic!("rating not created");
        };

        tokio::time::sleep(Duration::from_millis(10)).await;

        let updated = services.ratings.update(original.id, 2).await.unwrap().unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.movie_id, movie_id);
        assert_eq!(updated.rating, 2);
        assert_eq!(updated.created_date, original.created_date);
        assert!(updated.updated_date > original.updated_date);

        let stored = services.ratings.get_by_id(original.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_update_missing_rating() {
        let (services, _) = services_with_movie().await;
        assert!(services.ratings.update(Uuid::new_v4(), 4).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let (services, movie_id) = services_with_movie().await;
        let CreateRatingOutcome::Created(rating) = services
            .ratings
            .create(RatingDraft { movie_id, rating: 1 })
            .await
            .unwrap()
        else {
            panic!("rating not created");
        };

        assert!(services.ratings.delete_by_id(rating.id).await.unwrap());
        assert!(!services.ratings.delete_by_id(rating.id).await.unwrap());
        assert!(services.ratings.get_all().await.unwrap().is_empty());
    }
}
