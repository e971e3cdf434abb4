//! Movie service

use crate::db::models::Movie;
use crate::db::{MovieDraft, MovieRepository};
use crate::errors::Result;
use crate::metrics::{self, WriteAction};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

pub struct MovieService {
    repo: Arc<dyn MovieRepository>,
}

impl MovieService {
    pub fn new(repo: Arc<dyn MovieRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Movie>> {
        self.repo.find_by_id(id).await
    }

    pub async fn get_all(&self) -> Result<Vec<Movie>> {
        self.repo.find_all().await
    }

    /// Store a new movie. Id and timestamps are always server-assigned.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create(&self, draft: MovieDraft) -> Result<Movie> {
        let movie = self.repo.create(draft).await?;

        metrics::record_movie_write(WriteAction::Created);
        tracing::info!(movie_id = %movie.id, "Movie created");

        Ok(movie)
    }

    /// Replace the mutable fields of an existing movie.
    ///
    /// Returns `None` without writing when no movie has this id.
    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: Uuid, draft: MovieDraft) -> Result<Option<Movie>> {
        if self.repo.find_by_id(id).await?.is_none() {
            tracing::debug!("Movie to update does not exist");
            return Ok(None);
        }

        let updated = self.repo.update(id, draft).await?;

        if updated.is_some() {
            metrics::record_movie_write(WriteAction::Updated);
            tracing::info!("Movie updated");
        }

        Ok(updated)
    }

    /// Delete a movie together with its ratings
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let deleted = self.repo.delete_by_id(id).await?;

        if deleted {
            metrics::record_movie_write(WriteAction::Deleted);
            tracing::info!("Movie deleted");
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{
        test_pool, DbMovieRepository, DbPool, DbRatingRepository, RatingDraft, RatingRepository,
    };
    use chrono::{NaiveDate, Utc};
    use std::time::Duration;

    fn draft(title: &str) -> MovieDraft {
        MovieDraft {
            title: title.to_string(),
            description: "...".to_string(),
            date_of_release: NaiveDate::from_ymd_opt(2010, 7, 16).unwrap(),
        }
    }

    async fn service() -> (MovieService, DbPool) {
        let pool = test_pool().await;
        let service = MovieService::new(Arc::new(DbMovieRepository::new(pool.clone())));
        (service, pool)
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let (service, _) = service().await;
        let before = Utc::now();

        let first = service.create(draft("Inception")).await.unwrap();
        let second = service.create(draft("Inception")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.date_of_release, NaiveDate::from_ymd_opt(2010, 7, 16).unwrap());
        assert!(first.created_date >= before);
        assert_eq!(first.created_date, first.updated_date);
    }

    #[tokio::test]
    async fn test_get_all_and_by_id() {
        let (service, _) = service().await;
        assert!(service.get_all().await.unwrap().is_empty());

        let movie = service.create(draft("Alien")).await.unwrap();
        service.create(draft("Aliens")).await.unwrap();

        assert_eq!(service.get_all().await.unwrap().len(), 2);
        assert_eq!(service.get_by_id(movie.id).await.unwrap(), Some(movie));
        assert!(service.get_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_movie_writes_nothing() {
        let (service, _) = service().await;
        let existing = service.create(draft("Alien")).await.unwrap();

        let result = service.update(Uuid::new_v4(), draft("Ghost")).await.unwrap();

        assert!(result.is_none());
        assert_eq!(service.get_all().await.unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn test_update_preserves_created_date() {
        let (service, _) = service().await;
        let original = service.create(draft("Inceptoin")).await.unwrap();

        tokio::time::sleep(Duration::from_millis(10)).await;

        let mut changes = draft("Inception");
        changes.description = "Dreams within dreams.".to_string();
        let updated = service.update(original.id, changes).await.unwrap().unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.title, "Inception");
        assert_eq!(updated.description, "Dreams within dreams.");
        assert_eq!(updated.created_date, original.created_date);
        assert!(updated.updated_date > original.updated_date);

        let stored = service.get_by_id(original.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_ratings() {
        let (service, pool) = service().await;
        let ratings = DbRatingRepository::new(pool);

        let rated = service.create(draft("Rated")).await.unwrap();
        let unrated = service.create(draft("Unrated")).await.unwrap();
        ratings
            .create(RatingDraft { movie_id: rated.id, rating: 5 })
            .await
            .unwrap();

        assert!(service.delete_by_id(rated.id).await.unwrap());
        assert!(ratings.find_all().await.unwrap().is_empty());

        assert!(service.delete_by_id(unrated.id).await.unwrap());
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_movie() {
        let (service, _) = service().await;
        assert!(!service.delete_by_id(Uuid::new_v4()).await.unwrap());
    }
}
