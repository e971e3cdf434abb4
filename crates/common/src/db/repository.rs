//! Repository pattern for database operations
//!
//! Each table sits behind an `async_trait` interface so services can be
//! wired against any store. The SeaORM implementations are thin: point
//! lookups, full scans, single-row writes.

use crate::db::models::*;
use crate::db::DbPool;
use crate::errors::{AppError, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    NotSet, QueryFilter, Set, SqlErr, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Caller-controlled fields of a movie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDraft {
    pub title: String,
    pub description: String,
    pub date_of_release: NaiveDate,
}

/// Caller-controlled fields of a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingDraft {
    pub movie_id: Uuid,
    pub rating: i32,
}

/// Data access for the `Movies` table
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Find a movie by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Movie>>;

    /// All movies, unfiltered
    async fn find_all(&self) -> Result<Vec<Movie>>;

    /// Insert a movie with a fresh id and timestamps
    async fn create(&self, draft: MovieDraft) -> Result<Movie>;

    /// Overwrite the mutable fields of a movie and refresh `updated_date`.
    /// `created_date` is never written. Returns `None` if the row is gone.
    async fn update(&self, id: Uuid, draft: MovieDraft) -> Result<Option<Movie>>;

    /// Delete a movie and every rating that references it
    async fn delete_by_id(&self, id: Uuid) -> Result<bool>;
}

/// Data access for the `Ratings` table
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Find a rating by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<MovieRating>>;

    /// All ratings, unfiltered
    async fn find_all(&self) -> Result<Vec<MovieRating>>;

    /// Insert a rating with a fresh id and timestamps.
    ///
    /// Fails with [`AppError::MovieReferenceNotFound`] if the store rejects
    /// the movie reference.
    async fn create(&self, draft: RatingDraft) -> Result<MovieRating>;

    /// Persist `rating.movie_id` and `rating.rating`, refreshing
    /// `updated_date`. Returns `None` if the row is gone.
    async fn update(&self, rating: MovieRating) -> Result<Option<MovieRating>>;

    /// Delete a rating by ID
    async fn delete_by_id(&self, id: Uuid) -> Result<bool>;
}

// ============================================================================
// Movie Repository
// ============================================================================

/// SeaORM-backed movie repository
#[derive(Clone)]
pub struct DbMovieRepository {
    pool: DbPool,
}

impl DbMovieRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn read_conn(&self) -> &DatabaseConnection {
        self.pool.read()
    }

    fn write_conn(&self) -> &DatabaseConnection {
        self.pool.write()
    }
}

#[async_trait]
impl MovieRepository for DbMovieRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Movie>> {
        MovieEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    async fn find_all(&self) -> Result<Vec<Movie>> {
        MovieEntity::find()
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    async fn create(&self, draft: MovieDraft) -> Result<Movie> {
        let now = Utc::now();

        let movie = MovieActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(draft.title),
            description: Set(draft.description),
            date_of_release: Set(draft.date_of_release),
            created_date: Set(now),
            updated_date: Set(now),
        };

        movie.insert(self.write_conn()).await.map_err(Into::into)
    }

    async fn update(&self, id: Uuid, draft: MovieDraft) -> Result<Option<Movie>> {
        let movie = MovieActiveModel {
            id: Unchanged(id),
            title: Set(draft.title),
            description: Set(draft.description),
            date_of_release: Set(draft.date_of_release),
            created_date: NotSet,
            updated_date: Set(Utc::now()),
        };

        match movie.update(self.write_conn()).await {
            Ok(updated) => Ok(Some(updated)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        // Ratings go first so the cascade holds even where the store does
        // not enforce foreign keys.
        let txn = self.write_conn().begin().await?;

        let ratings = RatingEntity::delete_many()
            .filter(RatingColumn::MovieId.eq(id))
            .exec(&txn)
            .await?;

        let result = MovieEntity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        tracing::debug!(
            movie_id = %id,
            ratings_removed = ratings.rows_affected,
            "Movie delete committed"
        );

        Ok(result.rows_affected > 0)
    }
}

// ============================================================================
// Rating Repository
// ============================================================================

/// SeaORM-backed rating repository
#[derive(Clone)]
pub struct DbRatingRepository {
    pool: DbPool,
}

impl DbRatingRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn read_conn(&self) -> &DatabaseConnection {
        self.pool.read()
    }

    fn write_conn(&self) -> &DatabaseConnection {
        self.pool.write()
    }
}

#[async_trait]
impl RatingRepository for DbRatingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<MovieRating>> {
        RatingEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    async fn find_all(&self) -> Result<Vec<MovieRating>> {
        RatingEntity::find()
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    async fn create(&self, draft: RatingDraft) -> Result<MovieRating> {
        let now = Utc::now();

        let rating = RatingActiveModel {
            id: Set(Uuid::new_v4()),
            movie_id: Set(draft.movie_id),
            rating: Set(draft.rating),
            created_date: Set(now),
            updated_date: Set(now),
        };

        rating.insert(self.write_conn()).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => AppError::MovieReferenceNotFound {
                movie_id: draft.movie_id,
            },
            _ => e.into(),
        })
    }

    async fn update(&self, rating: MovieRating) -> Result<Option<MovieRating>> {
        let active = RatingActiveModel {
            id: Unchanged(rating.id),
            movie_id: Set(rating.movie_id),
            rating: Set(rating.rating),
            created_date: NotSet,
            updated_date: Set(Utc::now()),
        };

        match active.update(self.write_conn()).await {
            Ok(updated) => Ok(Some(updated)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let result = RatingEntity::delete_by_id(id)
            .exec(self.write_conn())
            .await?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn inception() -> MovieDraft {
        MovieDraft {
            title: "Inception".to_string(),
            description: "A thief who steals corporate secrets through dreams.".to_string(),
            date_of_release: NaiveDate::from_ymd_opt(2010, 7, 16).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_movie_create_and_find() {
        let repo = DbMovieRepository::new(test_pool().await);

        let created = repo.create(inception()).await.unwrap();
        assert_eq!(created.title, "Inception");
        assert_eq!(created.created_date, created.updated_date);

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_movie_update_missing_row() {
        let repo = DbMovieRepository::new(test_pool().await);
        let updated = repo.update(Uuid::new_v4(), inception()).await.unwrap();
        assert!(updated.is_none());
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_movie_delete_takes_ratings() {
        let pool = test_pool().await;
        let movies = DbMovieRepository::new(pool.clone());
        let ratings = DbRatingRepository::new(pool);

        let movie = movies.create(inception()).await.unwrap();
        let other = movies.create(inception()).await.unwrap();
        for value in [3, 5] {
            ratings
                .create(RatingDraft { movie_id: movie.id, rating: value })
                .await
                .unwrap();
        }
        let kept = ratings
            .create(RatingDraft { movie_id: other.id, rating: 4 })
            .await
            .unwrap();

        assert!(movies.delete_by_id(movie.id).await.unwrap());
        assert!(movies.find_by_id(movie.id).await.unwrap().is_none());
        assert_eq!(ratings.find_all().await.unwrap(), vec![kept]);

        assert!(!movies.delete_by_id(movie.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_rating_insert_with_dangling_movie_is_rejected() {
        let ratings = DbRatingRepository::new(test_pool().await);
        let movie_id = Uuid::new_v4();

        let err = ratings
            .create(RatingDraft { movie_id, rating: 3 })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::MovieReferenceNotFound { movie_id: id } if id == movie_id));
        assert!(ratings.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rating_delete() {
        let pool = test_pool().await;
        let movie = DbMovieRepository::new(pool.clone()).create(inception()).await.unwrap();
        let ratings = DbRatingRepository::new(pool);

        let rating = ratings
            .create(RatingDraft { movie_id: movie.id, rating: 2 })
            .await
            .unwrap();

        assert!(ratings.delete_by_id(rating.id).await.unwrap());
        assert!(!ratings.delete_by_id(rating.id).await.unwrap());
    }
}
