//! Business services for movies and ratings
//!
//! Services are wired by hand: each holds its repository behind an
//! `Arc<dyn ...>`, and the rating validator holds the movie repository.

mod movies;
mod ratings;
mod validation;

pub use movies::MovieService;
pub use ratings::{CreateRatingOutcome, RatingService};
pub use validation::{RatingCheck, RatingValidator};

use crate::db::{DbMovieRepository, DbPool, DbRatingRepository, MovieRepository, RatingRepository};
use std::sync::Arc;

/// Every service, built over one pool
#[derive(Clone)]
pub struct Services {
    pub movies: Arc<MovieService>,
    pub ratings: Arc<RatingService>,
}

impl Services {
    /// Wire the SeaORM repositories into the services
    pub fn new(pool: DbPool) -> Self {
        let movie_repo: Arc<dyn MovieRepository> = Arc::new(DbMovieRepository::new(pool.clone()));
        let rating_repo: Arc<dyn RatingRepository> = Arc::new(DbRatingRepository::new(pool));

        Self::with_repositories(movie_repo, rating_repo)
    }

    /// Wire arbitrary repository implementations
    pub fn with_repositories(
        movie_repo: Arc<dyn MovieRepository>,
        rating_repo: Arc<dyn RatingRepository>,
    ) -> Self {
        let validator = RatingValidator::new(movie_repo.clone());

        Self {
            movies: Arc::new(MovieService::new(movie_repo)),
            ratings: Arc::new(RatingService::new(rating_repo, validator)),
        }
    }
}
