//! OpenAPI description of the movie and rating endpoints

use axum::Json;
use movies_common::errors::{ErrorCode, ErrorDetails, ErrorResponse};
use utoipa::OpenApi;

use crate::contracts::{MovieRequest, MovieResponse, RatingRequest, RatingResponse};
use crate::handlers::{movies, ratings};

/// Where the document is served
pub const OPENAPI_PATH: &str = "/swagger/v1/swagger.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Movies API", description = "Movies and their ratings"),
    paths(
        movies::list_movies,
        movies::get_movie,
        movies::create_movie,
        movies::update_movie,
        movies::delete_movie,
        ratings::list_ratings,
        ratings::get_rating,
        ratings::create_rating,
        ratings::update_rating,
        ratings::delete_rating,
    ),
    components(schemas(
        MovieRequest,
        MovieResponse,
        RatingRequest,
        RatingResponse,
        ErrorResponse,
        ErrorDetails,
        ErrorCode,
    )),
    tags(
        (name = "movies", description = "Movie management"),
        (name = "ratings", description = "Movie ratings"),
    )
)]
pub struct ApiDoc;

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
