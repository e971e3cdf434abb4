//! Movie handlers

use axum::{
    extract::State,
    http::{header, StatusCode},
    Json,
};
use uuid::Uuid;

use crate::contracts::{validate, MovieRequest, MovieResponse};
use crate::extract::{ApiJson, ApiPath};
use crate::AppState;
use movies_common::errors::{AppError, ErrorResponse, Result};

/// List every movie
#[utoipa::path(
    get,
    path = "/movies",
    tag = "movies",
    responses(
        (status = 200, description = "All movies, possibly none", body = [MovieResponse]),
    )
)]
pub async fn list_movies(State(state): State<AppState>) -> Result<Json<Vec<MovieResponse>>> {
    let movies = state.services.movies.get_all().await?;

    Ok(Json(movies.into_iter().map(MovieResponse::from).collect()))
}

/// Get a movie by ID
#[utoipa::path(
    get,
    path = "/movies/{id}",
    tag = "movies",
    params(("id" = Uuid, Path, description = "Movie id")),
    responses(
        (status = 200, description = "The movie", body = MovieResponse),
        (status = 404, description = "No movie has this id", body = ErrorResponse),
    )
)]
pub async fn get_movie(
    State(state): State<AppState>,
    ApiPath(movie_id): ApiPath<Uuid>,
) -> Result<Json<MovieResponse>> {
    let movie = state.services.movies
        .get_by_id(movie_id)
        .await?
        .ok_or(AppError::MovieNotFound { id: movie_id })?;

    Ok(Json(movie.into()))
}

/// Create a movie
#[utoipa::path(
    post,
    path = "/movies",
    tag = "movies",
    request_body = MovieRequest,
    responses(
        (status = 201, description = "Movie created", body = MovieResponse,
            headers(("Location" = String, description = "URI of the new movie"))),
        (status = 400, description = "Invalid movie fields", body = ErrorResponse),
    )
)]
pub async fn create_movie(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<MovieRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<MovieResponse>)> {
    validate(&request)?;

    let movie = state.services.movies.create(request.into()).await?;
    let location = format!("/movies/{}", movie.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(movie.into()),
    ))
}

/// Replace the fields of an existing movie
#[utoipa::path(
    put,
    path = "/movies/{id}",
    tag = "movies",
    params(("id" = Uuid, Path, description = "Movie id")),
    request_body = MovieRequest,
    responses(
        (status = 204, description = "Movie updated"),
        (status = 400, description = "Invalid movie fields", body = ErrorResponse),
        (status = 404, description = "No movie has this id", body = ErrorResponse),
    )
)]
pub async fn update_movie(
    State(state): State<AppState>,
    ApiPath(movie_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<MovieRequest>,
) -> Result<StatusCode> {
    validate(&request)?;

    state.services.movies
        .update(movie_id, request.into())
        .await?
        .ok_or(AppError::MovieNotFound { id: movie_id })?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a movie and its ratings
#[utoipa::path(
    delete,
    path = "/movies/{id}",
    tag = "movies",
    params(("id" = Uuid, Path, description = "Movie id")),
    responses(
        (status = 204, description = "Movie and its ratings deleted"),
        (status = 404, description = "No movie has this id", body = ErrorResponse),
    )
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    ApiPath(movie_id): ApiPath<Uuid>,
) -> Result<StatusCode> {
    if !state.services.movies.delete_by_id(movie_id).await? {
        return Err(AppError::MovieNotFound { id: movie_id });
    }

    Ok(StatusCode::NO_CONTENT)
}
