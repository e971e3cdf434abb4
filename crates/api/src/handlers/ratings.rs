//! Movie rating handlers

use axum::{
    extract::State,
    http::{header, StatusCode},
    Json,
};
use uuid::Uuid;

use crate::contracts::{check_rating_value, validate, RatingRequest, RatingResponse};
use crate::extract::{ApiJson, ApiPath};
use crate::AppState;
use movies_common::{
    errors::{AppError, ErrorResponse, Result},
    CreateRatingOutcome,
};

/// List every rating
#[utoipa::path(
    get,
    path = "/ratings",
    tag = "ratings",
    responses(
        (status = 200, description = "All ratings, possibly none", body = [RatingResponse]),
    )
)]
pub async fn list_ratings(State(state): State<AppState>) -> Result<Json<Vec<RatingResponse>>> {
    let ratings = state.services.ratings.get_all().await?;

    Ok(Json(ratings.into_iter().map(RatingResponse::from).collect()))
}

/// Get a rating by ID
#[utoipa::path(
    get,
    path = "/ratings/{id}",
    tag = "ratings",
    params(("id" = Uuid, Path, description = "Rating id")),
    responses(
        (status = 200, description = "The rating", body = RatingResponse),
        (status = 404, description = "No rating has this id", body = ErrorResponse),
    )
)]
pub async fn get_rating(
    State(state): State<AppState>,
    ApiPath(rating_id): ApiPath<Uuid>,
) -> Result<Json<RatingResponse>> {
    let rating = state.services.ratings
        .get_by_id(rating_id)
        .await?
        .ok_or(AppError::RatingNotFound { id: rating_id })?;

    Ok(Json(rating.into()))
}

/// Rate a movie. An unknown movie is a 400, not a 404.
#[utoipa::path(
    post,
    path = "/ratings",
    tag = "ratings",
    request_body = RatingRequest,
    responses(
        (status = 201, description = "Rating created", body = RatingResponse,
            headers(("Location" = String, description = "URI of the new rating"))),
        (status = 400, description = "Rating out of range or movie unknown", body = ErrorResponse),
    )
)]
pub async fn create_rating(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RatingRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<RatingResponse>)> {
    validate(&request)?;

    match state.services.ratings.create(request.into()).await? {
        CreateRatingOutcome::Created(rating) => {
            let location = format!("/ratings/{}", rating.id);
            Ok((
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(rating.into()),
            ))
        }
        CreateRatingOutcome::MovieMissing { movie_id } => {
            Err(AppError::MovieReferenceNotFound { movie_id })
        }
    }
}

/// Change the value of a rating; the body is a bare integer
#[utoipa::path(
    put,
    path = "/ratings/{id}",
    tag = "ratings",
    params(("id" = Uuid, Path, description = "Rating id")),
    request_body(content = i32, description = "New rating value, 1 to 5"),
    responses(
        (status = 204, description = "Rating updated"),
        (status = 400, description = "Rating out of range", body = ErrorResponse),
        (status = 404, description = "No rating has this id", body = ErrorResponse),
    )
)]
pub async fn update_rating(
    State(state): State<AppState>,
    ApiPath(rating_id): ApiPath<Uuid>,
    ApiJson(value): ApiJson<i32>,
) -> Result<StatusCode> {
    check_rating_value(value)?;

    state.services.ratings
        .update(rating_id, value)
        .await?
        .ok_or(AppError::RatingNotFound { id: rating_id })?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a rating
#[utoipa::path(
    delete,
    path = "/ratings/{id}",
    tag = "ratings",
    params(("id" = Uuid, Path, description = "Rating id")),
    responses(
        (status = 204, description = "Rating deleted"),
        (status = 404, description = "No rating has this id", body = ErrorResponse),
    )
)]
pub async fn delete_rating(
    State(state): State<AppState>,
    ApiPath(rating_id): ApiPath<Uuid>,
) -> Result<StatusCode> {
    if !state.services.ratings.delete_by_id(rating_id).await? {
        return Err(AppError::RatingNotFound { id: rating_id });
    }

    Ok(StatusCode::NO_CONTENT)
}
