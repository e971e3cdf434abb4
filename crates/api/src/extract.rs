//! Request extractors that reject through `AppError`
//!
//! axum answers an unreadable body with 422 and a malformed path id with
//! 400, both as plain text. These wrappers route the rejections through
//! the JSON error envelope instead: bodies become 400, path ids 404.

use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::Json;
use movies_common::errors::AppError;

/// JSON body extractor
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Path parameter extractor
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
