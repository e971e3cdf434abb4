//! Movies API HTTP service
//!
//! Exposes CRUD endpoints for movies and their ratings:
//! - `/movies` and `/movies/{id}`
//! - `/ratings` and `/ratings/{id}`
//! - `/health`, `/ready` and `/metrics` for operations
//! - `/swagger/v1/swagger.json` for the OpenAPI document

pub mod contracts;
pub mod docs;
pub mod extract;
pub mod handlers;
pub mod middleware;

use axum::{
    middleware::from_fn,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use movies_common::{config::AppConfig, db::DbPool, Services};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DbPool,
    pub services: Services,
}

impl AppState {
    /// Wire services over the given pool
    pub fn new(config: Arc<AppConfig>, db: DbPool) -> Self {
        let services = Services::new(db.clone());
        Self { config, db, services }
    }
}

/// Create the main application router.
///
/// `/metrics` is only mounted when a Prometheus handle is supplied.
pub fn create_router(state: AppState, metrics: Option<PrometheusHandle>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    let api_routes = Router::new()
        // Movie endpoints
        .route(
            "/movies",
            get(handlers::movies::list_movies).post(handlers::movies::create_movie),
        )
        .route(
            "/movies/{id}",
            get(handlers::movies::get_movie)
                .put(handlers::movies::update_movie)
                .delete(handlers::movies::delete_movie),
        )

        // Rating endpoints
        .route(
            "/ratings",
            get(handlers::ratings::list_ratings).post(handlers::ratings::create_rating),
        )
        .route(
            "/ratings/{id}",
            get(handlers::ratings::get_rating)
                .put(handlers::ratings::update_rating)
                .delete(handlers::ratings::delete_rating),
        )
        .route_layer(from_fn(middleware::metrics::track_requests));

    // Health endpoints
    let mut ops_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .route(docs::OPENAPI_PATH, get(docs::openapi));

    if let Some(handle) = metrics {
        ops_routes = ops_routes.route("/metrics", get(move || async move { handle.render() }));
    }

    // Compose the app
    Router::new()
        .merge(api_routes)
        .merge(ops_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(propagate_id)
        .layer(request_id)
        .with_state(state)
}
