//! HTTP surface of the classifier: route wiring, request-boundary error
//! mapping, and the shared application state.

use axum::{Json, Router, extract::DefaultBodyLimit, routing::get};
use serde::{Deserialize, Serialize};
use state::AppState;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};

pub mod error;
pub mod openapi;
mod routes;
pub mod state;

pub use axum;
pub use error::ApiError;

/// Uploads above this are rejected by axum before the handler runs.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

pub fn construct_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/openapi.json", get(openapi_spec))
        .nest("/health", routes::health::routes())
        .nest("/predict", routes::predict::routes())
        .nest("/history", routes::history::routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
}

#[tracing::instrument(name = "GET /openapi.json")]
async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi::ApiDoc::openapi())
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HomeResponse {
    pub message: String,
}

/// Connection probe for the web frontend.
#[utoipa::path(
    get,
    path = "/",
    tag = "home",
    responses(
        (status = 200, description = "Service is reachable", body = HomeResponse)
    )
)]
#[tracing::instrument(name = "GET /")]
async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Classification API is up. POST an image to /predict.".to_string(),
    })
}
