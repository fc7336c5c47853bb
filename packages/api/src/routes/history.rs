use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use florascan_types::PredictionRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(history))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// How many of the most recent records to return.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    #[schema(value_type = Vec<Object>)]
    pub records: Vec<PredictionRecord>,
}

/// Return the last N predictions, oldest first.
#[utoipa::path(
    get,
    path = "/history",
    tag = "history",
    params(
        ("limit" = usize, Query, description = "Number of records to return (default 50)")
    ),
    responses(
        (status = 200, description = "Most recent prediction records", body = HistoryResponse)
    )
)]
#[tracing::instrument(name = "GET /history", skip(state))]
pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let records = state.history.read_last(query.limit).await?;
    Ok(Json(HistoryResponse { records }))
}
