use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::post,
};
use florascan_types::{PredictionRecord, round4};
use florascan_vision::{classify, preprocess, softmax};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(predict))
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PredictResponse {
    /// Predicted class label, or the unknown sentinel when rejected.
    pub category: String,
    /// Raw top-class probability, rounded to 4 decimals.
    pub confidence: f32,
}

struct Upload {
    filename: String,
    data: axum::body::Bytes,
}

/// Classify an uploaded image and append the result to the history log.
///
/// Content type is validated before the field body is even buffered, so
/// non-image uploads fail fast with a client error and never reach inference.
/// Everything after that point is reported as a generic processing failure; a
/// failed request writes no history line.
#[utoipa::path(
    post,
    path = "/predict",
    tag = "predict",
    responses(
        (status = 200, description = "Category and confidence for the upload", body = PredictResponse),
        (status = 400, description = "Upload is not an image"),
        (status = 500, description = "The image could not be processed"),
    )
)]
#[tracing::instrument(name = "POST /predict", skip(state, multipart))]
pub async fn predict(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PredictResponse>, ApiError> {
    let upload = read_file_field(multipart).await?;

    let tensor = preprocess(&upload.data, state.config.input_size)?;

    let classifier = state.classifier.clone();
    let scores = tokio::task::spawn_blocking(move || classifier.infer(&tensor))
        .await
        .map_err(|e| ApiError::processing(format!("inference task join error: {e}")))??;

    let probabilities = softmax(&scores);
    let result = classify(
        &probabilities,
        &state.config.labels,
        &state.config.negative_label,
        state.config.threshold,
    )?;

    tracing::debug!(
        filename = %upload.filename,
        category = %result.category,
        confidence = result.confidence,
        "classified upload"
    );

    let record = PredictionRecord::new(upload.filename, result.category.clone(), result.confidence);
    state.history.append(&record).await?;

    Ok(Json(PredictResponse {
        category: result.category,
        confidence: round4(result.confidence),
    }))
}

/// Pull the `file` field out of the multipart body. The field's content type
/// is checked before its bytes are buffered; non-image fields never get read.
async fn read_file_field(mut multipart: Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let is_image = content_type
            .as_deref()
            .is_some_and(|ct| ct.split('/').next() == Some("image"));
        if !is_image {
            return Err(ApiError::invalid_content_type(content_type.as_deref()));
        }

        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or("unnamed")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;

        return Ok(Upload { filename, data });
    }

    Err(ApiError::bad_request("missing multipart field 'file'"))
}
