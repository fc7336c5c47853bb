use axum::{
    Json,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use florascan_history::HistoryError;
use florascan_vision::VisionError;
use serde::Serialize;

/// Request-boundary error. Everything downstream of the content-type check
/// (decode, inference, history write) collapses into one generic 500
/// processing failure carrying the underlying message, matching the service
/// contract; only pre-decode validation failures are client errors.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    summary: String,
    detail: Option<String>,
}

impl ApiError {
    pub fn invalid_content_type(got: Option<&str>) -> Self {
        let got = got.unwrap_or("none");
        tracing::warn!(content_type = got, "rejected non-image upload");
        Self {
            status: StatusCode::BAD_REQUEST,
            summary: "the uploaded file must be a valid image".to_string(),
            detail: Some(format!("content type was {got}")),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::warn!("Bad request: {}", msg);
        Self {
            status: StatusCode::BAD_REQUEST,
            summary: msg,
            detail: None,
        }
    }

    pub fn processing(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        tracing::error!("Processing failure: {}", detail);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            summary: "the image could not be processed".to_string(),
            detail: Some(detail),
        }
    }

}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorBody<'a> {
            error: &'a str,
            detail: &'a str,
        }

        let detail = self.detail.as_deref().unwrap_or("");
        let mut response = (
            self.status,
            Json(ErrorBody {
                error: &self.summary,
                detail,
            }),
        )
            .into_response();

        if self.status.is_server_error() {
            let id = florascan_types::create_id();
            if let Ok(value) = HeaderValue::from_str(&id) {
                response.headers_mut().insert("x-error-id", value);
            }
        }

        response
    }
}

impl From<VisionError> for ApiError {
    fn from(err: VisionError) -> Self {
        Self::processing(err.to_string())
    }
}

impl From<HistoryError> for ApiError {
    fn from(err: HistoryError) -> Self {
        Self::processing(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.summary)
    }
}

impl std::error::Error for ApiError {}
