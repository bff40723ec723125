use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Failure classes the pipeline can surface to the caller. Every downstream
/// error is converted to one of these before it reaches the handler boundary.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("No image provided")]
    MissingImage,
    /// Network failure or non-success status from an upstream service.
    #[error("{0}")]
    Transport(String),
    /// Upstream returned a success status but an unexpected payload shape.
    #[error("{0}")]
    UnexpectedFormat(String),
}

impl PipelineError {
    pub fn status(&self) -> StatusCode {
        match self {
            PipelineError::MissingImage => StatusCode::BAD_REQUEST,
            PipelineError::Transport(_) | PipelineError::UnexpectedFormat(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_image_maps_to_bad_request() {
        assert_eq!(PipelineError::MissingImage.status(), StatusCode::BAD_REQUEST);
        assert_eq!(PipelineError::MissingImage.to_string(), "No image provided");
    }

    #[test]
    fn upstream_failures_map_to_internal_server_error() {
        let transport = PipelineError::Transport("connection refused".to_string());
        let format = PipelineError::UnexpectedFormat("missing field".to_string());
        assert_eq!(transport.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(format.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(transport.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn renders_json_error_envelope() {
        let response = PipelineError::MissingImage.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "No image provided" }));
    }
}
