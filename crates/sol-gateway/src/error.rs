//! HTTP error responses

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use sol_core::Error;

/// An error rendered as `{"detail": "..."}` with a status code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidInput(detail)
            | Error::UnsupportedFormat(detail)
            | Error::EmptyInput(detail) => Self::bad_request(detail),
            Error::Extraction(detail) => {
                error!(%detail, "Text extraction failed");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to extract text from file",
                )
            }
            other => {
                error!(error = %other, "Request failed");
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "detail": self.detail })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_keep_their_message() {
        let api = ApiError::from(Error::EmptyInput("Query cannot be empty".to_string()));
        assert_eq!(api, ApiError::bad_request("Query cannot be empty"));

        let api = ApiError::from(Error::UnsupportedFormat("Unsupported file type: x.pdf".into()));
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_errors_are_generic() {
        let api = ApiError::from(Error::Provider("upstream said 502 with secrets".to_string()));
        assert_eq!(api, ApiError::internal());

        let api = ApiError::from(Error::Configuration("OPENAI_API_KEY is not set".to_string()));
        assert_eq!(api.detail, "Internal server error");
    }

    #[test]
    fn test_extraction_failure_detail() {
        let api = ApiError::from(Error::Extraction("bad bytes".to_string()));
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.detail, "Failed to extract text from file");
    }
}
