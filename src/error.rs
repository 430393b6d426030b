//! Error types for dataset fetching and request handling.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failure to produce the area tree from a dataset source
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("dataset request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to read dataset file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode dataset: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Request-level failures, each mapped to one HTTP status
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not fetch dataset: {0}")]
    FetchFailure(#[from] FetchError),

    #[error("no area matches filter '{filter}'")]
    FilterNotFound { filter: String },

    #[error("invalid query string: {0}")]
    BadQuery(String),

    #[error("invalid coordinate: latitude '{latitude}', longitude '{longitude}'")]
    BadCoordinate { latitude: String, longitude: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::FetchFailure(_) => StatusCode::BAD_GATEWAY,
            ApiError::FilterNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadQuery(_) | ApiError::BadCoordinate { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::FetchFailure(e) => tracing::error!("Dataset fetch failed: {}", e),
            other => tracing::warn!("Rejected request: {}", other),
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = ApiError::FilterNotFound {
            filter: "Atlantis".to_string(),
        };
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let bad = ApiError::BadCoordinate {
            latitude: "north".to_string(),
            longitude: "1.0".to_string(),
        };
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let query = ApiError::BadQuery("duplicate field `filter`".to_string());
        assert_eq!(query.status(), StatusCode::BAD_REQUEST);

        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let fetch = ApiError::from(FetchError::from(decode));
        assert_eq!(fetch.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_messages_name_the_input() {
        let err = ApiError::BadCoordinate {
            latitude: "abc".to_string(),
            longitude: "-122.41".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("abc"));
        assert!(msg.contains("-122.41"));

        let err = ApiError::FilterNotFound {
            filter: "United_States,Narnia".to_string(),
        };
        assert!(err.to_string().contains("United_States,Narnia"));
    }
}
