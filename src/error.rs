use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::presenter::EmptyInputError;
use crate::weather::ProviderError;

/// Standard error response format for all API errors
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
        }
    }

    pub fn with_code(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: Some(code.into()),
        }
    }
}

/// Trait for errors that can be converted to HTTP responses
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Optional error code for programmatic handling (e.g., "CITY_NOT_FOUND")
    fn error_code(&self) -> Option<&'static str> {
        None
    }
}

/// Convert any HttpError into an Axum response
pub fn into_response<E: HttpError>(err: E) -> Response {
    let status = err.status_code();
    let code = err.error_code();
    let message = err.to_string();

    tracing::error!(
        error = %message,
        status = %status,
        code = ?code,
        "API error"
    );

    let body = if let Some(code) = code {
        ErrorResponse::with_code(message, code)
    } else {
        ErrorResponse::new(message)
    };

    (status, Json(body)).into_response()
}

/// Macro to implement IntoResponse for HttpError types
#[macro_export]
macro_rules! impl_into_response {
    ($error_type:ty) => {
        impl axum::response::IntoResponse for $error_type {
            fn into_response(self) -> axum::response::Response {
                $crate::error::into_response(self)
            }
        }
    };
}

/// Errors from the one-shot lookup endpoints
#[derive(Error, Debug)]
pub enum LookupError {
    #[error(transparent)]
    EmptyInput(#[from] EmptyInputError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl HttpError for LookupError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyInput(e) => e.status_code(),
            Self::Provider(e) => e.status_code(),
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::EmptyInput(e) => e.error_code(),
            Self::Provider(e) => e.error_code(),
        }
    }
}

impl_into_response!(LookupError);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_delegates_status() {
        let empty = LookupError::from(EmptyInputError);
        assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(empty.error_code(), Some("EMPTY_INPUT"));

        let missing = LookupError::from(ProviderError::CityNotFound("Gotham".to_string()));
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(missing.to_string(), "City not found: Gotham");
    }

    #[test]
    fn test_error_response_omits_missing_code() {
        let json = serde_json::to_value(ErrorResponse::new("boom")).expect("serializes");
        assert_eq!(json, serde_json::json!({ "error": "boom" }));
    }
}
