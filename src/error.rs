use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error as ThisError;

/// Failures of a single result-page invocation.
///
/// Each variant is a distinct fault kind; an empty result set is never an error.
#[derive(Debug, ThisError)]
pub enum PageError {
    #[error("Error retrieving RDS password: {0}")]
    SecretRetrieval(String),

    #[error("Malformed secret: {0}")]
    MalformedSecret(String),

    #[error("Could not connect to the database: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Template error: {0}")]
    Render(#[from] tera::Error),
}

impl PageError {
    pub fn status(&self) -> StatusCode {
        match self {
            PageError::SecretRetrieval(_) => StatusCode::BAD_GATEWAY,
            PageError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            PageError::MalformedSecret(_) | PageError::Query(_) | PageError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PageError::SecretRetrieval(_) => "SECRET_RETRIEVAL",
            PageError::MalformedSecret(_) => "MALFORMED_SECRET",
            PageError::Connection(_) => "CONNECTION",
            PageError::Query(_) => "QUERY",
            PageError::Render(_) => "RENDER",
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = ApiErrorBody {
            code: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Startup configuration failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("invalid configuration: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Extract(Box::new(e))
    }
}
