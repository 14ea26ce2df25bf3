/// Error handling module
///
/// `LedgerError` is the closed set of use-case failure kinds; `ApiError`
/// translates them into transport responses. Use cases never see HTTP.
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::repository::RepositoryError;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("User not found")]
    UserNotFound,
    #[error("Statement not found")]
    StatementNotFound,
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("Incorrect email or password")]
    IncorrectEmailOrPassword,
    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),
    #[error("Credential error: {0}")]
    Credential(#[from] finledger_auth::CredentialError),
}

#[derive(Debug)]
pub enum ApiError {
    Internal {
        reason: String,
    },
    BadRequest {
        reason: String,
    },
    NotFound {
        resource: String,
    },
    Unauthorized {
        reason: String,
    },
    ServiceUnavailable {
        details: String,
    },
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Internal { reason } => write!(f, "Internal error: {}", reason),
            ApiError::BadRequest { reason } => write!(f, "Bad request: {}", reason),
            ApiError::NotFound { resource } => write!(f, "Not found: {}", resource),
            ApiError::Unauthorized { reason } => write!(f, "Unauthorized: {}", reason),
            ApiError::ServiceUnavailable { details } => {
                write!(f, "Service unavailable: {}", details)
            }
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::UserNotFound => ApiError::NotFound {
                resource: "User".to_string(),
            },
            LedgerError::StatementNotFound => ApiError::NotFound {
                resource: "Statement".to_string(),
            },
            LedgerError::InsufficientFunds => ApiError::BadRequest {
                reason: "Insufficient funds".to_string(),
            },
            LedgerError::DuplicateEmail => ApiError::BadRequest {
                reason: "Email already registered".to_string(),
            },
            LedgerError::IncorrectEmailOrPassword => ApiError::Unauthorized {
                reason: "Incorrect email or password".to_string(),
            },
            LedgerError::Storage(e) => {
                tracing::error!(error = %e, "Storage failure");
                ApiError::Internal {
                    reason: "Storage failure".to_string(),
                }
            }
            LedgerError::Credential(e) => {
                tracing::error!(error = %e, "Credential failure");
                ApiError::Internal {
                    reason: "Credential failure".to_string(),
                }
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let response = match self {
            ApiError::Internal { reason } => ErrorResponse {
                error: "Internal server error".to_string(),
                details: Some(reason.clone()),
            },
            ApiError::BadRequest { reason } => ErrorResponse {
                error: "Bad request".to_string(),
                details: Some(reason.clone()),
            },
            ApiError::NotFound { resource } => ErrorResponse {
                error: format!("{} not found", resource),
                details: None,
            },
            ApiError::Unauthorized { reason } => ErrorResponse {
                error: "Unauthorized".to_string(),
                details: Some(reason.clone()),
            },
            ApiError::ServiceUnavailable { details } => ErrorResponse {
                error: "Service unavailable".to_string(),
                details: Some(details.clone()),
            },
        };
        HttpResponse::build(status).json(response)
    }
}
