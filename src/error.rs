use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

pub type Result<T> = std::result::Result<T, Error>;

/// A validation message attached to one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Why an authentication attempt was rejected. Only visible to the server;
/// every reason produces the same response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailureReason {
    NotFound,
    BadCredentials,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("the requested resource does not exist")]
    NotFound,
    #[error("some fields are invalid")]
    Validation(Vec<FieldError>),
    #[error("invalid login id or password")]
    AuthFailure(AuthFailureReason),
    #[error("no words are registered yet")]
    EmptyCorpus,
    #[error("password confirmation does not match")]
    Mismatch,
    #[error("this login id is already registered")]
    LoginIdTaken,
    #[error("please log in to continue")]
    LoginRequired,
    /// The request could not be decoded into the handler's input.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("password hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
}

impl Error {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Error::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Error::Validation(_) | Error::Mismatch => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR")
            }
            Error::LoginIdTaken => (StatusCode::CONFLICT, "CONFLICT"),
            Error::AuthFailure(_) => (StatusCode::UNAUTHORIZED, "AUTH_FAILED"),
            Error::LoginRequired => (StatusCode::UNAUTHORIZED, "LOGIN_REQUIRED"),
            Error::EmptyCorpus => (StatusCode::NOT_FOUND, "EMPTY_CORPUS"),
            Error::Rejected { status, .. } => (*status, "INVALID_REQUEST"),
            Error::Database(_) | Error::Hash(_) | Error::Task(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }

    fn into_fields(self) -> Vec<FieldError> {
        match self {
            Error::Validation(fields) => fields,
            Error::Mismatch => vec![FieldError::new(
                "passwordConfirm",
                "password confirmation does not match",
            )],
            Error::LoginIdTaken => vec![FieldError::new(
                "loginId",
                "this login id is already registered",
            )],
            _ => Vec::new(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = if status.is_server_error() {
            error!(error = %self, "Request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code,
            fields: self.into_fields(),
        };

        (status, Json(body)).into_response()
    }
}
