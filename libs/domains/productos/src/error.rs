use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::error::{ErrorKind, WriteFailure};
use std::fmt::Display;
use thiserror::Error;

/// MongoDB server code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Builds the message carried by every [`ProductoError`].
///
/// `"{HH:MM:SS} - Error - [ {LOCATION} ] - METHOD: [{method}]: {message}"`,
/// using local wall-clock time and the location uppercased.
pub fn format_error(location: &str, method: &str, message: impl Display) -> String {
    let time = chrono::Local::now().format("%H:%M:%S");
    format!(
        "{time} - Error - [ {} ] - METHOD: [{method}]: {message}",
        location.to_uppercase()
    )
}

/// Errors raised by [`crate::ProductoService`]; each holds a [`format_error`] message.
#[derive(Debug, Error)]
pub enum ProductoError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidId(String),

    #[error("{0}")]
    DuplicateTitulo(String),

    #[error("{0}")]
    Database(String),
}

pub type ProductoResult<T> = Result<T, ProductoError>;

/// Failures reported by a [`crate::ProductoRepository`].
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("{0}")]
    Store(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        let code = match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(e)) => Some(e.code),
            ErrorKind::Command(e) => Some(e.code),
            _ => None,
        };

        if code == Some(DUPLICATE_KEY_CODE) {
            RepositoryError::DuplicateKey(err.to_string())
        } else {
            RepositoryError::Store(err.to_string())
        }
    }
}

impl ProductoError {
    /// Wrap a repository failure raised while running `method`.
    pub fn from_repository(location: &str, method: &str, err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateKey(msg) => {
                ProductoError::DuplicateTitulo(format_error(location, method, msg))
            }
            RepositoryError::Store(msg) => ProductoError::Database(format_error(location, method, msg)),
        }
    }
}

/// Convert ProductoError to AppError for standardized error responses
impl From<ProductoError> for AppError {
    fn from(err: ProductoError) -> Self {
        match err {
            ProductoError::Validation(msg) => AppError::BadRequest(msg),
            ProductoError::InvalidId(msg) => AppError::InvalidId(msg),
            ProductoError::DuplicateTitulo(msg) => AppError::Conflict(msg),
            ProductoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ProductoError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
