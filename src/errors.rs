use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::views;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    NotFound,
    Unauthorized,
    InternalServerError,
    BadRequest(String),
    Conflict(String),
    DatabaseError(sqlx::Error),
    InvalidHashFormat(argon2::password_hash::Error),
    UploadError(std::io::Error),
    MailError(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InternalServerError
            | Self::DatabaseError(_)
            | Self::InvalidHashFormat(_)
            | Self::UploadError(_)
            | Self::MailError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show in the rendered page.
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound => "Resource not found",
            Self::Unauthorized => "Unauthorized",
            Self::InternalServerError => "Internal server error",
            Self::BadRequest(msg) | Self::Conflict(msg) => msg.as_str(),
            Self::DatabaseError(_) => "Database error",
            Self::InvalidHashFormat(_) => "Invalid hash format",
            Self::UploadError(_) => "Could not store the uploaded file",
            Self::MailError(_) => "Could not send email",
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(err) => write!(f, "database error: {err}"),
            Self::InvalidHashFormat(err) => write!(f, "invalid hash format: {err}"),
            Self::UploadError(err) => write!(f, "upload error: {err}"),
            Self::MailError(msg) => write!(f, "mail error: {msg}"),
            other => f.write_str(other.message()),
        }
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        (status, views::error_page(status, self.message())).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        error!("Database error: {:?}", err);
        Self::DatabaseError(err)
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(err: argon2::password_hash::Error) -> Self {
        error!("Invalid hash format");
        Self::InvalidHashFormat(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        error!("Upload error: {:?}", err);
        Self::UploadError(err)
    }
}

impl From<axum::extract::multipart::MultipartError> for Error {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        Self::BadRequest(err.body_text())
    }
}

impl From<lettre::address::AddressError> for Error {
    fn from(err: lettre::address::AddressError) -> Self {
        Self::MailError(format!("invalid address: {err}"))
    }
}

impl From<lettre::error::Error> for Error {
    fn from(err: lettre::error::Error) -> Self {
        Self::MailError(format!("could not build message: {err}"))
    }
}

impl From<lettre::transport::smtp::Error> for Error {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        Self::MailError(format!("smtp: {err}"))
    }
}

/// Picks the first human readable message out of a validator report.
pub fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid input".to_string())
}
