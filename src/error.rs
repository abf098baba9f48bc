use actix_web::body::BoxBody;
use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures raised by the repositories.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,
    #[error("No content matches the given title")]
    ContentNotFound,
    #[error("No record matches the given name")]
    AttributeNotFound,
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("Couldn't get db connection from pool: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("Blocking task was cancelled")]
    Blocking(#[from] BlockingError),
    #[error("An unspecified internal error ocurred: {0}")]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    /// Converts into the client-facing error. Every not-found flavour maps to
    /// `not_found`; anything else is logged and answered with `failed`.
    pub fn respond(self, not_found: &'static str, failed: &'static str) -> ApiError {
        match self {
            StoreError::NotFound | StoreError::ContentNotFound | StoreError::AttributeNotFound => {
                ApiError::NotFound(not_found)
            }
            other => {
                log::error!("{}: {}", failed, other);
                ApiError::Internal(failed)
            }
        }
    }
}

/// Runs a repository call on the blocking thread pool.
pub async fn blocking<T, F>(f: F) -> StoreResult<T>
where
    F: FnOnce() -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(f).await?
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Internal(&'static str),
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(value: &ApiError) -> Self {
        Self {
            error: value.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code()).json(ErrorResponse::from(self))
    }
}

/// JSON body shared by every association write.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
