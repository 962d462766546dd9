use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, error::UrlencodedError};
use campground_store::StoreError;

use crate::schema::Violations;
use crate::views;

/// Message shown for any failure that does not carry its own
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong!";

/// Every failure a handler can produce. All of them are rendered by the
/// single `ResponseError` implementation below.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Submitted data failed the schema
    #[error("{0}")]
    Validation(String),

    /// The requested page or record does not exist
    #[error("{0}")]
    NotFound(String),

    /// The store failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    /// The error used when a campground id does not resolve to a record
    pub fn campground_not_found() -> Self {
        AppError::NotFound("Campground not found".to_string())
    }

    /// The error used when no route matches
    pub fn page_not_found() -> Self {
        AppError::NotFound("Page not found!".to_string())
    }

    /// Message shown to the user. Internal failures never leak their cause.
    pub fn user_message(&self) -> String {
        let message = match self {
            AppError::Validation(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Store(StoreError::Invalid(errors)) => errors.to_string(),
            AppError::Store(StoreError::InvalidBatch { .. }) => self.to_string(),
            AppError::Store(_) => String::new(),
        };

        if message.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl From<Violations> for AppError {
    fn from(violations: Violations) -> Self {
        AppError::Validation(violations.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::Invalid(_) | StoreError::InvalidBatch { .. }) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("❌ {}", self);
        } else {
            log::debug!("Request rejected with {}: {}", status, self);
        }

        HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(views::error_page(status, &self.user_message()))
    }
}

/// Fallback for any path or method that no route handles
pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::page_not_found())
}

/// Routes malformed form bodies through `AppError` so they render like every other failure
pub fn form_error_handler(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Validation(format!("Invalid form data: {}", err)).into()
}
