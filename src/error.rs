//! Defines the app level error type and conversions to JSON bodies, rendered HTML pages and alerts.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    alert::ErrorAlert, error_page::ErrorPage, transaction::ValidationError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more fields of a candidate transaction are missing or invalid.
    #[error("invalid transaction: {0}")]
    Validation(ValidationError),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The request body could not be parsed.
    ///
    /// The string describes what was wrong and is safe to show to the client.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<ValidationError> for Error {
    fn from(value: ValidationError) -> Self {
        Error::Validation(value)
    }
}

/// Errors from the JSON API are answered with a JSON body.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": "Not found." })),
            )
                .into_response(),
            Error::MalformedBody(detail) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "A server error occurred." })),
                )
                    .into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into a full HTML error page.
    pub fn into_page_response(self) -> Response {
        match self {
            Error::NotFound => ErrorPage::NOT_FOUND.into_response(),
            Error::DatabaseLockError => ErrorPage::INTERNAL_SERVER_ERROR.into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ErrorPage::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }

    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorAlert {
                    message: "Could not save transaction".to_owned(),
                    details: errors.to_string(),
                },
            ),
            Error::MalformedBody(detail) => (
                StatusCode::BAD_REQUEST,
                ErrorAlert {
                    message: "Could not read the form".to_owned(),
                    details: detail,
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorAlert {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}
