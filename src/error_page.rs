//! Full HTML pages shown instead of a view when something goes wrong.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// A page naming the HTTP status and what the user can do about it.
#[derive(Debug, Clone, Copy)]
pub struct ErrorPage<'a> {
    pub status: StatusCode,
    pub title: &'a str,
    pub description: &'a str,
    pub fix: &'a str,
}

impl ErrorPage<'static> {
    pub const NOT_FOUND: Self = Self {
        status: StatusCode::NOT_FOUND,
        title: "Not Found",
        description: "Something's missing.",
        fix: "Sorry, we can't find that page. Head back to the list of transactions.",
    };

    pub const INTERNAL_SERVER_ERROR: Self = Self {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        title: "Internal Server Error",
        description: "Sorry, something went wrong.",
        fix: "Try again later or check the server logs",
    };
}

impl IntoResponse for ErrorPage<'_> {
    fn into_response(self) -> Response {
        let markup = error_view(self.title, self.status.as_str(), self.description, self.fix);

        (self.status, markup).into_response()
    }
}

/// The fallback for routes that do not exist.
pub async fn get_404_not_found() -> Response {
    ErrorPage::NOT_FOUND.into_response()
}
