//! Implements the 500 Internal Server Error page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::Markup;

use crate::html::error_view;

/// The 500 Internal Server Error page.
pub struct InternalServerError<'a> {
    /// A short description of what went wrong.
    pub description: &'a str,
    /// A suggestion for how the user can fix the error.
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

impl InternalServerError<'_> {
    fn into_html(self) -> Markup {
        error_view("Internal Server Error", "500", self.description, self.fix)
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(self.into_html().into_string()),
        )
            .into_response()
    }
}

/// Route handler for displaying the internal server error page.
pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}
