//! Implements the 404 Not Found page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// Renders the 404 Not Found page as a response.
pub fn get_404_not_found_response() -> Response {
    let markup = error_view(
        "Not Found",
        "404",
        "Page not found",
        "Sorry, we can't find that page. You'll find lots to explore on the home page.",
    );

    (StatusCode::NOT_FOUND, Html(markup.into_string())).into_response()
}

/// Route handler for the 404 Not Found page.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}
