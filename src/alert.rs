//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered into the `#alert-container` element via an HTMX
//! out-of-band swap, so they can be returned from any endpoint without the
//! caller knowing where the alert is displayed.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

/// Alert message types for styling
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertType {
    Success,
    Error,
}

/// Renders alert messages with appropriate styling
pub struct Alert<'a> {
    pub alert_type: AlertType,
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new success alert
    #[allow(dead_code)]
    pub fn success(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Success,
            message,
            details,
        }
    }

    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Error,
            message,
            details,
        }
    }

    fn into_html(self) -> Markup {
        let (container_style, heading_style) = match self.alert_type {
            AlertType::Success => (
                "p-4 mb-4 rounded-lg bg-green-50 dark:bg-gray-800 text-green-800 dark:text-green-400",
                "font-medium",
            ),
            AlertType::Error => (
                "p-4 mb-4 rounded-lg bg-red-50 dark:bg-gray-800 text-red-800 dark:text-red-400",
                "font-medium",
            ),
        };

        html! {
            div id="alert-container" hx-swap-oob="true" class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div class=(container_style) role="alert"
                {
                    span class=(heading_style) { (self.message) }

                    @if !self.details.is_empty() {
                        p { (self.details) }
                    }
                }
            }
        }
    }

    /// Render the alert as a full response with `status`.
    pub fn into_response(self, status: StatusCode) -> Response {
        (status, Html(self.into_html().into_string())).into_response()
    }
}
