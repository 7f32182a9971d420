//! Alert system for displaying error messages to users.
//!
//! Alerts are rendered as HTML fragments and swapped into the page's
//! `#alert-container` by htmx.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// A dismissable message shown at the bottom of the page.
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    pub fn into_html(self) -> Markup {
        html! {
            div
                class="p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
                    dark:bg-gray-800 dark:text-red-400 shadow-lg"
                role="alert"
                data-alert-type="error"
            {
                div class="flex justify-between items-start gap-4"
                {
                    div
                    {
                        span class="font-medium" { (self.message) }

                        @if !self.details.is_empty() {
                            p class="mt-1" { (self.details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Close"
                        class="font-bold"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }

    /// Render the alert as a response with `status_code`.
    pub fn into_response_with_status(self, status_code: StatusCode) -> Response {
        (status_code, self.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_renders_message_and_details() {
        let markup = Alert::error("Could not add transaction", "Amount must be positive.")
            .into_html()
            .into_string();
        let fragment = Html::parse_fragment(&markup);

        let alert = fragment
            .select(&Selector::parse("[role=alert]").unwrap())
            .next()
            .expect("alert element missing");
        assert_eq!(alert.value().attr("data-alert-type"), Some("error"));

        let text = alert.text().collect::<String>();
        assert!(text.contains("Could not add transaction"));
        assert!(text.contains("Amount must be positive."));
    }

    #[test]
    fn empty_details_are_omitted() {
        let markup = Alert::error("Done", "").into_html().into_string();
        let fragment = Html::parse_fragment(&markup);

        let paragraphs = fragment.select(&Selector::parse("p").unwrap()).count();
        assert_eq!(paragraphs, 0);
    }

    #[test]
    fn response_uses_given_status() {
        let response =
            Alert::error("Bad", "Request").into_response_with_status(StatusCode::BAD_REQUEST);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
