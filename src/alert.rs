//! Alert messages shown to users when a form submission fails.
//!
//! Alerts are HTML fragments that htmx swaps into the `#alert-container`
//! element of the base page.

use maud::{Markup, html};

/// An error message and the details needed to act on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorAlert {
    /// The headline.
    pub message: String,
    /// What went wrong, may be empty.
    pub details: String,
}

impl ErrorAlert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        html!(
            div class="alert alert-error" role="alert"
            {
                p class="alert-message" { (self.message) }

                @if !self.details.is_empty() {
                    p class="alert-details" { (self.details) }
                }

                button
                    type="button"
                    class="alert-dismiss"
                    aria-label="Dismiss"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        )
    }
}
