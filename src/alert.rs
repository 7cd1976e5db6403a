//! Alert messages for displaying errors to users.
//!
//! Alerts are swapped into the fixed alert container at the bottom of the
//! page when an htmx request fails outside of a form, so the page the user
//! is on stays intact.

use maud::{Markup, html};

/// Render a dismissable error alert with a `message` headline and `details`.
pub(crate) fn error_alert(message: &str, details: &str) -> Markup {
    html! {
        div
            role="alert"
            class="flex items-start gap-3 rounded border border-red-300 bg-red-50 \
                p-4 text-red-800 shadow-lg dark:border-red-800 dark:bg-gray-800 dark:text-red-400"
        {
            div class="flex-1"
            {
                p class="font-medium" { (message) }

                @if !details.is_empty() {
                    p class="text-sm mt-1" { (details) }
                }
            }

            button
                type="button"
                aria-label="Dismiss"
                class="font-bold cursor-pointer"
                onclick="this.closest('[role=alert]').remove()"
            {
                "✕"
            }
        }
    }
}
