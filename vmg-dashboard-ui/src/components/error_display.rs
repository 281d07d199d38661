//! Error display component.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
}

/// Displays an error message in a styled box, in the site's French.
#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            style: "padding: 12px 16px; margin: 8px 0; background: #FDECEA; color: #B71C1C; border-radius: 6px; border: 1px solid #F5C6CB;",
            strong { "Erreur : " }
            "{props.message}"
        }
    }
}
