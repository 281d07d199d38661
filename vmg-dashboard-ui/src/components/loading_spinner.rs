//! Loading spinner component.

use dioxus::prelude::*;

/// Simple loading indicator, in the site's French.
#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 32px; color: #667;",
            "Chargement des données..."
        }
    }
}
