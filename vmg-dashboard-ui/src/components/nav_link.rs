//! Navigation link with scrollspy highlighting and smooth scrolling.

use crate::browser;
use crate::state::AppState;
use dioxus::prelude::*;
use vmg_core::nav;

#[derive(Props, Clone, PartialEq)]
pub struct NavLinkProps {
    /// Section id this link targets (without the leading '#')
    pub section: String,
    pub label: String,
}

/// Anchor link that smooth-scrolls to its section, keeping the fixed
/// header clear, and carries the scrollspy highlight class.
#[component]
pub fn NavLink(props: NavLinkProps) -> Element {
    let mut state = use_context::<AppState>();
    let active = (state.active_section)().as_deref() == Some(props.section.as_str());
    let class = if active { "nav-link active" } else { "nav-link" };
    let section = props.section.clone();

    let on_click = move |evt: Event<MouseData>| {
        evt.prevent_default();
        // Links to sections missing from the page do nothing.
        if let Some(top) = browser::section_top(&section) {
            browser::smooth_scroll_to(nav::scroll_target(top));
            state.active_section.set(Some(section.clone()));
        }
    };

    rsx! {
        a {
            class: "{class}",
            href: "#{props.section}",
            onclick: on_click,
            "{props.label}"
        }
    }
}
