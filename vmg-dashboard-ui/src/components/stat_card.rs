//! Stat card showing one headline number with its label.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct StatCardProps {
    /// DOM id of the value slot the stats renderer writes into
    pub slot_id: String,
    pub label: String,
    /// Placeholder shown until the first refresh lands
    #[props(default = String::from("--"))]
    pub initial: String,
}

/// One dashboard card. The value is a DOM slot filled by the renderer
/// rather than a signal, so the fade transition can drive it directly.
#[component]
pub fn StatCard(props: StatCardProps) -> Element {
    rsx! {
        div {
            class: "stat-card text-center p-3",
            div {
                class: "stat-value",
                id: "{props.slot_id}",
                "{props.initial}"
            }
            div {
                class: "stat-label",
                "{props.label}"
            }
        }
    }
}
