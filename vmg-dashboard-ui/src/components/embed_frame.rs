//! Embedded visualization frame with heading.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct EmbedFrameProps {
    pub title: String,
    /// Site-relative document the frame embeds
    pub src: String,
    #[props(default = 600)]
    pub height: u32,
}

/// An embedded HTML visualization (map, chart pages) with a heading.
/// `browser::install_frame_fallbacks` swaps the frame for a warning panel
/// when the embedded document fails to load.
#[component]
pub fn EmbedFrame(props: EmbedFrameProps) -> Element {
    rsx! {
        div {
            class: "embed-frame mb-4",
            h3 {
                class: "h5 mb-3",
                "{props.title}"
            }
            iframe {
                src: "{props.src}",
                title: "{props.title}",
                "loading": "lazy",
                style: "width: 100%; height: {props.height}px; border: none; border-radius: 8px;",
            }
        }
    }
}
