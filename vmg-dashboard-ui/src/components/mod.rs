//! Reusable Dioxus RSX components for the VeloMagg site apps.

mod embed_frame;
mod error_display;
mod loading_spinner;
mod nav_link;
mod stat_card;

pub use embed_frame::EmbedFrame;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use nav_link::NavLink;
pub use stat_card::StatCard;
