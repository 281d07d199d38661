//! Shared Dioxus components and browser bindings for VeloMagg site apps.
//!
//! This crate provides:
//! - `browser`: typed web-sys wrappers for fetch, stat slots, scrolling and
//!   iframe fallbacks
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (nav links, stat cards, frames)

pub mod browser;
pub mod components;
pub mod state;
