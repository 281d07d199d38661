//! Reactive application state shared through Dioxus context.
//!
//! `AppState` gathers every signal the site apps read into one Copy struct
//! provided via `use_context_provider`; components grab it with
//! `use_context::<AppState>()`. Both apps share the type even though each
//! only drives part of it.

use dioxus::prelude::*;
use vmg_core::station::StationStatus;
use vmg_core::stats::StatsSource;

/// Shared application state for the VeloMagg site apps.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Section id currently highlighted in the navigation bar
    pub active_section: Signal<Option<String>>,
    /// Set while a stats refresh cycle is running
    pub refresh_in_flight: Signal<bool>,
    /// Which tier served the currently displayed summary
    pub stats_source: Signal<Option<StatsSource>>,
    /// Station rows for the stations table
    pub stations: Signal<Vec<StationStatus>>,
    /// Sort mode for the stations table ("occupancy", "capacity", "name")
    pub sort_mode: Signal<String>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            active_section: Signal::new(None),
            refresh_in_flight: Signal::new(false),
            stats_source: Signal::new(None),
            stations: Signal::new(Vec::new()),
            sort_mode: Signal::new("occupancy".to_string()),
        }
    }
}
