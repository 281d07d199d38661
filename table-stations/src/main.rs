//! Live VeloMagg Stations Table
//!
//! Standalone page app listing every station on the network with its
//! current counts, sortable by occupancy, capacity or name.
//!
//! Data flow:
//! 1. On mount, the live station feed is fetched once and flattened into
//!    table rows.
//! 2. Changing the sort mode re-renders the table reactively; no second
//!    fetch is needed.

use dioxus::prelude::*;
use vmg_core::error::LoadError;
use vmg_core::station::{StationRecord, StationStatus};
use vmg_core::stats::format_occupancy;
use vmg_dashboard_ui::browser;
use vmg_dashboard_ui::components::{ErrorDisplay, LoadingSpinner};
use vmg_dashboard_ui::state::AppState;

/// Live station feed of the Montpellier open-data portal.
const STATIONS_URL: &str = "https://portail-api-data.montpellier3m.fr/bikestation";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("stations-table-root"))
        .launch(App);
}

async fn load_stations() -> Result<Vec<StationStatus>, LoadError> {
    let text = browser::fetch_text(STATIONS_URL).await?;
    let records: Vec<StationRecord> =
        serde_json::from_str(&text).map_err(|e| LoadError::Parse(e.to_string()))?;
    Ok(records.iter().map(StationStatus::from_record).collect())
}

fn sorted_rows(mut rows: Vec<StationStatus>, mode: &str) -> Vec<StationStatus> {
    match mode {
        "name" => rows.sort_by(|a, b| a.address.cmp(&b.address)),
        "capacity" => rows.sort_by(|a, b| b.total_slots.cmp(&a.total_slots)),
        _ => rows.sort_by(|a, b| {
            b.occupancy_rate
                .partial_cmp(&a.occupancy_rate)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
    }
    rows
}

fn status_fr(status: &str) -> &str {
    match status {
        "working" => "En service",
        "outOfService" => "Hors service",
        "unknown" => "Inconnu",
        other => other,
    }
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    use_future(move || async move {
        match load_stations().await {
            Ok(rows) => {
                web_sys::console::log_1(
                    &format!("[VMG Debug] table-stations: {} stations loaded", rows.len()).into(),
                );
                state.stations.set(rows);
                state.loading.set(false);
            }
            Err(e) => {
                log::error!("Failed to load stations: {}", e);
                state.error_msg.set(Some(e.to_string()));
                state.loading.set(false);
            }
        }
    });

    let rows = sorted_rows(state.stations.read().clone(), &(state.sort_mode)());

    rsx! {
        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            h2 { class: "h4 mb-3", "Stations VéloMagg en direct" }

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay { message: err }
            } else if (state.loading)() {
                LoadingSpinner {}
            } else {
                SortSelector {}
                table {
                    class: "table table-striped",
                    thead {
                        tr {
                            th { "Station" }
                            th { "Vélos" }
                            th { "Places libres" }
                            th { "Capacité" }
                            th { "Occupation" }
                            th { "Utilisation" }
                            th { "Statut" }
                        }
                    }
                    tbody {
                        for row in rows.iter() {
                            tr {
                                key: "{row.id}",
                                td { "{row.address}" }
                                td { "{row.available_bikes}" }
                                td { "{row.free_slots}" }
                                td { "{row.total_slots}" }
                                td { {format_occupancy(row.occupancy_rate)} }
                                td { {format_occupancy(row.utilization_rate)} }
                                td { {status_fr(&row.status)} }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Dropdown selector for the table sort mode.
#[component]
fn SortSelector() -> Element {
    let mut state = use_context::<AppState>();
    let current = (state.sort_mode)();

    let on_change = move |evt: Event<FormData>| {
        state.sort_mode.set(evt.value());
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "station-sort",
                style: "font-weight: bold; margin-right: 8px;",
                "Trier par : "
            }
            select {
                id: "station-sort",
                onchange: on_change,
                option {
                    value: "occupancy",
                    selected: current == "occupancy",
                    "Taux d'occupation"
                }
                option {
                    value: "capacity",
                    selected: current == "capacity",
                    "Capacité"
                }
                option {
                    value: "name",
                    selected: current == "name",
                    "Nom"
                }
            }
        }
    }
}
