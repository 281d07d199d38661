//! VeloMagg Statistics Dashboard
//!
//! Renders the statistics page of the VeloMagg site: the headline stat
//! cards, the section navigation with its scrollspy highlight, and the
//! embedded visualization frames.
//!
//! Data flow:
//! 1. On mount, the refresh time is stamped, a scroll listener starts
//!    feeding the nav highlight, and every embedded iframe gets a
//!    load-failure fallback panel.
//! 2. A refresh cycle loads the headline summary through three tiers:
//!    the local snapshot, then live API aggregation, then built-in
//!    defaults. The page always ends up showing something.
//! 3. The renderer fades the fresh values into the stat card slots and
//!    stamps the refresh time in French locale.
//! 4. A new cycle starts every five minutes. A cycle still in flight is
//!    never overlapped; the tick is skipped and logged instead.

use dioxus::prelude::*;
use vmg_core::error::LoadError;
use vmg_core::nav::compute_active_section;
use vmg_core::snapshot::{self, SNAPSHOT_PATH};
use vmg_core::station::StationRecord;
use vmg_core::stats::{self, StatsSource, StatsSummary};
use vmg_dashboard_ui::browser;
use vmg_dashboard_ui::components::{EmbedFrame, LoadingSpinner, NavLink, StatCard};
use vmg_dashboard_ui::state::AppState;

/// Live station feed of the Montpellier open-data portal.
const STATIONS_URL: &str = "https://portail-api-data.montpellier3m.fr/bikestation";

/// Milliseconds between two refresh cycles.
const REFRESH_INTERVAL_MS: i32 = 5 * 60 * 1000;

/// Slot taking the refresh timestamp.
const LAST_UPDATE_SLOT: &str = "last-update";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("stats-dashboard-root"))
        .launch(App);
}

async fn load_snapshot() -> Result<StatsSummary, LoadError> {
    let text = browser::fetch_text(SNAPSHOT_PATH).await?;
    snapshot::parse_snapshot(&text)
}

async fn load_live() -> Result<StatsSummary, LoadError> {
    let text = browser::fetch_text(STATIONS_URL).await?;
    let records: Vec<StationRecord> =
        serde_json::from_str(&text).map_err(|e| LoadError::Parse(e.to_string()))?;
    Ok(stats::aggregate(&records))
}

/// Load the headline summary through the tiers, tagging where it came from.
async fn load_summary() -> (StatsSummary, StatsSource) {
    match load_snapshot().await {
        Ok(summary) => (summary, StatsSource::Snapshot),
        Err(snapshot_err) => {
            log::warn!("Snapshot unavailable: {}", snapshot_err);
            match load_live().await {
                Ok(summary) => (summary, StatsSource::LiveApi),
                Err(live_err) => {
                    log::warn!("Live API unavailable: {}", live_err);
                    (StatsSummary::fallback(), StatsSource::Defaults)
                }
            }
        }
    }
}

/// Fade the summary into the stat card slots and stamp the refresh time.
fn render_summary(summary: &StatsSummary) {
    browser::fade_slot_text(
        "total-stations".to_string(),
        stats::format_count(summary.total_stations),
    );
    browser::fade_slot_text(
        "total-bikes".to_string(),
        stats::format_count(summary.total_bikes),
    );
    browser::fade_slot_text(
        "occupation-rate".to_string(),
        stats::format_occupancy(summary.average_occupancy),
    );
    browser::stamp_slot_with_time(LAST_UPDATE_SLOT);
}

/// One refresh cycle. Skipped entirely when the previous one is still
/// running so slow responses never race on the display slots.
async fn refresh(mut state: AppState) {
    if *state.refresh_in_flight.peek() {
        log::info!("Refresh still in flight, skipping this cycle");
        return;
    }
    state.refresh_in_flight.set(true);

    let (summary, source) = load_summary().await;
    render_summary(&summary);
    log::info!(
        "Displayed stats from {}: {} stations, {} bikes, occupancy {}",
        source,
        summary.total_stations,
        summary.total_bikes,
        stats::format_occupancy(summary.average_occupancy)
    );

    state.stats_source.set(Some(source));
    state.loading.set(false);
    state.refresh_in_flight.set(false);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // Scrollspy listener and iframe fallbacks, once the page exists. The
    // timestamp slot is stamped right away, before the first load lands.
    use_effect(move || {
        web_sys::console::log_1(&"[VMG Debug] dashboard-stats mounted".into());
        browser::stamp_slot_with_time(LAST_UPDATE_SLOT);
        browser::on_window_scroll(move || {
            let sections = browser::measure_sections();
            let offset = browser::page_y_offset();
            let active = compute_active_section(offset, &sections).map(|s| s.to_string());
            if *state.active_section.peek() != active {
                state.active_section.set(active);
            }
        });
        browser::install_frame_fallbacks();
    });

    // Refresh ticks: immediate first cycle, then a fixed five-minute
    // cadence. Each tick runs as its own task; `refresh` skips the tick
    // when the previous cycle has not finished.
    use_future(move || async move {
        loop {
            wasm_bindgen_futures::spawn_local(refresh(state));
            browser::sleep_ms(REFRESH_INTERVAL_MS).await;
        }
    });

    rsx! {
        div {
            class: "stats-dashboard",

            nav {
                class: "navbar sticky-top",
                div {
                    class: "navbar-brand",
                    "VéloMagg Montpellier"
                }
                div {
                    class: "nav-links d-flex gap-3",
                    NavLink { section: "apercu".to_string(), label: "Aperçu".to_string() }
                    NavLink { section: "carte".to_string(), label: "Carte".to_string() }
                    NavLink { section: "analyses".to_string(), label: "Analyses".to_string() }
                    NavLink { section: "donnees".to_string(), label: "Données".to_string() }
                }
            }

            main {
                section {
                    id: "apercu",
                    class: "py-4",
                    h2 { class: "h4 mb-3", "Aperçu du réseau" }
                    div {
                        class: "stat-cards d-flex gap-3 flex-wrap",
                        StatCard {
                            slot_id: "total-stations".to_string(),
                            label: "Stations".to_string(),
                        }
                        StatCard {
                            slot_id: "total-bikes".to_string(),
                            label: "Vélos disponibles".to_string(),
                        }
                        StatCard {
                            slot_id: "occupation-rate".to_string(),
                            label: "Taux d'occupation".to_string(),
                        }
                    }
                    if (state.loading)() {
                        LoadingSpinner {}
                    }
                    p {
                        class: "text-muted mt-3",
                        "Dernière mise à jour : "
                        span { id: "last-update", "--" }
                    }
                    if let Some(source) = (state.stats_source)() {
                        p {
                            class: "text-muted small",
                            "Source des données : {source}"
                        }
                    }
                }

                section {
                    id: "carte",
                    class: "py-4",
                    h2 { class: "h4 mb-3", "Carte des stations" }
                    EmbedFrame {
                        title: "Carte interactive du réseau".to_string(),
                        src: "visualizations/carte_stations.html".to_string(),
                        height: 600,
                    }
                }

                section {
                    id: "analyses",
                    class: "py-4",
                    h2 { class: "h4 mb-3", "Analyses" }
                    EmbedFrame {
                        title: "Tableau de bord interactif".to_string(),
                        src: "visualizations/dashboard_interactif.html".to_string(),
                        height: 700,
                    }
                }

                section {
                    id: "donnees",
                    class: "py-4",
                    h2 { class: "h4 mb-3", "Données" }
                    p {
                        "Les statistiques affichées proviennent du jeu de données "
                        "ouvert de Montpellier Méditerranée Métropole, actualisées "
                        "toutes les cinq minutes."
                    }
                    ul {
                        li {
                            a {
                                href: "data/velomagg_analysis_stats.json",
                                "Rapport statistique (JSON)"
                            }
                        }
                        li {
                            a {
                                href: "data/velomagg_analysis.csv",
                                "Données par station (CSV)"
                            }
                        }
                    }
                }
            }
        }
    }
}
