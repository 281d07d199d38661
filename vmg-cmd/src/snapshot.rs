//! Snapshot command: fetch live stations and write the analysis report JSON.

use chrono::Local;
use log::info;

use vmg_core::api::VelomaggClient;
use vmg_core::stats::{self, format_occupancy};

/// Fetch every station from the open-data API, aggregate the full analysis
/// report and write it to `output`.
///
/// The written file is the document the dashboard reads back as its first
/// tier, so the `general` section must stay shaped like `StatsSummary`.
pub async fn run_snapshot(output: &str, pretty: bool) -> anyhow::Result<()> {
    let client = VelomaggClient::new()?;
    let records = client.fetch_stations().await?;
    info!("Fetched {} stations", records.len());

    let mut report = stats::build_report(&records);
    report.generated_at = Some(Local::now().format("%Y-%m-%dT%H:%M:%S").to_string());

    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    std::fs::write(output, json)?;

    info!(
        "Snapshot complete. {} stations ({} working), {} bikes, occupancy {}. Output: {}",
        report.general.summary.total_stations,
        report.general.working_stations,
        report.general.summary.total_bikes,
        format_occupancy(report.general.summary.average_occupancy),
        output
    );
    Ok(())
}
