//! Export command: fetch live stations and write one CSV row per station.

use log::info;

use vmg_core::api::VelomaggClient;
use vmg_core::station::{StationRecord, StationStatus};

/// Fetch every station and export the flattened rows as CSV.
pub async fn run_export(stations_csv: &str) -> anyhow::Result<()> {
    let client = VelomaggClient::new()?;
    let records = client.fetch_stations().await?;
    info!("Fetched {} stations", records.len());

    let rows = status_rows(&records);
    let mut writer = csv::Writer::from_path(stations_csv)?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(
        "Export complete. {} rows written to {}",
        rows.len(),
        stations_csv
    );
    Ok(())
}

fn status_rows(records: &[StationRecord]) -> Vec<StationStatus> {
    records.iter().map(StationStatus::from_record).collect()
}

#[cfg(test)]
mod tests {
    use super::status_rows;

    static SAMPLE_STATIONS: &str = include_str!("../../fixtures/bikestation.json");

    #[test]
    fn test_rows_serialize_with_headers() {
        let records: Vec<vmg_core::station::StationRecord> =
            serde_json::from_str(SAMPLE_STATIONS).unwrap();
        let rows = status_rows(&records);
        assert_eq!(rows.len(), 4);

        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &rows {
            writer.serialize(row).unwrap();
        }
        let bytes = writer.into_inner().unwrap();
        let csv_text = String::from_utf8(bytes).unwrap();
        let mut lines = csv_text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,address,locality,available_bikes,free_slots,total_slots,status,latitude,longitude,last_update,occupancy_rate,utilization_rate"
        );
        assert!(csv_text.contains("Rue Jules Ferry - Gare Saint-Roch"));
        // Stations without a bike counter carry the N/A timestamp marker.
        assert!(csv_text.contains("N/A"));
    }
}
