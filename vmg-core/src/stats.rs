//! Fleet-level statistics over VeloMagg station records.
//!
//! Data flow:
//! 1. `aggregate` reduces raw station records to the headline summary the
//!    dashboard cards display (stations, bikes, docks, occupancy).
//! 2. `build_report` wraps that summary with the distribution and extremes
//!    sections written to the exported analysis snapshot.
//! 3. The formatting helpers render values exactly as the site shows them.

use serde::{Deserialize, Serialize};

use crate::station::StationRecord;

/// Where a displayed summary came from, in fallback order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsSource {
    /// Pre-computed snapshot served next to the site
    Snapshot,
    /// Live aggregation over the open-data API
    LiveApi,
    /// Built-in values used when both sources are unavailable
    Defaults,
}

impl std::fmt::Display for StatsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StatsSource::Snapshot => "local snapshot",
            StatsSource::LiveApi => "live API",
            StatsSource::Defaults => "built-in defaults",
        };
        write!(f, "{}", name)
    }
}

/// Headline numbers rendered on the dashboard stat cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    #[serde(default)]
    pub total_stations: u32,
    #[serde(default)]
    pub total_bikes: u32,
    /// Total docks across the network
    #[serde(default)]
    pub total_capacity: u32,
    /// Network-wide occupancy ratio in [0, 1]
    #[serde(default)]
    pub average_occupancy: f64,
}

impl StatsSummary {
    /// Values shown when neither the snapshot nor the live API responds.
    pub fn fallback() -> Self {
        StatsSummary {
            total_stations: 20,
            total_bikes: 113,
            total_capacity: 0,
            average_occupancy: 0.426,
        }
    }
}

/// Reduce raw station records to the headline summary.
///
/// Missing or negative counters count as zero. Occupancy is total bikes
/// over total docks, clamped to [0, 1], and zero for an empty or
/// dock-less network.
pub fn aggregate(records: &[StationRecord]) -> StatsSummary {
    let mut bikes = 0.0f64;
    let mut capacity = 0.0f64;
    for record in records {
        bikes += record.available_bikes();
        capacity += record.capacity();
    }
    let average_occupancy = if capacity > 0.0 {
        (bikes / capacity).clamp(0.0, 1.0)
    } else {
        0.0
    };
    StatsSummary {
        total_stations: records.len() as u32,
        total_bikes: bikes.round() as u32,
        total_capacity: capacity.round() as u32,
        average_occupancy,
    }
}

/// Format an occupancy ratio the way the dashboard displays it,
/// e.g. 0.425 -> "42.5%".
pub fn format_occupancy(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// French-style digit grouping with narrow no-break spaces,
/// e.g. 2450 -> "2\u{202F}450".
pub fn format_count(value: u32) -> String {
    let digits = value.to_string();
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push('\u{202F}');
        }
        out.push(*b as char);
    }
    out
}

/// Mean, spread and range of one per-station quantity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueDistribution {
    pub mean: f64,
    /// Sample standard deviation (n - 1), zero for fewer than two values
    pub std: f64,
    pub min: f64,
    pub max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quartiles: Option<Quartiles>,
}

/// Linearly interpolated quartiles of a per-station quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
}

/// Per-station spread of bikes and docks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionStats {
    pub bikes_per_station: ValueDistribution,
    pub capacity_per_station: ValueDistribution,
}

/// General section of the analysis report.
///
/// Extends the dashboard summary with the report-only fields the exported
/// document has always carried. The dashboard deserializes the same JSON
/// object as a plain `StatsSummary` and ignores the extras.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralStats {
    #[serde(flatten)]
    pub summary: StatsSummary,
    /// Stations currently reporting the "working" status
    #[serde(default)]
    pub working_stations: u32,
    /// Median of per-station occupancy rates, over stations reporting docks
    #[serde(default)]
    pub median_occupancy: f64,
}

/// One station singled out by the extremes section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremeStation {
    pub id: String,
    /// Street address, falling back to the station id when absent
    pub label: String,
    /// The value that made the station extreme (ratio or dock count)
    pub value: f64,
}

/// Network extremes: fullest, emptiest, largest and smallest stations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtremeStations {
    pub most_occupied: Option<ExtremeStation>,
    pub least_occupied: Option<ExtremeStation>,
    pub largest_station: Option<ExtremeStation>,
    pub smallest_station: Option<ExtremeStation>,
}

/// Full analysis report written by the snapshot command.
///
/// The dashboard only consumes the `general` section; everything else is
/// for the exported artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub general: GeneralStats,
    pub distribution: DistributionStats,
    pub extremes: ExtremeStations,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

/// Build the full analysis report over a set of station records.
pub fn build_report(records: &[StationRecord]) -> StatsReport {
    let bikes: Vec<f64> = records.iter().map(|r| r.available_bikes()).collect();
    let capacities: Vec<f64> = records.iter().map(|r| r.capacity()).collect();
    let working = records
        .iter()
        .filter(|r| r.status_label() == "working")
        .count() as u32;
    StatsReport {
        general: GeneralStats {
            summary: aggregate(records),
            working_stations: working,
            median_occupancy: median_occupancy_of(records),
        },
        distribution: DistributionStats {
            bikes_per_station: distribution_of(&bikes, true),
            capacity_per_station: distribution_of(&capacities, false),
        },
        extremes: extremes_of(records),
        generated_at: None,
    }
}

/// Median per-station occupancy. Stations reporting no docks have no
/// defined rate and are left out, like in the occupancy extremes.
fn median_occupancy_of(records: &[StationRecord]) -> f64 {
    let mut rates: Vec<f64> = records
        .iter()
        .filter(|r| r.capacity() > 0.0)
        .map(|r| r.occupancy_rate())
        .collect();
    rates.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    quantile(&rates, 0.5)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Linearly interpolated quantile over already-sorted values.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let pos = q * (n - 1) as f64;
            let lower = pos.floor() as usize;
            let upper = pos.ceil() as usize;
            if lower == upper {
                sorted[lower]
            } else {
                let frac = pos - lower as f64;
                sorted[lower] + (sorted[upper] - sorted[lower]) * frac
            }
        }
    }
}

fn distribution_of(values: &[f64], with_quartiles: bool) -> ValueDistribution {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mean_value = mean(&sorted);
    let quartiles = if with_quartiles {
        Some(Quartiles {
            q25: quantile(&sorted, 0.25),
            q50: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
        })
    } else {
        None
    };
    ValueDistribution {
        mean: mean_value,
        std: sample_std(&sorted, mean_value),
        min: sorted.first().copied().unwrap_or(0.0),
        max: sorted.last().copied().unwrap_or(0.0),
        quartiles,
    }
}

fn extreme_entry(record: &StationRecord, value: f64) -> ExtremeStation {
    ExtremeStation {
        id: record.id.clone(),
        label: record
            .street_address()
            .unwrap_or(record.id.as_str())
            .to_string(),
        value,
    }
}

/// Ties keep the first station in payload order, matching the exported
/// analysis the site historically served.
fn extremes_of(records: &[StationRecord]) -> ExtremeStations {
    let mut most: Option<(&StationRecord, f64)> = None;
    let mut least: Option<(&StationRecord, f64)> = None;
    // Occupancy extremes only make sense for stations that report docks.
    for record in records.iter().filter(|r| r.capacity() > 0.0) {
        let rate = record.occupancy_rate();
        match most {
            Some((_, best)) if rate <= best => {}
            _ => most = Some((record, rate)),
        }
        match least {
            Some((_, low)) if rate >= low => {}
            _ => least = Some((record, rate)),
        }
    }

    let mut largest: Option<(&StationRecord, f64)> = None;
    let mut smallest: Option<(&StationRecord, f64)> = None;
    for record in records {
        let capacity = record.capacity();
        match largest {
            Some((_, best)) if capacity <= best => {}
            _ => largest = Some((record, capacity)),
        }
        match smallest {
            Some((_, low)) if capacity >= low => {}
            _ => smallest = Some((record, capacity)),
        }
    }

    ExtremeStations {
        most_occupied: most.map(|(r, v)| extreme_entry(r, v)),
        least_occupied: least.map(|(r, v)| extreme_entry(r, v)),
        largest_station: largest.map(|(r, v)| extreme_entry(r, v)),
        smallest_station: smallest.map(|(r, v)| extreme_entry(r, v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::{Quantity, TextAttribute};

    fn quantity(value: f64) -> Quantity {
        Quantity {
            value: Some(value),
            ..Quantity::default()
        }
    }

    fn station(id: &str, bikes: Option<f64>, capacity: Option<f64>) -> StationRecord {
        StationRecord {
            id: id.to_string(),
            available_bike_number: bikes.map(quantity),
            total_slot_number: capacity.map(quantity),
            ..StationRecord::default()
        }
    }

    fn working_station(id: &str, bikes: f64, capacity: f64) -> StationRecord {
        StationRecord {
            status: Some(TextAttribute {
                value: Some("working".to_string()),
            }),
            ..station(id, Some(bikes), Some(capacity))
        }
    }

    #[test]
    fn test_aggregate_sums_and_occupancy() {
        let records = vec![
            station("a", Some(5.0), Some(10.0)),
            station("b", Some(3.0), Some(10.0)),
        ];
        let summary = aggregate(&records);
        assert_eq!(summary.total_stations, 2);
        assert_eq!(summary.total_bikes, 8);
        assert_eq!(summary.total_capacity, 20);
        assert!((summary.average_occupancy - 0.4).abs() < 1e-12);
        assert_eq!(format_occupancy(summary.average_occupancy), "40.0%");
    }

    #[test]
    fn test_aggregate_empty_network() {
        let summary = aggregate(&[]);
        assert_eq!(summary.total_stations, 0);
        assert_eq!(summary.total_bikes, 0);
        assert_eq!(summary.total_capacity, 0);
        assert_eq!(summary.average_occupancy, 0.0);
    }

    #[test]
    fn test_aggregate_missing_counters_count_as_zero() {
        let records = vec![
            station("a", None, Some(10.0)),
            station("b", Some(4.0), Some(10.0)),
        ];
        let summary = aggregate(&records);
        assert_eq!(summary.total_bikes, 4);
        assert_eq!(summary.total_capacity, 20);
        assert!((summary.average_occupancy - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_aggregate_clamps_overfull_network() {
        // Overloaded racks can report more bikes than docks.
        let records = vec![station("a", Some(15.0), Some(10.0))];
        let summary = aggregate(&records);
        assert_eq!(summary.average_occupancy, 1.0);
    }

    #[test]
    fn test_aggregate_dockless_network_has_zero_occupancy() {
        let records = vec![station("a", Some(5.0), None)];
        let summary = aggregate(&records);
        assert_eq!(summary.total_bikes, 5);
        assert_eq!(summary.total_capacity, 0);
        assert_eq!(summary.average_occupancy, 0.0);
    }

    #[test]
    fn test_live_payload_aggregation() {
        // The live tier feeds the raw /bikestation array straight in.
        let records: Vec<StationRecord> = serde_json::from_str(
            r#"[{"availableBikeNumber": {"value": 5}, "totalSlotNumber": {"value": 10}},
                {"availableBikeNumber": {"value": 3}, "totalSlotNumber": {"value": 10}}]"#,
        )
        .unwrap();
        let summary = aggregate(&records);
        assert_eq!(summary.total_stations, 2);
        assert_eq!(summary.total_bikes, 8);
        assert_eq!(summary.total_capacity, 20);
        assert_eq!(format_occupancy(summary.average_occupancy), "40.0%");
    }

    #[test]
    fn test_fallback_summary() {
        let fallback = StatsSummary::fallback();
        assert_eq!(fallback.total_stations, 20);
        assert_eq!(fallback.total_bikes, 113);
        assert_eq!(fallback.total_capacity, 0);
        assert_eq!(format_occupancy(fallback.average_occupancy), "42.6%");
    }

    #[test]
    fn test_format_occupancy() {
        assert_eq!(format_occupancy(0.425), "42.5%");
        assert_eq!(format_occupancy(0.0), "0.0%");
        assert_eq!(format_occupancy(1.0), "100.0%");
        assert_eq!(format_occupancy(21.0 / 52.0), "40.4%");
    }

    #[test]
    fn test_format_count_groups_thousands() {
        assert_eq!(format_count(113), "113");
        assert_eq!(format_count(2450), "2\u{202F}450");
        assert_eq!(format_count(1234567), "1\u{202F}234\u{202F}567");
        assert_eq!(format_count(0), "0");
    }

    #[test]
    fn test_stats_source_display() {
        assert_eq!(StatsSource::Snapshot.to_string(), "local snapshot");
        assert_eq!(StatsSource::LiveApi.to_string(), "live API");
        assert_eq!(StatsSource::Defaults.to_string(), "built-in defaults");
    }

    #[test]
    fn test_distribution_mean_std_quartiles() {
        let report = build_report(&[
            station("a", Some(9.0), Some(12.0)),
            station("b", Some(5.0), Some(16.0)),
            station("c", Some(0.0), Some(12.0)),
            station("d", Some(7.0), Some(12.0)),
        ]);
        let bikes = &report.distribution.bikes_per_station;
        assert!((bikes.mean - 5.25).abs() < 1e-9);
        assert!((bikes.std - 3.8622).abs() < 1e-4);
        assert_eq!(bikes.min, 0.0);
        assert_eq!(bikes.max, 9.0);
        let quartiles = bikes.quartiles.unwrap();
        assert!((quartiles.q25 - 3.75).abs() < 1e-9);
        assert!((quartiles.q50 - 6.0).abs() < 1e-9);
        assert!((quartiles.q75 - 7.5).abs() < 1e-9);

        let capacity = &report.distribution.capacity_per_station;
        assert!((capacity.mean - 13.0).abs() < 1e-9);
        assert_eq!(capacity.min, 12.0);
        assert_eq!(capacity.max, 16.0);
        assert!(capacity.quartiles.is_none());
    }

    #[test]
    fn test_extremes() {
        let report = build_report(&[
            station("a", Some(9.0), Some(12.0)),
            station("b", Some(5.0), Some(16.0)),
            station("c", Some(0.0), Some(12.0)),
            station("e", Some(0.0), None),
        ]);
        let extremes = &report.extremes;
        assert_eq!(extremes.most_occupied.as_ref().unwrap().id, "a");
        assert!((extremes.most_occupied.as_ref().unwrap().value - 0.75).abs() < 1e-9);
        // Station e has no docks, so it cannot win an occupancy extreme.
        assert_eq!(extremes.least_occupied.as_ref().unwrap().id, "c");
        assert_eq!(extremes.largest_station.as_ref().unwrap().id, "b");
        assert_eq!(extremes.largest_station.as_ref().unwrap().value, 16.0);
        assert_eq!(extremes.smallest_station.as_ref().unwrap().id, "e");
        assert_eq!(extremes.smallest_station.as_ref().unwrap().value, 0.0);
    }

    #[test]
    fn test_extreme_ties_keep_first() {
        let report = build_report(&[
            station("a", Some(6.0), Some(12.0)),
            station("b", Some(6.0), Some(12.0)),
        ]);
        let extremes = &report.extremes;
        assert_eq!(extremes.most_occupied.as_ref().unwrap().id, "a");
        assert_eq!(extremes.largest_station.as_ref().unwrap().id, "a");
    }

    #[test]
    fn test_general_section_counts_working_and_median() {
        let report = build_report(&[
            working_station("a", 9.0, 12.0),
            working_station("b", 4.0, 16.0),
            // Out of service, still counted in the totals.
            station("c", Some(0.0), Some(12.0)),
            // No docks: excluded from the median like from the extremes.
            station("d", Some(2.0), None),
        ]);
        assert_eq!(report.general.summary.total_stations, 4);
        assert_eq!(report.general.working_stations, 2);
        // Median over {0.0, 0.25, 0.75}.
        assert!((report.general.median_occupancy - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_general_section_serializes_flat() {
        let report = build_report(&[working_station("a", 6.0, 12.0)]);
        let json = serde_json::to_string(&report).unwrap();
        // The summary fields sit directly inside "general", next to the
        // report-only fields, exactly as the published document reads.
        assert!(json.contains("\"total_stations\":1"));
        assert!(json.contains("\"working_stations\":1"));
        assert!(!json.contains("\"summary\""));
    }

    #[test]
    fn test_empty_report_has_no_extremes() {
        let report = build_report(&[]);
        assert!(report.extremes.most_occupied.is_none());
        assert!(report.extremes.smallest_station.is_none());
        assert_eq!(report.distribution.bikes_per_station.mean, 0.0);
        assert_eq!(report.general.working_stations, 0);
        assert_eq!(report.general.median_occupancy, 0.0);
    }

    #[test]
    fn test_report_serialization_round_trip() {
        let mut report = build_report(&[
            station("a", Some(9.0), Some(12.0)),
            station("b", Some(5.0), Some(16.0)),
        ]);
        report.generated_at = Some("2025-06-14T08:30:12".to_string());
        let json = serde_json::to_string(&report).unwrap();
        let parsed: StatsReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_report_omits_absent_timestamp() {
        let report = build_report(&[station("a", Some(1.0), Some(2.0))]);
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("generated_at"));
    }
}
