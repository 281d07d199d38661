//! Station records as served by the Montpellier open-data API.
//!
//! The `/bikestation` endpoint returns NGSI-style entities: every attribute
//! is an object wrapping a `value` next to type and metadata fields. Only
//! the values matter here; unknown attributes and metadata are ignored.

use serde::{Deserialize, Serialize};

/// Numeric NGSI attribute. A missing or null `value` reads as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub metadata: Option<AttributeMetadata>,
}

/// Text NGSI attribute ("working", "outOfService", ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextAttribute {
    #[serde(default)]
    pub value: Option<String>,
}

/// NGSI attribute metadata envelope. Only the observation timestamp is
/// read; the feed leaves it empty on most attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeMetadata {
    #[serde(default)]
    pub timestamp: Option<TextAttribute>,
}

/// Postal address NGSI attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressAttribute {
    #[serde(default)]
    pub value: Option<AddressValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressValue {
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub address_locality: String,
}

/// GeoJSON point NGSI attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationAttribute {
    #[serde(default)]
    pub value: Option<GeoPoint>,
}

/// Coordinates come in GeoJSON order: `[longitude, latitude]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

/// One bike station as returned by the `/bikestation` endpoint.
///
/// Every attribute is optional: stations occasionally report without
/// counters, and the aggregation treats anything absent as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub address: Option<AddressAttribute>,
    #[serde(default)]
    pub available_bike_number: Option<Quantity>,
    #[serde(default)]
    pub free_slot_number: Option<Quantity>,
    #[serde(default)]
    pub total_slot_number: Option<Quantity>,
    #[serde(default)]
    pub status: Option<TextAttribute>,
    #[serde(default)]
    pub location: Option<LocationAttribute>,
}

fn quantity_value(attribute: &Option<Quantity>) -> f64 {
    attribute
        .as_ref()
        .and_then(|q| q.value)
        .map(|v| v.max(0.0))
        .unwrap_or(0.0)
}

impl StationRecord {
    /// Bikes currently docked; missing or negative counters count as zero.
    pub fn available_bikes(&self) -> f64 {
        quantity_value(&self.available_bike_number)
    }

    /// Free docks; missing or negative counters count as zero.
    pub fn free_slots(&self) -> f64 {
        quantity_value(&self.free_slot_number)
    }

    /// Total docks; missing or negative counters count as zero.
    pub fn capacity(&self) -> f64 {
        quantity_value(&self.total_slot_number)
    }

    /// Bikes over total docks, zero when the station reports no docks.
    pub fn occupancy_rate(&self) -> f64 {
        let capacity = self.capacity();
        if capacity > 0.0 {
            self.available_bikes() / capacity
        } else {
            0.0
        }
    }

    /// Share of docks that are not free, zero when the station reports no
    /// docks. Differs from occupancy when docked bikes are unusable.
    pub fn utilization_rate(&self) -> f64 {
        let capacity = self.capacity();
        if capacity > 0.0 {
            (capacity - self.free_slots()).max(0.0) / capacity
        } else {
            0.0
        }
    }

    /// Street address from the postal address attribute.
    pub fn street_address(&self) -> Option<&str> {
        self.address
            .as_ref()
            .and_then(|a| a.value.as_ref())
            .map(|v| v.street_address.as_str())
            .filter(|s| !s.is_empty())
    }

    /// Locality from the postal address attribute.
    pub fn locality(&self) -> Option<&str> {
        self.address
            .as_ref()
            .and_then(|a| a.value.as_ref())
            .map(|v| v.address_locality.as_str())
            .filter(|s| !s.is_empty())
    }

    /// Operating status, "unknown" when the attribute is absent.
    pub fn status_label(&self) -> &str {
        self.status
            .as_ref()
            .and_then(|s| s.value.as_deref())
            .unwrap_or("unknown")
    }

    /// `(latitude, longitude)` when the location attribute carries a point.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let point = self.location.as_ref().and_then(|l| l.value.as_ref())?;
        if point.coordinates.len() < 2 {
            return None;
        }
        Some((point.coordinates[1], point.coordinates[0]))
    }

    /// Observation timestamp from the bike-counter metadata, if reported.
    pub fn last_update(&self) -> Option<&str> {
        self.available_bike_number
            .as_ref()?
            .metadata
            .as_ref()?
            .timestamp
            .as_ref()?
            .value
            .as_deref()
    }
}

/// Flat per-station row used by the CSV export and the stations table.
/// Field order is the column order of the historical export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationStatus {
    pub id: String,
    /// Street address, falling back to the station id when absent
    pub address: String,
    pub locality: String,
    pub available_bikes: u32,
    pub free_slots: u32,
    pub total_slots: u32,
    pub status: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Bike-counter observation timestamp, "N/A" when not reported
    pub last_update: String,
    /// Bikes over total docks in [0, 1]
    pub occupancy_rate: f64,
    /// Non-free docks over total docks in [0, 1]
    pub utilization_rate: f64,
}

impl StationStatus {
    /// Flatten an API record into one export/table row.
    pub fn from_record(record: &StationRecord) -> Self {
        let coordinates = record.coordinates();
        StationStatus {
            id: record.id.clone(),
            address: record
                .street_address()
                .unwrap_or(record.id.as_str())
                .to_string(),
            locality: record.locality().unwrap_or_default().to_string(),
            available_bikes: record.available_bikes().round() as u32,
            free_slots: record.free_slots().round() as u32,
            total_slots: record.capacity().round() as u32,
            status: record.status_label().to_string(),
            latitude: coordinates.map(|c| c.0),
            longitude: coordinates.map(|c| c.1),
            last_update: record.last_update().unwrap_or("N/A").to_string(),
            occupancy_rate: record.occupancy_rate(),
            utilization_rate: record.utilization_rate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SAMPLE_STATIONS: &str = include_str!("../../fixtures/bikestation.json");

    fn sample_records() -> Vec<StationRecord> {
        serde_json::from_str(SAMPLE_STATIONS).expect("fixture should parse")
    }

    #[test]
    fn test_parse_station_payload() {
        let records = sample_records();
        assert_eq!(records.len(), 4);

        let gare = &records[0];
        assert_eq!(gare.id, "urn:ngsi-ld:station:001");
        assert_eq!(gare.available_bikes(), 9.0);
        assert_eq!(gare.free_slots(), 3.0);
        assert_eq!(gare.capacity(), 12.0);
        assert_eq!(gare.status_label(), "working");
        assert_eq!(
            gare.street_address(),
            Some("Rue Jules Ferry - Gare Saint-Roch")
        );
        assert_eq!(gare.locality(), Some("Montpellier"));
        assert_eq!(gare.last_update(), Some("2025-06-14T08:27:41.00Z"));
    }

    #[test]
    fn test_missing_attributes_count_as_zero() {
        let records = sample_records();
        // Station 003 reports no availableBikeNumber at all.
        let corum = &records[2];
        assert_eq!(corum.available_bikes(), 0.0);
        assert_eq!(corum.capacity(), 12.0);
        assert_eq!(corum.occupancy_rate(), 0.0);
        // Half the docks are taken even though no bike is rentable.
        assert!((corum.utilization_rate() - 0.5).abs() < 1e-9);
        assert_eq!(corum.status_label(), "outOfService");
    }

    #[test]
    fn test_absent_location_and_status() {
        let records = sample_records();
        let beaux_arts = &records[3];
        assert_eq!(beaux_arts.coordinates(), None);
        assert_eq!(beaux_arts.status_label(), "unknown");
    }

    #[test]
    fn test_coordinates_are_latitude_longitude() {
        let records = sample_records();
        let (latitude, longitude) = records[0].coordinates().unwrap();
        assert!((latitude - 43.60431).abs() < 1e-9);
        assert!((longitude - 3.88173).abs() < 1e-9);
    }

    #[test]
    fn test_negative_counter_reads_as_zero() {
        let record: StationRecord = serde_json::from_str(
            r#"{"id": "urn:x", "availableBikeNumber": {"value": -3}, "totalSlotNumber": {"value": 10}}"#,
        )
        .unwrap();
        assert_eq!(record.available_bikes(), 0.0);
        assert_eq!(record.occupancy_rate(), 0.0);
    }

    #[test]
    fn test_overreported_free_slots_floor_utilization_at_zero() {
        let record: StationRecord = serde_json::from_str(
            r#"{"id": "urn:x", "freeSlotNumber": {"value": 14}, "totalSlotNumber": {"value": 10}}"#,
        )
        .unwrap();
        assert_eq!(record.utilization_rate(), 0.0);
    }

    #[test]
    fn test_null_counter_reads_as_zero() {
        let record: StationRecord =
            serde_json::from_str(r#"{"id": "urn:x", "availableBikeNumber": {"value": null}}"#)
                .unwrap();
        assert_eq!(record.available_bikes(), 0.0);
    }

    #[test]
    fn test_empty_metadata_has_no_timestamp() {
        let record: StationRecord = serde_json::from_str(
            r#"{"id": "urn:x", "availableBikeNumber": {"value": 4, "metadata": {}}}"#,
        )
        .unwrap();
        assert_eq!(record.last_update(), None);
    }

    #[test]
    fn test_station_status_row() {
        let records = sample_records();
        let row = StationStatus::from_record(&records[1]);
        assert_eq!(row.address, "Place Albert 1er - St Charles");
        assert_eq!(row.available_bikes, 5);
        assert_eq!(row.free_slots, 11);
        assert_eq!(row.total_slots, 16);
        assert!((row.occupancy_rate - 0.3125).abs() < 1e-9);
        assert!((row.utilization_rate - 0.3125).abs() < 1e-9);
        assert_eq!(row.status, "working");
        assert_eq!(row.last_update, "2025-06-14T08:27:12.00Z");
    }

    #[test]
    fn test_status_row_rates_diverge_for_blocked_docks() {
        let records = sample_records();
        // Out-of-service station: no rentable bikes, six of twelve docks taken.
        let row = StationStatus::from_record(&records[2]);
        assert_eq!(row.occupancy_rate, 0.0);
        assert!((row.utilization_rate - 0.5).abs() < 1e-9);
        // No bike counter either, so no observation timestamp.
        assert_eq!(row.last_update, "N/A");
    }

    #[test]
    fn test_station_status_falls_back_to_id() {
        let record: StationRecord = serde_json::from_str(r#"{"id": "urn:x"}"#).unwrap();
        let row = StationStatus::from_record(&record);
        assert_eq!(row.address, "urn:x");
        assert_eq!(row.latitude, None);
        assert_eq!(row.status, "unknown");
        assert_eq!(row.last_update, "N/A");
    }
}
