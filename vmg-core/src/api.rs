//! Native client for the Montpellier metropolitan open-data API.
//!
//! Only compiled with the `api` feature so the WASM dashboard crates never
//! pull reqwest; the browser side fetches through its own layer instead.

use log::info;
use reqwest::Client;
use std::time::Duration;

use crate::error::LoadError;
use crate::station::StationRecord;

/// Base URL of the Montpellier metropolitan open-data portal.
pub const BASE_URL: &str = "https://portail-api-data.montpellier3m.fr";

/// Endpoint returning every VeloMagg station as an NGSI entity array.
pub const STATIONS_ENDPOINT: &str = "/bikestation";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the VeloMagg open-data endpoints.
pub struct VelomaggClient {
    client: Client,
    base_url: String,
}

impl VelomaggClient {
    /// Build a client against the public portal.
    pub fn new() -> Result<Self, LoadError> {
        Self::with_base_url(BASE_URL)
    }

    /// Build a client against a custom portal root (mirrors, test servers).
    pub fn with_base_url(base_url: &str) -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| LoadError::Network(e.to_string()))?;
        Ok(VelomaggClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the current state of every station on the network.
    pub async fn fetch_stations(&self) -> Result<Vec<StationRecord>, LoadError> {
        let url = format!("{}{}", self.base_url, STATIONS_ENDPOINT);
        info!("Fetching stations from {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }
        response
            .json::<Vec<StationRecord>>()
            .await
            .map_err(|e| LoadError::Parse(e.to_string()))
    }
}
