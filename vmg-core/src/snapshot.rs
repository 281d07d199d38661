//! Parsing of the pre-computed statistics snapshot served with the site.
//!
//! The snapshot is the JSON report written by `vmg-cli snapshot` and
//! published next to the static pages. The dashboard only needs the
//! `general` section, so any report carrying that section parses, whatever
//! else the writing toolkit version added around it.

use serde::Deserialize;

use crate::error::LoadError;
use crate::stats::StatsSummary;

/// Site-relative path the dashboard fetches the snapshot from.
pub const SNAPSHOT_PATH: &str = "data/velomagg_analysis_stats.json";

#[derive(Deserialize)]
struct SnapshotDoc {
    general: StatsSummary,
}

/// Extract the headline summary from snapshot JSON.
pub fn parse_snapshot(text: &str) -> Result<StatsSummary, LoadError> {
    let doc: SnapshotDoc =
        serde_json::from_str(text).map_err(|e| LoadError::Parse(e.to_string()))?;
    Ok(doc.general)
}
