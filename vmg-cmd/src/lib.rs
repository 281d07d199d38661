//! Command implementations for the VeloMagg stats CLI.
//!
//! Provides subcommands for producing the site artifacts: the statistics
//! snapshot the dashboard falls back on, and the per-station CSV export.

use clap::Subcommand;

pub mod export;
pub mod snapshot;

#[derive(Subcommand)]
pub enum Command {
    /// Fetch live station data and write the statistics snapshot JSON
    Snapshot {
        /// Output path for the snapshot (published as data/velomagg_analysis_stats.json)
        #[arg(short = 'o', long, default_value = "velomagg_analysis_stats.json")]
        output: String,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Fetch live station data and export one CSV row per station
    Export {
        /// Output path for the per-station CSV
        #[arg(short = 's', long, default_value = "velomagg_analysis.csv")]
        stations_csv: String,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Snapshot { output, pretty } => snapshot::run_snapshot(&output, pretty).await,
        Command::Export { stations_csv } => export::run_export(&stations_csv).await,
    }
}
