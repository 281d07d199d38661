//! VMG CLI - Command line tool for producing VeloMagg site artifacts.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "vmg-cli",
    version,
    about = "VeloMagg bike share statistics toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: vmg_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    vmg_cmd::run(cli.command).await
}
