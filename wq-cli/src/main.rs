//! WQ CLI - Command line tool for inspecting water quality monitoring data.

use clap::Parser;
use std::path::PathBuf;

mod cmd;

#[derive(Parser)]
#[command(
    name = "wq-cli",
    version,
    about = "Water quality monitoring data toolkit"
)]
struct Cli {
    /// Observations CSV (site_name, parameter, value, unit, date_time)
    #[arg(long, global = true, default_value = "fixtures/observations.csv")]
    observations: PathBuf,

    /// Site metadata CSV (site_name, latitude, longitude, aquatic_life_use)
    #[arg(long, global = true, default_value = "fixtures/sites.csv")]
    sites: PathBuf,

    #[command(subcommand)]
    command: cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let table = wq_db::load_files(&cli.observations, &cli.sites)?;
    log::info!(
        "Loaded {} observations for {} sites from {} and {}",
        table.rows().len(),
        table.sites().len(),
        cli.observations.display(),
        cli.sites.display()
    );
    let stdout = std::io::stdout();
    cmd::run(cli.command, &table, &mut stdout.lock())
}
