//! Command implementations for WQ CLI.
//!
//! Every command works on the already-loaded table and goes through the
//! same selection store and view derivation as the dashboard.

use anyhow::Context;
use clap::Subcommand;
use std::io::Write;
use wq_core::JoinedTable;
use wq_data::dashboard::{derive_view, store_for, DashboardView};
use wq_data::map::last_sample_dates;
use wq_data::selection::{SelectionEvent, SelectionSource};
use wq_data::summary::{Summary, SummaryRow, NO_DATA_MESSAGE};
use wq_utils::dates;

#[derive(Subcommand)]
pub enum Command {
    /// List monitoring sites with coordinates and last sample date
    Sites,

    /// List parameters present in the observations
    Parameters,

    /// Print summary statistics for a site and parameter
    Summary {
        #[arg(short = 's', long)]
        site: String,

        #[arg(short = 'p', long)]
        parameter: String,
    },

    /// Print the chart series for a site and parameter as JSON
    Series {
        #[arg(short = 's', long)]
        site: String,

        #[arg(short = 'p', long)]
        parameter: String,
    },
}

pub fn run(command: Command, table: &JoinedTable, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Sites => print_sites(table, out),
        Command::Parameters => {
            for parameter in table.parameters() {
                writeln!(out, "{}", parameter)?;
            }
            Ok(())
        }
        Command::Summary { site, parameter } => {
            let view = select(table, site, parameter)?;
            print_summary(&view.summary, out)
        }
        Command::Series { site, parameter } => {
            let view = select(table, site, parameter)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&view.chart)?)?;
            Ok(())
        }
    }
}

/// Apply a site and parameter through the selection store and derive the view.
fn select(table: &JoinedTable, site: String, parameter: String) -> anyhow::Result<DashboardView> {
    let mut store = store_for(table)?;
    store
        .dispatch(SelectionEvent::SiteSelected {
            site,
            source: SelectionSource::SiteSelector,
        })
        .context("invalid --site")?;
    store
        .dispatch(SelectionEvent::ParameterSelected { parameter })
        .context("invalid --parameter")?;
    let selection = store
        .current()
        .context("selection store is not initialized")?;
    Ok(derive_view(table, selection))
}

fn print_sites(table: &JoinedTable, out: &mut impl Write) -> anyhow::Result<()> {
    let last_samples = last_sample_dates(table);
    writeln!(
        out,
        "{:<32} {:>10} {:>11}  {:<12} {}",
        "Site", "Latitude", "Longitude", "Last Sample", "Aquatic Life Use"
    )?;
    for site in table.sites() {
        let (lat, lon) = match site.coordinates() {
            Some((lat, lon)) => (format!("{:.4}", lat), format!("{:.4}", lon)),
            None => ("-".to_string(), "-".to_string()),
        };
        let last = last_samples
            .get(&site.site_name)
            .map(dates::format_date)
            .unwrap_or_else(|| "No samples".to_string());
        writeln!(
            out,
            "{:<32} {:>10} {:>11}  {:<12} {}",
            site.site_name, lat, lon, last, site.aquatic_life_use
        )?;
    }
    Ok(())
}

fn print_summary(summary: &Summary, out: &mut impl Write) -> anyhow::Result<()> {
    let Some(row) = summary.row() else {
        writeln!(out, "{}", NO_DATA_MESSAGE)?;
        return Ok(());
    };
    for (header, cell) in SummaryRow::HEADERS.iter().zip(row.cells()) {
        writeln!(out, "{:<18} {}", format!("{}:", header), cell)?;
    }
    Ok(())
}
