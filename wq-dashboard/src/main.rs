//! Water Quality Monitoring Dashboard
//!
//! Pick a monitoring site (from the dropdown or by clicking its map marker)
//! and a water quality parameter, then read the time series chart and the
//! summary statistics for that pair.
//!
//! Data flow:
//! 1. `build.rs` copies `observations.csv` and `sites.csv` into `OUT_DIR`.
//! 2. `include_str!` embeds these CSVs into the WASM binary.
//! 3. On mount, both CSVs are loaded into an in-memory SQLite database and
//!    joined into a read-only table. Any load failure stops the app here.
//! 4. Every selection change goes through the selection store; the chart
//!    and summary are derived again from the new selection each time.

use dioxus::prelude::*;
use wq_data::chart::ChartView;
use wq_data::dashboard::{derive_view, DashboardView};
use wq_dashboard_ui::components::{
    LoadErrorDisplay, LoadingSpinner, ParameterSelector, SeriesChart, SiteMap, SiteSelector,
    SummaryTable,
};
use wq_dashboard_ui::js_bridge;
use wq_dashboard_ui::state::AppState;

/// Water quality measurements, one row per sample.
const OBSERVATIONS_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/observations.csv"));
/// Site coordinates and aquatic life use designations.
const SITES_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/sites.csv"));

const D3_JS: &str = "https://cdn.jsdelivr.net/npm/d3@7";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";

/// DOM ids the chart and map scripts render into.
const CHART_ID: &str = "wq-series-chart";
const MAP_ID: &str = "wq-site-map";

const LINE_COLOR: &str = "#1565C0";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("wq-dashboard-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // Load data once on mount
    use_effect(move || {
        let table = match wq_db::load(OBSERVATIONS_CSV, SITES_CSV) {
            Ok(table) => table,
            Err(e) => {
                log::error!("[WQ Debug] Failed to load monitoring data: {}", e);
                state.error_msg.set(Some(e.to_string()));
                state.loading.set(false);
                return;
            }
        };
        log::info!(
            "[WQ Debug] Loaded {} observations across {} sites",
            table.rows().len(),
            table.sites().len()
        );
        if let Err(e) = state.install_table(table) {
            log::error!("[WQ Debug] Selection setup failed: {}", e);
            state.error_msg.set(Some(e));
            state.loading.set(false);
            return;
        }
        // Chart and map scripts, initialized once
        js_bridge::init_scripts();
        state.loading.set(false);
    });

    // Chart and summary for the current selection
    let view = use_memo(move || -> Option<DashboardView> {
        let table = state.table.read();
        let selection = state.selection.read();
        Some(derive_view(table.as_ref()?, selection.as_ref()?))
    });

    // Redraw the chart whenever the derived series changes
    use_effect(move || {
        if (state.loading)() || (state.error_msg)().is_some() {
            return;
        }

        let view = view.read();
        match view.as_ref().map(|v| &v.chart) {
            Some(ChartView::Series(series)) => {
                let data_json = serde_json::to_string(&series.points).unwrap_or_default();
                let config_json = serde_json::to_string(&serde_json::json!({
                    "title": series.title,
                    "yAxisLabel": series.y_axis_label,
                    "lineColor": LINE_COLOR,
                    "mixedUnits": series.mixed_units,
                }))
                .unwrap_or_default();
                js_bridge::render_line_chart(CHART_ID, &data_json, &config_json);
            }
            _ => js_bridge::destroy_chart(CHART_ID),
        }
    });

    let current = view();

    rsx! {
        document::Script { src: D3_JS }
        document::Script { src: LEAFLET_JS }
        document::Stylesheet { href: LEAFLET_CSS }

        div {
            style: "padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            div {
                style: "margin-bottom: 12px;",
                h2 {
                    style: "margin: 0 0 4px 0;",
                    "Water Quality Monitoring Dashboard"
                }
                p {
                    style: "margin: 0; font-size: 13px; color: #666;",
                    "Choose a site from the list or the map, then a parameter."
                }
            }

            if let Some(err) = (state.error_msg)() {
                LoadErrorDisplay { message: err }
            } else if (state.loading)() {
                LoadingSpinner {}
            } else {
                div {
                    style: "display: flex; flex-wrap: wrap; gap: 24px; align-items: flex-start;",

                    // Controls and map
                    div {
                        style: "flex: 1 1 360px; min-width: 300px;",
                        SiteSelector {}
                        ParameterSelector {}
                        SiteMap { id: MAP_ID.to_string() }
                    }

                    // Chart and summary
                    div {
                        style: "flex: 2 1 520px; min-width: 320px;",
                        if let Some(current) = current {
                            SeriesChart {
                                id: CHART_ID.to_string(),
                                view: current.chart,
                            }
                            SummaryTable { summary: current.summary }
                        } else {
                            SeriesChart {
                                id: CHART_ID.to_string(),
                                view: ChartView::Empty,
                            }
                        }
                    }
                }
            }
        }
    }
}
