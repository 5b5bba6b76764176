//! Dioxus RSX components for the water quality dashboard.

mod parameter_selector;
mod series_chart;
mod site_map;
mod site_selector;
mod status;
mod summary_table;

pub use parameter_selector::ParameterSelector;
pub use series_chart::SeriesChart;
pub use site_map::SiteMap;
pub use site_selector::SiteSelector;
pub use status::{LoadErrorDisplay, LoadingSpinner};
pub use summary_table::SummaryTable;
