//! Time series chart section: header, D3 container and empty state.

use dioxus::prelude::*;
use wq_data::chart::ChartView;

#[derive(Props, Clone, PartialEq)]
pub struct SeriesChartProps {
    /// The DOM id for the chart container (D3 will render into this)
    pub id: String,
    pub view: ChartView,
    #[props(default = 380)]
    pub min_height: u32,
}

/// Header and container for the line chart.
///
/// D3 draws into the container from an effect in the app; this component
/// only lays out the area. With no series the area stays blank apart from
/// a short note.
#[component]
pub fn SeriesChart(props: SeriesChartProps) -> Element {
    let style = format!(
        "min-height: {}px; position: relative; width: 100%;",
        props.min_height
    );

    rsx! {
        div {
            style: "margin-bottom: 8px;",
            match &props.view {
                ChartView::Series(series) => rsx! {
                    h3 {
                        style: "margin: 0 0 4px 0; font-size: 16px;",
                        "{series.title}"
                    }
                    p {
                        style: "margin: 0; font-size: 12px; color: #666;",
                        "Y-axis: {series.y_axis_label}"
                    }
                    if series.mixed_units {
                        p {
                            style: "margin: 4px 0 0 0; font-size: 12px; color: #C62828;",
                            "This series mixes units; values are plotted as recorded under the first unit."
                        }
                    }
                },
                ChartView::Empty => rsx! {
                    h3 {
                        style: "margin: 0 0 4px 0; font-size: 16px; color: #9E9E9E;",
                        "No data to plot"
                    }
                },
            }
        }
        div {
            style: "{style}",
            div {
                id: "{props.id}",
                style: "width: 100%;",
            }
        }
    }
}
