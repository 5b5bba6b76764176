//! Loading and error states for the dashboard shell.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadErrorProps {
    pub message: String,
}

/// Startup failure. Nothing else renders once the data failed to load.
#[component]
pub fn LoadErrorDisplay(props: LoadErrorProps) -> Element {
    rsx! {
        div {
            style: "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A;",
            strong { "Could not load monitoring data: " }
            "{props.message}"
        }
    }
}

#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 40px; color: #666;",
            "Loading monitoring data..."
        }
    }
}
