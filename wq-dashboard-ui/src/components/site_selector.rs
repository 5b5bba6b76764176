//! Dropdown selector for choosing a monitoring site.

use crate::state::AppState;
use dioxus::prelude::*;
use wq_data::selection::{SelectionEvent, SelectionSource};

/// Site dropdown selector.
///
/// The displayed value follows the shared selection, so a map click
/// updates this control too.
#[component]
pub fn SiteSelector() -> Element {
    let mut state = use_context::<AppState>();
    let sites = state
        .table
        .read()
        .as_ref()
        .map(|t| t.site_names())
        .unwrap_or_default();
    let selected = state
        .selection
        .read()
        .as_ref()
        .map(|s| s.selected_site.clone())
        .unwrap_or_default();

    let on_change = move |evt: Event<FormData>| {
        state.dispatch(SelectionEvent::SiteSelected {
            site: evt.value(),
            source: SelectionSource::SiteSelector,
        });
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "site-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Site: "
            }
            select {
                id: "site-select",
                onchange: on_change,
                for site in sites.iter() {
                    option {
                        value: "{site}",
                        selected: *site == selected,
                        "{site}"
                    }
                }
            }
        }
    }
}
