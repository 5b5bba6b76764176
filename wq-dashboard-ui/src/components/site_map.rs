//! Leaflet map of monitoring sites.

use crate::js_bridge;
use crate::state::AppState;
use dioxus::prelude::*;
use futures::StreamExt;
use std::cell::Cell;
use std::rc::Rc;
use wq_data::map::{bounds, site_markers, MapConfig, MarkerHighlight};
use wq_data::selection::{ListenerId, SelectionChange, SelectionEvent, SelectionSource};

#[derive(Props, Clone, PartialEq)]
pub struct SiteMapProps {
    /// DOM id Leaflet mounts into
    pub id: String,
    #[props(default = 420)]
    pub height: u32,
    #[props(default)]
    pub config: MapConfig,
}

/// Site map. Markers are drawn once; afterwards only the selected marker's
/// style changes, driven by a selection store listener.
///
/// Clicking a marker sends the site name through the same store path as
/// the site selector.
#[component]
pub fn SiteMap(props: SiteMapProps) -> Element {
    let mut state = use_context::<AppState>();

    let clicks = use_coroutine(move |mut rx: UnboundedReceiver<String>| async move {
        while let Some(site) = rx.next().await {
            state.dispatch(SelectionEvent::SiteSelected {
                site,
                source: SelectionSource::MapMarker,
            });
        }
    });

    // Highlight listener, registered once after the first render. The store
    // may already be ready, so the current site is highlighted immediately.
    let listener = use_hook(|| Rc::new(Cell::new(None::<ListenerId>)));
    let map_id = props.id.clone();
    let registered = listener.clone();
    use_effect(move || {
        if registered.get().is_some() {
            return;
        }
        let mut highlight = MarkerHighlight::new();
        let mut store = state.store.write();
        if let Some(update) = store.current().and_then(|s| highlight.highlight(&s.selected_site)) {
            js_bridge::highlight_site_marker(&map_id, &update);
        }
        let map_id = map_id.clone();
        let id = store.subscribe(move |selection, change| {
            if change != SelectionChange::Site {
                return;
            }
            if let Some(update) = highlight.highlight(&selection.selected_site) {
                js_bridge::highlight_site_marker(&map_id, &update);
            }
        });
        registered.set(Some(id));
    });
    use_drop(move || {
        if let Some(id) = listener.take() {
            state.store.write().unsubscribe(id);
        }
    });

    // Draw markers once the table is available.
    let render_id = props.id.clone();
    let config = props.config.clone();
    use_effect(move || {
        let table = state.table.read();
        let Some(table) = table.as_ref() else {
            return;
        };

        let markers = site_markers(table);
        let markers_json = serde_json::to_string(&markers).unwrap_or_default();
        let config_json = serde_json::to_string(&config).unwrap_or_default();
        let bounds_json = serde_json::to_string(&bounds(&markers)).unwrap_or_default();

        js_bridge::set_marker_click_handler(move |site: String| clicks.send(site));
        js_bridge::render_site_map(&render_id, &markers_json, &config_json, &bounds_json);
    });

    let style = format!(
        "height: {}px; width: 100%; border: 1px solid #E0E0E0; border-radius: 4px;",
        props.height
    );

    rsx! {
        div {
            id: "{props.id}",
            style: "{style}",
        }
    }
}
