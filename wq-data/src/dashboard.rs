//! Everything the dashboard shows for one selection.
//!
//! `derive_view` is re-run after every selection change. It holds no cache,
//! so a view can never lag the selection it was derived from.

use crate::chart::{chart_view, ChartView};
use crate::filter::filtered;
use crate::selection::{Selection, SelectionDomain, SelectionError, SelectionStore};
use crate::summary::{summarize, Summary};
use serde::Serialize;
use wq_core::JoinedTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub selection: Selection,
    pub chart: ChartView,
    pub summary: Summary,
}

pub fn derive_view(table: &JoinedTable, selection: &Selection) -> DashboardView {
    let set = filtered(table, selection);
    DashboardView {
        selection: selection.clone(),
        chart: chart_view(&set),
        summary: summarize(&set, table.site(&selection.selected_site)),
    }
}

/// A ready store for `table`, positioned on its first site.
pub fn store_for(table: &JoinedTable) -> Result<SelectionStore, SelectionError> {
    let mut store = SelectionStore::new();
    store.initialize(SelectionDomain::from_table(table))?;
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MarkerHighlight;
    use crate::selection::{SelectionChange, SelectionEvent, SelectionSource};
    use crate::testing::{obs, table};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sample() -> JoinedTable {
        table(vec![
            obs("SiteA", "pH", Some(7.1), "SU", "2024-01-01"),
            obs("SiteA", "pH", Some(7.3), "SU", "2024-01-02"),
            obs("SiteB", "pH", Some(6.6), "SU", "2024-01-05"),
            obs("SiteB", "Nitrate", Some(3.2), "mg/L", "2024-01-05"),
        ])
    }

    fn site_event(site: &str, source: SelectionSource) -> SelectionEvent {
        SelectionEvent::SiteSelected {
            site: site.to_string(),
            source,
        }
    }

    #[test]
    fn initial_view_has_first_site_and_no_data() {
        let table = sample();
        let store = store_for(&table).unwrap();
        let view = derive_view(&table, store.current().unwrap());
        assert_eq!(view.selection.selected_site, "SiteA");
        assert!(view.chart.is_empty());
        assert!(view.summary.is_no_data());
    }

    #[test]
    fn map_and_selector_paths_are_equivalent() {
        let table = sample();
        let mut via_selector = store_for(&table).unwrap();
        let mut via_map = store_for(&table).unwrap();
        for store in [&mut via_selector, &mut via_map] {
            store.handle(SelectionEvent::ParameterSelected {
                parameter: "pH".to_string(),
            });
        }

        via_selector.handle(site_event("SiteB", SelectionSource::SiteSelector));
        via_map.handle(site_event("SiteB", SelectionSource::MapMarker));

        let a = derive_view(&table, via_selector.current().unwrap());
        let b = derive_view(&table, via_map.current().unwrap());
        assert_eq!(a, b);
        assert_eq!(a.summary.stats().unwrap().records, 1);
    }

    #[test]
    fn parameter_missing_at_site_gives_no_data_everywhere() {
        let table = sample();
        let mut store = store_for(&table).unwrap();
        store.handle(SelectionEvent::ParameterSelected {
            parameter: "Nitrate".to_string(),
        });
        let view = derive_view(&table, store.current().unwrap());
        assert_eq!(view.selection.selected_site, "SiteA");
        assert!(view.chart.is_empty());
        assert!(view.summary.is_no_data());
    }

    #[test]
    fn map_click_updates_selector_and_highlight() {
        let table = sample();
        let mut store = store_for(&table).unwrap();

        let selector_value = Rc::new(RefCell::new(
            store.current().unwrap().selected_site.clone(),
        ));
        let selector = Rc::clone(&selector_value);
        store.subscribe(move |sel, _| *selector.borrow_mut() = sel.selected_site.clone());

        let updates = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&updates);
        let mut highlight = MarkerHighlight::new();
        highlight.highlight("SiteA");
        store.subscribe(move |sel, change| {
            if change == SelectionChange::Site {
                if let Some(update) = highlight.highlight(&sel.selected_site) {
                    sink.borrow_mut().push(update);
                }
            }
        });

        assert!(store.handle(site_event("SiteB", SelectionSource::MapMarker)));
        assert_eq!(store.current().unwrap().selected_site, "SiteB");
        assert_eq!(*selector_value.borrow(), "SiteB");
        let updates = updates.borrow();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].clear.as_deref(), Some("SiteA"));
        assert_eq!(updates[0].set, "SiteB");
    }

    #[test]
    fn repeated_click_has_no_further_effect() {
        let table = sample();
        let mut store = store_for(&table).unwrap();
        let notifications = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&notifications);
        store.subscribe(move |_, _| *sink.borrow_mut() += 1);

        assert!(store.handle(site_event("SiteB", SelectionSource::MapMarker)));
        let first = derive_view(&table, store.current().unwrap());
        assert!(!store.handle(site_event("SiteB", SelectionSource::MapMarker)));
        let second = derive_view(&table, store.current().unwrap());

        assert_eq!(first, second);
        assert_eq!(*notifications.borrow(), 1);
    }

    #[test]
    fn invalid_click_leaves_view_unchanged() {
        let table = sample();
        let mut store = store_for(&table).unwrap();
        let before = derive_view(&table, store.current().unwrap());
        assert!(!store.handle(site_event("Ghost Creek", SelectionSource::MapMarker)));
        let after = derive_view(&table, store.current().unwrap());
        assert_eq!(before, after);
    }
}
