//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//!
//! The selection itself lives in a [`SelectionStore`]; `selection` is a mirror
//! kept current by a store listener so components re-render on change.

use dioxus::prelude::*;
use wq_core::JoinedTable;
use wq_data::selection::{
    ListenerId, Selection, SelectionDomain, SelectionError, SelectionEvent, SelectionStore,
};

/// Shared application state for the dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Joined observations and sites (None until loaded)
    pub table: Signal<Option<JoinedTable>>,
    /// Single source of truth for the selected site and parameter
    pub store: Signal<SelectionStore>,
    /// Latest selection, written only by the store listener
    pub selection: Signal<Option<Selection>>,
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            table: Signal::new(None),
            store: Signal::new(SelectionStore::new()),
            selection: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
        }
    }

    /// Install the loaded table and move the store to its ready state.
    pub fn install_table(&mut self, table: JoinedTable) -> Result<(), String> {
        let mut mirror = self.selection;
        connect_mirror(
            &mut self.store.write(),
            SelectionDomain::from_table(&table),
            move |selection| mirror.set(Some(selection)),
        )
        .map_err(|e| e.to_string())?;
        self.table.set(Some(table));
        Ok(())
    }

    /// Route a selector or map event into the store. Invalid events are
    /// logged and dropped.
    pub fn dispatch(&mut self, event: SelectionEvent) {
        self.store.write().handle(event);
    }
}

/// Subscribe `mirror` to every selection change, then initialize the store.
///
/// The mirror is subscribed first so it also receives the initial site.
pub fn connect_mirror<F>(
    store: &mut SelectionStore,
    domain: SelectionDomain,
    mut mirror: F,
) -> Result<ListenerId, SelectionError>
where
    F: FnMut(Selection) + 'static,
{
    let id = store.subscribe(move |selection, _| mirror(selection.clone()));
    store.initialize(domain)?;
    Ok(id)
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
