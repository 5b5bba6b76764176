//! The shared "currently selected site and parameter" state.
//!
//! A `SelectionStore` is created empty, becomes ready once the loaded table
//! provides its domain, and from then on always holds a known site. Both the
//! site selector and map marker clicks go through [`SelectionStore::dispatch`],
//! so listeners never see which control caused a change.
//!
//! Listeners run synchronously inside the mutating call, in registration
//! order, and only when the value actually changed. They receive the new
//! selection by reference and must not call back into the store.

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use wq_core::JoinedTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub selected_site: String,
    /// `None` until the user picks a parameter.
    pub selected_parameter: Option<String>,
}

/// Which control produced a site selection. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    SiteSelector,
    MapMarker,
}

impl fmt::Display for SelectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionSource::SiteSelector => write!(f, "site selector"),
            SelectionSource::MapMarker => write!(f, "map marker"),
        }
    }
}

/// A user interaction that asks to change the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    SiteSelected {
        site: String,
        source: SelectionSource,
    },
    ParameterSelected {
        parameter: String,
    },
}

/// Which half of the selection a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Site,
    Parameter,
}

/// A selection event that cannot be applied. The selection is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown site: {0}")]
    UnknownSite(String),

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Selection is not initialized; no data has been loaded")]
    Uninitialized,

    #[error("Cannot initialize selection without any sites")]
    NoSites,
}

/// The valid values for each half of the selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionDomain {
    sites: Vec<String>,
    parameters: Vec<String>,
}

impl SelectionDomain {
    pub fn new(sites: Vec<String>, parameters: Vec<String>) -> Self {
        Self { sites, parameters }
    }

    pub fn from_table(table: &JoinedTable) -> Self {
        Self::new(table.site_names(), table.parameters().to_vec())
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    pub fn has_parameter(&self, parameter: &str) -> bool {
        self.parameters.iter().any(|p| p == parameter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&Selection, SelectionChange)>;

enum StoreState {
    Uninitialized,
    Ready {
        domain: SelectionDomain,
        selection: Selection,
    },
}

/// Single source of truth for the selection, with change listeners.
pub struct SelectionStore {
    state: StoreState,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionStore")
            .field("selection", &self.current())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SelectionStore {
    /// An uninitialized store. Every mutation fails until [`initialize`](Self::initialize).
    pub fn new() -> Self {
        Self {
            state: StoreState::Uninitialized,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Move to the ready state with the first site selected and no parameter.
    ///
    /// Listeners are notified with [`SelectionChange::Site`] so views
    /// registered before load pick up the initial value.
    pub fn initialize(&mut self, domain: SelectionDomain) -> Result<&Selection, SelectionError> {
        let first = domain.sites.first().cloned().ok_or(SelectionError::NoSites)?;
        log::info!(
            "[WQ Debug] selection: initialized with {} sites, {} parameters, site {:?}",
            domain.sites.len(),
            domain.parameters.len(),
            first
        );
        self.state = StoreState::Ready {
            domain,
            selection: Selection {
                selected_site: first,
                selected_parameter: None,
            },
        };
        self.notify(SelectionChange::Site);
        self.current().ok_or(SelectionError::Uninitialized)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, StoreState::Ready { .. })
    }

    pub fn current(&self) -> Option<&Selection> {
        match &self.state {
            StoreState::Ready { selection, .. } => Some(selection),
            StoreState::Uninitialized => None,
        }
    }

    pub fn domain(&self) -> Option<&SelectionDomain> {
        match &self.state {
            StoreState::Ready { domain, .. } => Some(domain),
            StoreState::Uninitialized => None,
        }
    }

    /// Select a site. Returns `Ok(false)` when it was already selected.
    pub fn set_site(&mut self, site: &str) -> Result<bool, SelectionError> {
        let StoreState::Ready { domain, selection } = &mut self.state else {
            return Err(SelectionError::Uninitialized);
        };
        if !domain.has_site(site) {
            return Err(SelectionError::UnknownSite(site.to_string()));
        }
        if selection.selected_site == site {
            return Ok(false);
        }
        selection.selected_site = site.to_string();
        self.notify(SelectionChange::Site);
        Ok(true)
    }

    /// Select a parameter. Returns `Ok(false)` when it was already selected.
    ///
    /// The parameter is checked against every parameter in the data, not
    /// against what the current site has: a site without that parameter
    /// simply filters to an empty set.
    pub fn set_parameter(&mut self, parameter: &str) -> Result<bool, SelectionError> {
        let StoreState::Ready { domain, selection } = &mut self.state else {
            return Err(SelectionError::Uninitialized);
        };
        if !domain.has_parameter(parameter) {
            return Err(SelectionError::UnknownParameter(parameter.to_string()));
        }
        if selection.selected_parameter.as_deref() == Some(parameter) {
            return Ok(false);
        }
        selection.selected_parameter = Some(parameter.to_string());
        self.notify(SelectionChange::Parameter);
        Ok(true)
    }

    /// Apply a user event. Site selections from either control take the same path.
    pub fn dispatch(&mut self, event: SelectionEvent) -> Result<bool, SelectionError> {
        match event {
            SelectionEvent::SiteSelected { site, source } => {
                log::info!("[WQ Debug] selection: site {:?} from {}", site, source);
                self.set_site(&site)
            }
            SelectionEvent::ParameterSelected { parameter } => {
                log::info!("[WQ Debug] selection: parameter {:?}", parameter);
                self.set_parameter(&parameter)
            }
        }
    }

    /// Like [`dispatch`](Self::dispatch) but never fails: an invalid event is
    /// logged and dropped, leaving the selection as it was.
    pub fn handle(&mut self, event: SelectionEvent) -> bool {
        match self.dispatch(event) {
            Ok(changed) => changed,
            Err(e) => {
                log::warn!("Ignoring selection event: {}", e);
                false
            }
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&Selection, SelectionChange) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, change: SelectionChange) {
        let StoreState::Ready { selection, .. } = &self.state else {
            return;
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(selection, change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn domain() -> SelectionDomain {
        SelectionDomain::new(
            vec!["SiteA".to_string(), "SiteB".to_string(), "SiteC".to_string()],
            vec!["Nitrate".to_string(), "pH".to_string()],
        )
    }

    fn ready_store() -> SelectionStore {
        let mut store = SelectionStore::new();
        store.initialize(domain()).unwrap();
        store
    }

    fn recorder(store: &mut SelectionStore) -> Rc<RefCell<Vec<(Selection, SelectionChange)>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        store.subscribe(move |sel, change| sink.borrow_mut().push((sel.clone(), change)));
        log
    }

    #[test]
    fn starts_uninitialized() {
        let mut store = SelectionStore::new();
        assert!(!store.is_ready());
        assert!(store.current().is_none());
        assert_eq!(store.set_site("SiteA"), Err(SelectionError::Uninitialized));
        assert_eq!(store.set_parameter("pH"), Err(SelectionError::Uninitialized));
    }

    #[test]
    fn initialize_selects_first_site_without_parameter() {
        let mut store = SelectionStore::new();
        let selection = store.initialize(domain()).unwrap().clone();
        assert_eq!(selection.selected_site, "SiteA");
        assert_eq!(selection.selected_parameter, None);
        assert!(store.is_ready());
    }

    #[test]
    fn initialize_without_sites_fails() {
        let mut store = SelectionStore::new();
        let result = store.initialize(SelectionDomain::new(Vec::new(), vec!["pH".to_string()]));
        assert_eq!(result.err(), Some(SelectionError::NoSites));
        assert!(!store.is_ready());
    }

    #[test]
    fn initialize_notifies_early_listeners() {
        let mut store = SelectionStore::new();
        let log = recorder(&mut store);
        store.initialize(domain()).unwrap();
        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].0.selected_site, "SiteA");
        assert_eq!(log[0].1, SelectionChange::Site);
    }

    #[test]
    fn set_site_updates_and_notifies() {
        let mut store = ready_store();
        let log = recorder(&mut store);
        assert_eq!(store.set_site("SiteB"), Ok(true));
        assert_eq!(store.current().unwrap().selected_site, "SiteB");
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(log.borrow()[0].1, SelectionChange::Site);
    }

    #[test]
    fn set_site_twice_is_idempotent() {
        let mut store = ready_store();
        let log = recorder(&mut store);
        assert_eq!(store.set_site("SiteB"), Ok(true));
        assert_eq!(store.set_site("SiteB"), Ok(false));
        assert_eq!(log.borrow().len(), 1, "Second identical set should not notify");
    }

    #[test]
    fn unknown_site_is_rejected_and_selection_unchanged() {
        let mut store = ready_store();
        let log = recorder(&mut store);
        assert_eq!(
            store.set_site("Nowhere"),
            Err(SelectionError::UnknownSite("Nowhere".to_string()))
        );
        assert_eq!(store.current().unwrap().selected_site, "SiteA");
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        let mut store = ready_store();
        assert_eq!(
            store.set_parameter("Turbidity"),
            Err(SelectionError::UnknownParameter("Turbidity".to_string()))
        );
        assert_eq!(store.current().unwrap().selected_parameter, None);
    }

    #[test]
    fn set_parameter_updates_and_notifies() {
        let mut store = ready_store();
        let log = recorder(&mut store);
        assert_eq!(store.set_parameter("pH"), Ok(true));
        assert_eq!(store.set_parameter("pH"), Ok(false));
        assert_eq!(
            store.current().unwrap().selected_parameter.as_deref(),
            Some("pH")
        );
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(log.borrow()[0].1, SelectionChange::Parameter);
    }

    #[test]
    fn site_change_keeps_parameter() {
        let mut store = ready_store();
        store.set_parameter("Nitrate").unwrap();
        store.set_site("SiteC").unwrap();
        let selection = store.current().unwrap();
        assert_eq!(selection.selected_site, "SiteC");
        assert_eq!(selection.selected_parameter.as_deref(), Some("Nitrate"));
    }

    #[test]
    fn dispatch_sources_are_equivalent() {
        let mut from_selector = ready_store();
        let mut from_map = ready_store();
        let selector_log = recorder(&mut from_selector);
        let map_log = recorder(&mut from_map);

        from_selector
            .dispatch(SelectionEvent::SiteSelected {
                site: "SiteB".to_string(),
                source: SelectionSource::SiteSelector,
            })
            .unwrap();
        from_map
            .dispatch(SelectionEvent::SiteSelected {
                site: "SiteB".to_string(),
                source: SelectionSource::MapMarker,
            })
            .unwrap();

        assert_eq!(from_selector.current(), from_map.current());
        assert_eq!(*selector_log.borrow(), *map_log.borrow());
    }

    #[test]
    fn handle_swallows_invalid_events() {
        let mut store = ready_store();
        assert!(!store.handle(SelectionEvent::SiteSelected {
            site: "Nowhere".to_string(),
            source: SelectionSource::MapMarker,
        }));
        assert!(store.handle(SelectionEvent::ParameterSelected {
            parameter: "pH".to_string(),
        }));
        assert_eq!(store.current().unwrap().selected_site, "SiteA");
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let mut store = ready_store();
        let order = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&order);
        let second = Rc::clone(&order);
        store.subscribe(move |_, _| first.borrow_mut().push("first"));
        store.subscribe(move |_, _| second.borrow_mut().push("second"));
        store.set_site("SiteB").unwrap();
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut store = ready_store();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = store.subscribe(move |_, _| *sink.borrow_mut() += 1);
        store.set_site("SiteB").unwrap();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id), "Second unsubscribe finds nothing");
        store.set_site("SiteC").unwrap();
        assert_eq!(*count.borrow(), 1);
    }
}
