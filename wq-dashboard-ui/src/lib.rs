//! Dioxus components, shared state and the D3/Leaflet bridge for the
//! water quality dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the chart and map scripts via `js_sys::eval()`
//! - `state`: `AppState` signals plus the selection store
//! - `components`: selectors, map, chart area and summary table

pub mod components;
pub mod js_bridge;
pub mod state;
