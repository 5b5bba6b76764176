//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The D3.js chart and Leaflet map functions live in `assets/js/*.js`. They
//! are evaluated as globals (no ES modules) once both libraries have loaded,
//! and exposed via `window.*`. This module serializes data and calls them.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;
use wq_data::map::HighlightUpdate;

// Embed all JS files at compile time
static LINE_CHART_JS: &str = include_str!("../assets/js/line-chart.js");
static SITE_MAP_JS: &str = include_str!("../assets/js/site-map.js");

/// Global the map script calls on marker click.
const MARKER_CLICK_HANDLER: &str = "__wqOnSiteMarkerClick";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('WQ JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Quote a Rust string as a JS string literal.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Initialize chart and map scripts with a wait-for-libraries polling loop.
///
/// The scripts are stored on `window` and evaluated at global scope by
/// indirect eval once `d3` and `L` both exist, then each function is
/// promoted to `window.*` explicitly.
pub fn init_scripts() {
    let all_js = [LINE_CHART_JS, SITE_MAP_JS].join("\n");
    let store_js = format!("window.__wqScripts = {};", js_string(&all_js));
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            if (window.__wqScriptsReady || window.__wqScriptsPolling) return;
            window.__wqScriptsPolling = true;
            var waitForLibs = setInterval(function() {
                if (typeof d3 !== 'undefined' && typeof L !== 'undefined') {
                    clearInterval(waitForLibs);
                    (0, eval)(window.__wqScripts);
                    delete window.__wqScripts;
                    if (typeof renderLineChart !== 'undefined') window.renderLineChart = renderLineChart;
                    if (typeof destroyLineChart !== 'undefined') window.destroyLineChart = destroyLineChart;
                    if (typeof renderSiteMap !== 'undefined') window.renderSiteMap = renderSiteMap;
                    if (typeof highlightSiteMarker !== 'undefined') window.highlightSiteMarker = highlightSiteMarker;
                    window.__wqScriptsReady = true;
                    console.log('WQ scripts initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Poll until scripts are ready and `ready_check` holds, then run `call`.
///
/// `setup` runs immediately. The poll is abandoned without calling once
/// `stale_check` becomes true.
fn when_ready_js(label: &str, setup: &str, stale_check: &str, ready_check: &str, call: &str) -> String {
    format!(
        r#"
        (function() {{
            {setup}
            var poll = setInterval(function() {{
                if ({stale_check}) {{
                    clearInterval(poll);
                    return;
                }}
                if (window.__wqScriptsReady && {ready_check}) {{
                    clearInterval(poll);
                    try {{
                        {call};
                    }} catch(e) {{ console.error('[WQ] {label} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    )
}

fn call_when_ready(label: &str, ready_check: &str, call: &str) {
    call_js(&when_ready_js(label, "", "false", ready_check, call));
}

/// JS statement that bumps the draw generation of chart `id_js` and stores
/// the new value in `gen`. Every render and destroy takes a new generation,
/// so a queued render only draws if nothing happened to the chart since.
fn bump_chart_generation(id_js: &str) -> String {
    format!(
        "var gens = window.__wqChartGen = window.__wqChartGen || {{}}; \
         var gen = gens[{id_js}] = (gens[{id_js}] || 0) + 1;"
    )
}

fn line_chart_js(container_id: &str, data_json: &str, config_json: &str) -> String {
    let id = js_string(container_id);
    when_ready_js(
        "renderLineChart",
        &bump_chart_generation(&id),
        &format!("window.__wqChartGen[{id}] !== gen"),
        &format!("document.getElementById({id})"),
        &format!(
            "window.renderLineChart({id}, {}, {})",
            js_string(data_json),
            js_string(config_json)
        ),
    )
}

fn destroy_chart_js(container_id: &str) -> String {
    let id = js_string(container_id);
    format!(
        "(function() {{ {} var el = document.getElementById({id}); if (el) el.innerHTML = ''; }})();",
        bump_chart_generation(&id)
    )
}

/// Render the time series line chart into `container_id`.
///
/// The draw waits for the scripts; a later render or [`destroy_chart`] for
/// the same container cancels it.
pub fn render_line_chart(container_id: &str, data_json: &str, config_json: &str) {
    call_js(&line_chart_js(container_id, data_json, config_json));
}

/// Render the site map with all markers. Called once after data loads.
pub fn render_site_map(container_id: &str, markers_json: &str, config_json: &str, bounds_json: &str) {
    let id = js_string(container_id);
    call_when_ready(
        "renderSiteMap",
        &format!("document.getElementById({id})"),
        &format!(
            "window.renderSiteMap({id}, {}, {}, {})",
            js_string(markers_json),
            js_string(config_json),
            js_string(bounds_json)
        ),
    );
}

/// Restyle the previously and newly selected markers without redrawing the map.
///
/// Waits for the map in `container_id` to exist, so it is safe to call
/// before [`render_site_map`] has finished.
pub fn highlight_site_marker(container_id: &str, update: &HighlightUpdate) {
    let id = js_string(container_id);
    let clear = update
        .clear
        .as_deref()
        .map(js_string)
        .unwrap_or_else(|| "null".to_string());
    call_when_ready(
        "highlightSiteMarker",
        &format!("window.__wqMaps && window.__wqMaps[{id}]"),
        &format!(
            "window.highlightSiteMarker({id}, {clear}, {})",
            js_string(&update.set)
        ),
    );
}

/// Install the Rust callback the map script invokes with the clicked site name.
///
/// The closure is leaked and stays installed for the life of the page.
pub fn set_marker_click_handler<F>(handler: F)
where
    F: FnMut(String) + 'static,
{
    let Some(window) = web_sys::window() else {
        log::error!("No window; marker clicks will be ignored");
        return;
    };
    let closure = Closure::<dyn FnMut(String)>::new(handler);
    let installed = js_sys::Reflect::set(
        &window,
        &JsValue::from_str(MARKER_CLICK_HANDLER),
        closure.as_ref(),
    );
    if let Err(e) = installed {
        log::error!("Failed to install marker click handler: {:?}", e);
        return;
    }
    closure.forget();
}

/// Clear the chart in the given container and cancel any queued render.
pub fn destroy_chart(container_id: &str) {
    call_js(&destroy_chart_js(container_id));
}
