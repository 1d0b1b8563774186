//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The line chart is drawn by D3.js and the heatmap grid by Leaflet; both
//! widgets live in `assets/js/*.js`, are evaluated as globals (no ES
//! modules) and exposed via `window.*`. Rust passes fully-shaped JSON in
//! (axis + aligned series for the chart, colored rectangles for the grid);
//! everything visual happens on the JS side.

// Embed the widget JS files at compile time
static LINE_CHART_JS: &str = include_str!("../assets/js/line-chart.js");
static HEATMAP_GRID_JS: &str = include_str!("../assets/js/heatmap-grid.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('AQ JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize widget scripts with a wait-for-libraries polling loop.
///
/// The widget files define functions like `renderLineChart(...)` via
/// `function` declarations. To ensure they become globally accessible
/// (not block-scoped inside the setInterval callback), they are stored on
/// `window`, evaluated at global scope via indirect eval once both D3 and
/// Leaflet are ready, and then explicitly promoted to `window.*`.
pub fn init_widgets() {
    let all_js = [LINE_CHART_JS, HEATMAP_GRID_JS].join("\n");

    let store_js = format!(
        "window.__aqWidgetScripts = {};",
        serde_json::to_string(&all_js).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            var waitForLibs = setInterval(function() {
                if (typeof d3 !== 'undefined' && typeof L !== 'undefined') {
                    clearInterval(waitForLibs);
                    // Eval at global scope via indirect eval
                    (0, eval)(window.__aqWidgetScripts);
                    delete window.__aqWidgetScripts;
                    // Promote function declarations to window explicitly
                    if (typeof renderLineChart !== 'undefined') window.renderLineChart = renderLineChart;
                    if (typeof destroyLineChart !== 'undefined') window.destroyLineChart = destroyLineChart;
                    if (typeof renderHeatmapGrid !== 'undefined') window.renderHeatmapGrid = renderHeatmapGrid;
                    if (typeof destroyHeatmapGrid !== 'undefined') window.destroyHeatmapGrid = destroyHeatmapGrid;
                    window.__aqWidgetsReady = true;
                    console.log('AQ widgets initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Render the multi-series line chart.
///
/// Uses a polling loop to wait for the widget scripts to initialize and the
/// container DOM element to exist before rendering.
pub fn render_line_chart(container_id: &str, data_json: &str, config_json: &str) {
    let escaped_data = data_json.replace('\'', "\\'").replace('\n', "");
    let escaped_config = config_json.replace('\'', "\\'").replace('\n', "");
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__aqWidgetsReady &&
                    typeof window.renderLineChart !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.renderLineChart('{container_id}', '{escaped_data}', '{escaped_config}');
                    }} catch(e) {{ console.error('[AQ] renderLineChart error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Render the colored rectangle grid onto the Leaflet map.
///
/// Uses the same readiness polling as the line chart.
pub fn render_heatmap_grid(container_id: &str, data_json: &str, config_json: &str) {
    let escaped_data = data_json.replace('\'', "\\'").replace('\n', "");
    let escaped_config = config_json.replace('\'', "\\'").replace('\n', "");
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__aqWidgetsReady &&
                    typeof window.renderHeatmapGrid !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.renderHeatmapGrid('{container_id}', '{escaped_data}', '{escaped_config}');
                    }} catch(e) {{ console.error('[AQ] renderHeatmapGrid error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Destroy the chart in the given container, if any.
pub fn destroy_line_chart(container_id: &str) {
    call_js(&format!(
        "if (typeof window.destroyLineChart !== 'undefined') window.destroyLineChart('{container_id}');",
    ));
}

/// Remove the active rectangle layer from the map, if any.
pub fn destroy_heatmap_grid(container_id: &str) {
    call_js(&format!(
        "if (typeof window.destroyHeatmapGrid !== 'undefined') window.destroyHeatmapGrid('{container_id}');",
    ));
}
