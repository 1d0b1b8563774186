//! Air quality visualizer for metropolitan São Paulo.
//!
//! A single-page Dioxus app with two query types sharing one shell:
//! - a heatmap of spatially interpolated pollutant readings, drawn as a
//!   colored rectangle grid on a Leaflet map with a time-bucket slider;
//! - a line graph of per-indicator time-series, drawn with D3.js.
//!
//! Data flow:
//! 1. A form builds a backend-ready query (`aq-core` builders) and writes it
//!    into `AppState`.
//! 2. A fetch effect dispatches the query through `aq-api` while the form's
//!    request machine is `Pending`; at most one request per form is in
//!    flight, a second submit is refused client-side.
//! 3. A render effect reshapes the response (`aq-core`) and hands
//!    chart-ready JSON to the JS widgets via `aq_chart_ui::js_bridge`.
//!    The previous chart/layer is torn down on every new response.

use aq_api::ApiClient;
use aq_chart_ui::components::{
    ChartContainer, ChartHeader, ErrorDisplay, GraphForm, HeatmapForm, HeatmapLegend,
    LoadingSpinner, TimeBucketSlider,
};
use aq_chart_ui::js_bridge;
use aq_chart_ui::state::{AppState, FormKind};
use aq_core::{align_series, cells_for_bucket, find_indicator, GridGeometry};
use dioxus::prelude::*;

/// DOM id for the Leaflet map container.
const MAP_CONTAINER_ID: &str = "heatmap-map";
/// DOM id for the D3 line chart container.
const CHART_CONTAINER_ID: &str = "line-chart";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("aq-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // Initialize widget scripts (one-time)
    use_effect(|| {
        js_bridge::init_widgets();
    });

    // ─── Effect: dispatch a heatmap request when the form submits ───
    use_effect(move || {
        let query = match (state.heatmap_query)() {
            Some(query) => query,
            None => return,
        };
        let started = state.heatmap_request.peek().start();
        state.heatmap_request.set(started);
        let client = ApiClient::from_env();
        spawn(async move {
            match client.fetch_heatmap(&query).await {
                Ok(response) => {
                    state
                        .active_bucket
                        .set(response.bucket_indices().first().copied());
                    state.selected_indicator.set(query.indicator.clone());
                    state.heatmap_response.set(Some(response));
                    state.heatmap_msg.set(None);
                    let settled = state.heatmap_request.peek().succeed();
                    state.heatmap_request.set(settled);
                }
                Err(err) => {
                    log::error!("heatmap request failed: {err}");
                    state.heatmap_response.set(None);
                    state
                        .heatmap_msg
                        .set(Some("Falha ao consultar o servidor.".to_string()));
                    let settled = state.heatmap_request.peek().fail();
                    state.heatmap_request.set(settled);
                }
            }
        });
    });

    // ─── Effect: dispatch a line-graph request when the form submits ───
    use_effect(move || {
        let query = match (state.graph_query)() {
            Some(query) => query,
            None => return,
        };
        let started = state.graph_request.peek().start();
        state.graph_request.set(started);
        let client = ApiClient::from_env();
        spawn(async move {
            match client.fetch_line_graph(&query).await {
                Ok(response) => {
                    state.graph_response.set(Some(response));
                    state.graph_msg.set(None);
                    let settled = state.graph_request.peek().succeed();
                    state.graph_request.set(settled);
                }
                Err(err) => {
                    log::error!("line graph request failed: {err}");
                    state.graph_response.set(None);
                    state
                        .graph_msg
                        .set(Some("Falha ao consultar o servidor.".to_string()));
                    let settled = state.graph_request.peek().fail();
                    state.graph_request.set(settled);
                }
            }
        });
    });

    let form_kind = (state.form_kind)();

    rsx! {
        div {
            style: "max-width: 960px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            h2 {
                style: "margin: 8px 0;",
                "Qualidade do Ar — Região Metropolitana de São Paulo"
            }

            FormChoice {}

            if form_kind == FormKind::Heatmap {
                HeatmapPane {}
            } else {
                GraphPane {}
            }
        }
    }
}

/// Selector for which query type to use.
#[component]
fn FormChoice() -> Element {
    let mut state = use_context::<AppState>();
    let current = (state.form_kind)();
    let options: Vec<(FormKind, &'static str)> = FormKind::ALL
        .into_iter()
        .map(|kind| (kind, kind.label()))
        .collect();

    let on_change = move |evt: Event<FormData>| {
        if let Some(kind) = FormKind::from_label(&evt.value()) {
            state.form_kind.set(kind);
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                style: "font-weight: bold; margin-right: 8px;",
                "Tipo de consulta: "
            }
            select {
                onchange: on_change,
                for (kind, label) in options {
                    option {
                        value: "{label}",
                        selected: kind == current,
                        "{label}"
                    }
                }
            }
        }
    }
}

/// Heatmap form plus map view.
#[component]
fn HeatmapPane() -> Element {
    let state = use_context::<AppState>();

    // ─── Effect: redraw the rectangle layer for the active bucket ───
    // Re-runs on a new response, slider movement, or pane remount; never
    // refetches. The old layer is always discarded first.
    use_effect(move || {
        let response = (state.heatmap_response)();
        let bucket = (state.active_bucket)();
        let indicator_name = (state.selected_indicator)();

        js_bridge::destroy_heatmap_grid(MAP_CONTAINER_ID);
        let (Some(response), Some(bucket)) = (response, bucket) else {
            return;
        };
        let indicator = match find_indicator(&indicator_name) {
            Some(indicator) => indicator,
            None => {
                log::warn!("no catalog entry for indicator {indicator_name:?}");
                return;
            }
        };

        let geometry = GridGeometry::sao_paulo();
        let cells = cells_for_bucket(&response, bucket, indicator, &geometry);
        if cells.is_empty() {
            // empty bucket: the layer stays cleared
            return;
        }

        let data_json = serde_json::to_string(&cells).unwrap_or_default();
        let (lat, long) = geometry.center();
        let config_json = serde_json::json!({
            "center": [lat, long],
            "zoom": 11,
        })
        .to_string();
        js_bridge::render_heatmap_grid(MAP_CONTAINER_ID, &data_json, &config_json);
    });

    let busy = (state.heatmap_request)().is_busy();
    let indicator = (state.selected_indicator)();
    let has_response = state.heatmap_response.read().is_some();
    let unit = find_indicator(&indicator)
        .map(|i| i.measure_unit.to_string())
        .unwrap_or_default();

    rsx! {
        HeatmapForm {}

        if let Some(msg) = state.heatmap_msg.read().as_ref() {
            ErrorDisplay { message: msg.clone() }
        }

        if busy {
            LoadingSpinner {}
        }

        if has_response {
            ChartHeader {
                title: format!("Mapa de calor — {indicator}"),
                unit_description: unit,
            }
            TimeBucketSlider {}
            HeatmapLegend { indicator }
        }

        ChartContainer {
            id: MAP_CONTAINER_ID.to_string(),
            loading: busy,
            min_height: 480,
        }
    }
}

/// Graph form plus line chart view.
#[component]
fn GraphPane() -> Element {
    let state = use_context::<AppState>();

    // ─── Effect: rebuild the chart from the current response ───
    // The previous chart instance is destroyed first; an empty response or
    // an unusable shape leaves no chart rendered.
    use_effect(move || {
        let response = (state.graph_response)();

        js_bridge::destroy_line_chart(CHART_CONTAINER_ID);
        let response = match response {
            Some(response) => response,
            None => return,
        };
        if response.is_empty() {
            return;
        }

        match align_series(&response) {
            Ok(chart) => {
                let data_json = serde_json::json!({
                    "labels": chart.axis_labels(),
                    "series": chart.series,
                })
                .to_string();
                let config_json = serde_json::json!({
                    "xLabel": chart.time_unit.axis_label(),
                    "yLabel": "Concentração média",
                })
                .to_string();
                js_bridge::render_line_chart(CHART_CONTAINER_ID, &data_json, &config_json);
            }
            Err(err) => {
                log::error!("cannot render line graph: {err}");
            }
        }
    });

    let busy = (state.graph_request)().is_busy();
    let has_response = state.graph_response.read().is_some();

    rsx! {
        GraphForm {}

        if let Some(msg) = state.graph_msg.read().as_ref() {
            ErrorDisplay { message: msg.clone() }
        }

        if busy {
            LoadingSpinner {}
        }

        if has_response {
            ChartHeader {
                title: "Gráfico de linhas".to_string(),
                unit_description: String::new(),
            }
        }

        ChartContainer {
            id: CHART_CONTAINER_ID.to_string(),
            loading: busy,
            min_height: 440,
        }
    }
}
