//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//!
//! The two forms are independent: each has its own request machine, query
//! slot, response slot and message slot, so an in-flight heatmap request
//! never blocks the graph form and vice versa.

use aq_core::{GraphQuery, HeatmapQuery, HeatmapResponse, LineGraphResponse, RequestState};
use dioxus::prelude::*;

/// Which query type the shell currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Heatmap,
    LineGraph,
}

impl FormKind {
    pub const ALL: [FormKind; 2] = [FormKind::Heatmap, FormKind::LineGraph];

    pub fn label(&self) -> &'static str {
        match self {
            FormKind::Heatmap => "Mapa de Calor",
            FormKind::LineGraph => "Gráfico de Linhas",
        }
    }

    pub fn from_label(label: &str) -> Option<FormKind> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

/// Shared application state for the air quality visualizer.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Which form/view pair is visible
    pub form_kind: Signal<FormKind>,

    /// Heatmap request lifecycle (one in-flight request max)
    pub heatmap_request: Signal<RequestState>,
    /// Last submitted heatmap query; writing here triggers a fetch
    pub heatmap_query: Signal<Option<HeatmapQuery>>,
    /// Current heatmap response, replaced wholesale per request
    pub heatmap_response: Signal<Option<HeatmapResponse>>,
    /// Indicator the current heatmap was requested for (drives coloring)
    pub selected_indicator: Signal<String>,
    /// Active time bucket shown on the map
    pub active_bucket: Signal<Option<u32>>,
    /// Validation or failure message for the heatmap form
    pub heatmap_msg: Signal<Option<String>>,

    /// Graph request lifecycle
    pub graph_request: Signal<RequestState>,
    /// Last submitted graph query; writing here triggers a fetch
    pub graph_query: Signal<Option<GraphQuery>>,
    /// Current line-graph response, replaced wholesale per request
    pub graph_response: Signal<Option<LineGraphResponse>>,
    /// Validation or failure message for the graph form
    pub graph_msg: Signal<Option<String>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            form_kind: Signal::new(FormKind::Heatmap),
            heatmap_request: Signal::new(RequestState::Idle),
            heatmap_query: Signal::new(None),
            heatmap_response: Signal::new(None),
            selected_indicator: Signal::new(String::new()),
            active_bucket: Signal::new(None),
            heatmap_msg: Signal::new(None),
            graph_request: Signal::new(RequestState::Idle),
            graph_query: Signal::new(None),
            graph_response: Signal::new(None),
            graph_msg: Signal::new(None),
        }
    }
}
