//! Core domain types for the São Paulo air quality visualizer.
//!
//! This crate holds everything that does not touch the DOM:
//! - `catalog`: bundled reference data (pollutant indicators, interpolation methods)
//! - `heatmap_query` / `graph_query`: variant-typed query builders that turn
//!   raw form input into backend-ready payloads
//! - `heatmap` / `linegraph`: reshaping of backend responses into
//!   render-ready grids and aligned chart series
//! - `request_state`: the per-form request lifecycle machine
//!
//! All of it is plain Rust, unit-tested natively, and consumed by the
//! Dioxus/WASM layer in `aq-chart-ui` and `aq-app`.

pub mod catalog;
pub mod graph_query;
pub mod heatmap;
pub mod heatmap_query;
pub mod linegraph;
pub mod request_state;

pub use catalog::{find_indicator, find_method, Indicator, InterpolatorMethod, MethodParam, ParamKind};
pub use graph_query::{GraphInterval, GraphQuery, GraphQueryBuilder};
pub use heatmap::{cells_for_bucket, legend_bands, GridCell, GridGeometry, HeatmapResponse, Sample};
pub use heatmap_query::{
    DateField, HeatmapQuery, HeatmapQueryBuilder, InterpolatorSelection, TimeInterval, TimeSelection,
};
pub use linegraph::{align_series, series_color, AlignedChart, ChartSeries, LineGraphResponse, TimeUnit};
pub use request_state::RequestState;

use thiserror::Error;

/// Validation failure raised by the query builders before any request is sent.
///
/// The `Display` text is shown to the user verbatim, so messages are kept
/// short and free of internal jargon.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("select an indicator")]
    MissingIndicator,
    #[error("select an interpolation method")]
    MissingMethod,
    #[error("unknown interpolation method: {0}")]
    UnknownMethod(String),
    #[error("parameter \"{0}\" is required")]
    MissingParam(String),
    #[error("select a time period")]
    MissingInterval,
    #[error("field \"{0}\" is required")]
    MissingField(&'static str),
    #[error("field \"{0}\" must be a number")]
    InvalidNumber(&'static str),
    #[error("the selected date does not exist")]
    InvalidDate,
    #[error("select at least one indicator")]
    NoIndicators,
}
