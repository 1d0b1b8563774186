//! Reusable Dioxus RSX components for the air quality app.

mod chart_container;
mod chart_header;
mod error_display;
mod graph_form;
mod heatmap_form;
mod heatmap_legend;
mod loading_spinner;
mod time_bucket_slider;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use error_display::ErrorDisplay;
pub use graph_form::GraphForm;
pub use heatmap_form::HeatmapForm;
pub use heatmap_legend::HeatmapLegend;
pub use loading_spinner::LoadingSpinner;
pub use time_bucket_slider::TimeBucketSlider;
