//! Quality scale legend for the heatmap.
//!
//! Rebuilt on every indicator or response change; band computation lives in
//! `aq_core::heatmap::legend_bands`.

use aq_core::heatmap::legend_bands;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct HeatmapLegendProps {
    /// Name of the indicator the current response was requested for.
    pub indicator: String,
}

/// Color legend listing each quality band of the selected indicator.
#[component]
pub fn HeatmapLegend(props: HeatmapLegendProps) -> Element {
    let Some(indicator) = aq_core::find_indicator(&props.indicator) else {
        return rsx! {};
    };
    let bands = legend_bands(indicator);

    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 12px; margin: 8px 0; font-size: 12px;",
            for (color, label) in bands {
                div {
                    style: "display: flex; align-items: center; gap: 4px;",
                    span {
                        style: "display: inline-block; width: 14px; height: 14px; background: {color}; opacity: 0.55; border: 1px solid #999;",
                    }
                    "{label}"
                }
            }
        }
    }
}
