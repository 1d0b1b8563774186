//! Slider to move through heatmap time buckets.
//!
//! Moving the slider only changes the active bucket signal; redraw happens
//! locally from the already-fetched response, never against the backend.

use crate::state::AppState;
use dioxus::prelude::*;

/// Time bucket slider. Hidden while there is no response or only one bucket.
#[component]
pub fn TimeBucketSlider() -> Element {
    let mut state = use_context::<AppState>();

    let indices = match state.heatmap_response.read().as_ref() {
        Some(response) => response.bucket_indices(),
        None => return rsx! {},
    };
    let (Some(min), Some(max)) = (indices.first().copied(), indices.last().copied()) else {
        return rsx! {};
    };
    if min == max {
        return rsx! {};
    }
    let active = (state.active_bucket)().unwrap_or(min);

    let on_input = move |evt: Event<FormData>| {
        if let Ok(bucket) = evt.value().parse::<u32>() {
            state.active_bucket.set(Some(bucket));
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "Período: "
            }
            input {
                r#type: "range",
                min: "{min}",
                max: "{max}",
                value: "{active}",
                style: "flex: 1;",
                oninput: on_input,
            }
            span { "{active}" }
        }
    }
}
