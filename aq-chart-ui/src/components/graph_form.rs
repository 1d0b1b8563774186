//! Line-graph query form.
//!
//! A checkbox per station indicator plus a time period selector. Periods
//! that aggregate within a year add a bare month field; the daily period
//! adds a year + month pair. The selection logic lives in
//! `GraphQueryBuilder`; this component renders its current state.

use aq_core::catalog::GRAPH_INDICATORS;
use aq_core::{GraphInterval, GraphQueryBuilder};
use dioxus::prelude::*;

use crate::state::AppState;

/// Line-graph query form. Submits by writing the built query into AppState.
#[component]
pub fn GraphForm() -> Element {
    let mut state = use_context::<AppState>();
    let mut builder = use_signal(GraphQueryBuilder::new);

    let interval = builder.read().selected_interval();
    let month = builder.read().month_value().to_string();
    let year = builder.read().year_value().to_string();
    let selected: Vec<(&'static str, bool)> = GRAPH_INDICATORS
        .iter()
        .map(|name| (*name, builder.read().is_selected(name)))
        .collect();
    let interval_options: Vec<(GraphInterval, &'static str)> = GraphInterval::ALL
        .into_iter()
        .map(|candidate| (candidate, candidate.label()))
        .collect();

    let needs_month = interval.map(|i| i.needs_month()).unwrap_or(false);
    let needs_year_and_month = interval.map(|i| i.needs_year_and_month()).unwrap_or(false);

    let on_period_change = move |evt: Event<FormData>| {
        if let Some(interval) = GraphInterval::from_label(&evt.value()) {
            builder.write().interval(interval);
        }
    };
    let on_month_change = move |evt: Event<FormData>| {
        builder.write().set_month(&evt.value());
    };
    let on_year_change = move |evt: Event<FormData>| {
        builder.write().set_year(&evt.value());
    };
    let on_submit = move |_| {
        if (state.graph_request)().is_busy() {
            log::info!("graph request already in flight, submission ignored");
            return;
        }
        match builder.read().build() {
            Ok(query) => {
                state.graph_msg.set(None);
                state.graph_query.set(Some(query));
            }
            Err(err) => {
                state.graph_msg.set(Some(err.to_string()));
            }
        }
    };

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 8px; max-width: 560px;",

            div {
                p { style: "font-weight: bold; margin: 0 0 4px 0;", "Indicadores:" }
                div {
                    style: "display: grid; grid-template-columns: repeat(5, 1fr); gap: 4px;",
                    for (name, checked) in selected {
                        label {
                            style: "font-size: 13px;",
                            input {
                                r#type: "checkbox",
                                checked: checked,
                                onchange: move |evt: Event<FormData>| {
                                    builder.write().toggle_indicator(name, evt.checked());
                                },
                            }
                            " {name}"
                        }
                    }
                }
            }

            label {
                style: "font-weight: bold;",
                "Período: "
                select {
                    onchange: on_period_change,
                    option { value: "", selected: interval.is_none(), "-- selecione --" }
                    for (candidate, label) in interval_options {
                        option {
                            value: "{label}",
                            selected: Some(candidate) == interval,
                            "{label}"
                        }
                    }
                }
            }

            if needs_year_and_month {
                label {
                    style: "margin-left: 16px;",
                    "Ano: "
                    input {
                        r#type: "number",
                        value: "{year}",
                        style: "width: 90px;",
                        onchange: on_year_change,
                    }
                }
            }

            if needs_month || needs_year_and_month {
                label {
                    style: "margin-left: 16px;",
                    "Mês: "
                    input {
                        r#type: "number",
                        min: "1",
                        max: "12",
                        value: "{month}",
                        style: "width: 90px;",
                        onchange: on_month_change,
                    }
                }
            }

            button {
                style: "margin-top: 8px; padding: 6px 16px; width: fit-content;",
                onclick: on_submit,
                "Gerar gráfico"
            }
        }
    }
}
