//! Heatmap query form.
//!
//! Field composition is dynamic: choosing a time granularity replaces the
//! date field set, choosing an interpolation method replaces the parameter
//! field set with the method's declared schema. All of that lives in
//! `HeatmapQueryBuilder`; this component only renders the builder's current
//! field sets and forwards input events into it.

use aq_core::catalog::{INDICATORS, INTERPOLATOR_METHODS};
use aq_core::{find_method, DateField, HeatmapQueryBuilder, ParamKind, TimeInterval};
use dioxus::prelude::*;

use crate::state::AppState;

/// Render-ready view of one method parameter field.
struct ParamField {
    name: &'static str,
    value: String,
    kind: ParamKind,
    input_type: &'static str,
    options: &'static [&'static str],
}

/// Heatmap query form. Submits by writing the built query into AppState.
#[component]
pub fn HeatmapForm() -> Element {
    let mut state = use_context::<AppState>();
    let mut builder = use_signal(HeatmapQueryBuilder::new);

    let indicator = builder.read().indicator_name().to_string();
    let method_name = builder.read().method_name().to_string();
    let interval = builder.read().selected_interval();

    let date_fields: Vec<(DateField, &'static str, String)> = builder
        .read()
        .date_fields()
        .iter()
        .map(|field| (*field, field.label(), builder.read().field_value(*field).to_string()))
        .collect();
    let interval_options: Vec<(TimeInterval, &'static str)> = TimeInterval::ALL
        .into_iter()
        .map(|candidate| (candidate, candidate.label()))
        .collect();

    let param_fields: Vec<ParamField> = find_method(&method_name)
        .map(|method| {
            method
                .params
                .iter()
                .map(|param| ParamField {
                    name: param.name,
                    value: builder.read().param_value(param.name).to_string(),
                    kind: param.kind,
                    input_type: match param.kind {
                        ParamKind::Number => "number",
                        ParamKind::Text | ParamKind::Checkbox => "text",
                    },
                    options: param.options,
                })
                .collect()
        })
        .unwrap_or_default();

    let on_indicator_change = move |evt: Event<FormData>| {
        builder.write().indicator(&evt.value());
    };
    let on_method_change = move |evt: Event<FormData>| {
        builder.write().method(&evt.value());
    };
    let on_interval_change = move |evt: Event<FormData>| {
        if let Some(interval) = TimeInterval::from_label(&evt.value()) {
            builder.write().interval(interval);
        }
    };
    let on_submit = move |_| {
        if (state.heatmap_request)().is_busy() {
            log::info!("heatmap request already in flight, submission ignored");
            return;
        }
        match builder.read().build() {
            Ok(query) => {
                state.heatmap_msg.set(None);
                state.heatmap_query.set(Some(query));
            }
            Err(err) => {
                state.heatmap_msg.set(Some(err.to_string()));
            }
        }
    };

    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 8px; max-width: 420px;",

            label {
                style: "font-weight: bold;",
                "Indicador: "
                select {
                    onchange: on_indicator_change,
                    option { value: "", selected: indicator.is_empty(), "-- selecione --" }
                    for entry in INDICATORS.iter() {
                        option {
                            value: "{entry.name}",
                            selected: entry.name == indicator,
                            "{entry.name} ({entry.measure_unit})"
                        }
                    }
                }
            }

            label {
                style: "font-weight: bold;",
                "Método de interpolação: "
                select {
                    onchange: on_method_change,
                    option { value: "", selected: method_name.is_empty(), "-- selecione --" }
                    for method in INTERPOLATOR_METHODS.iter() {
                        option {
                            value: "{method.name}",
                            selected: method.name == method_name,
                            "{method.name}"
                        }
                    }
                }
            }

            for field in param_fields {
                label {
                    style: "margin-left: 16px;",
                    "{field.name}: "
                    if field.kind == ParamKind::Checkbox {
                        input {
                            r#type: "checkbox",
                            checked: field.value == "true",
                            onchange: move |evt: Event<FormData>| {
                                let value = if evt.checked() { "true" } else { "false" };
                                builder.write().set_param(field.name, value);
                            },
                        }
                    } else if !field.options.is_empty() {
                        select {
                            onchange: move |evt: Event<FormData>| {
                                builder.write().set_param(field.name, &evt.value());
                            },
                            option { value: "", selected: field.value.is_empty(), "-- selecione --" }
                            for opt in field.options.iter() {
                                option { value: "{opt}", selected: *opt == field.value, "{opt}" }
                            }
                        }
                    } else {
                        input {
                            r#type: "{field.input_type}",
                            value: "{field.value}",
                            onchange: move |evt: Event<FormData>| {
                                builder.write().set_param(field.name, &evt.value());
                            },
                        }
                    }
                }
            }

            label {
                style: "font-weight: bold;",
                "Período: "
                select {
                    onchange: on_interval_change,
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

            for (field, field_label, value) in date_fields {
                label {
                    style: "margin-left: 16px;",
                    "{field_label}: "
                    input {
                        r#type: "number",
                        value: "{value}",
                        style: "width: 90px;",
                        onchange: move |evt: Event<FormData>| {
                            builder.write().set_field(field, &evt.value());
                        },
                    }
                }
            }

            button {
                style: "margin-top: 8px; padding: 6px 16px; width: fit-content;",
                onclick: on_submit,
                "Gerar mapa"
            }
        }
    }
}
