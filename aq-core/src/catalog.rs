//! Bundled reference data: pollutant indicators and interpolation methods.
//!
//! Both catalogs are static, versioned with the UI, and never fetched at
//! runtime. Indicators carry the CETESB-style quality breakpoints used to
//! color heatmap cells; interpolation methods declare the parameter schema
//! that drives the dynamic fields of the heatmap form.

use serde::Serialize;

/// A measured pollutant or environmental quantity.
///
/// `quality_intervals` are ascending breakpoints; `quality_colors` has one
/// more entry than the breakpoints so every value, including those above the
/// last breakpoint, maps to a color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    pub name: &'static str,
    pub quality_intervals: &'static [f64],
    pub quality_colors: &'static [&'static str],
    pub measure_unit: &'static str,
}

impl Indicator {
    /// Color for a measured value: linear scan of the ascending breakpoints,
    /// first breakpoint the value does not exceed wins; values above every
    /// breakpoint get the last color.
    pub fn color_for(&self, value: f64) -> &'static str {
        for (i, breakpoint) in self.quality_intervals.iter().enumerate() {
            if value <= *breakpoint {
                return self.quality_colors[i];
            }
        }
        self.quality_colors[self.quality_colors.len() - 1]
    }
}

/// Indicators with full quality scales, selectable on the heatmap form.
pub const INDICATORS: &[Indicator] = &[
    Indicator {
        name: "MP2.5",
        quality_intervals: &[25.0, 50.0, 75.0, 125.0],
        quality_colors: &["green", "yellow", "pink", "red", "purple"],
        measure_unit: "µg/m³",
    },
    Indicator {
        name: "MP10",
        quality_intervals: &[50.0, 100.0, 150.0, 250.0],
        quality_colors: &["green", "yellow", "pink", "red", "purple"],
        measure_unit: "µg/m³",
    },
    Indicator {
        name: "O3",
        quality_intervals: &[100.0, 130.0, 160.0, 200.0],
        quality_colors: &["green", "yellow", "pink", "red", "purple"],
        measure_unit: "µg/m³",
    },
    Indicator {
        name: "CO",
        quality_intervals: &[9.0, 11.0, 13.0, 15.0],
        quality_colors: &["green", "yellow", "pink", "red", "purple"],
        measure_unit: "ppm",
    },
    Indicator {
        name: "NO2",
        quality_intervals: &[200.0, 240.0, 320.0, 1130.0],
        quality_colors: &["green", "yellow", "pink", "red", "purple"],
        measure_unit: "µg/m³",
    },
    Indicator {
        name: "SO2",
        quality_intervals: &[20.0, 40.0, 365.0, 800.0],
        quality_colors: &["green", "yellow", "pink", "red", "purple"],
        measure_unit: "µg/m³",
    },
    Indicator {
        name: "TEMP",
        quality_intervals: &[15.0, 20.0, 25.0, 30.0, 35.0, 40.0],
        quality_colors: &["blue", "cyan", "green", "yellow", "orange", "red", "darkred"],
        measure_unit: "°C",
    },
    Indicator {
        name: "UR",
        quality_intervals: &[20.0, 40.0, 60.0, 80.0, 100.0],
        quality_colors: &["darkred", "red", "yellow", "green", "cyan", "blue"],
        measure_unit: "%",
    },
];

/// Station indicator codes offered by the line-graph form. A superset of
/// `INDICATORS`: the extra codes have no quality scale and are only plotted.
pub const GRAPH_INDICATORS: &[&str] = &[
    "MP2.5", "MP10", "O3", "BEN", "CO", "DV", "DVG", "ERT", "NO", "NO2", "NOX", "PRESS", "RADG",
    "RADUV", "SO2", "TEMP", "TOL", "UR", "VV",
];

/// Input kind of an interpolation method parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Number,
    Text,
    Checkbox,
}

/// One declared parameter of an interpolation method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodParam {
    pub name: &'static str,
    pub kind: ParamKind,
    /// Fixed option list for text parameters rendered as a dropdown; empty
    /// means free-form input.
    pub options: &'static [&'static str],
}

impl MethodParam {
    /// Initial field value when the parameter appears on the form.
    pub fn default_value(&self) -> &'static str {
        match self.kind {
            ParamKind::Checkbox => "false",
            ParamKind::Number | ParamKind::Text => "",
        }
    }
}

/// An interpolation algorithm exposed by the backend, with its parameter schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolatorMethod {
    pub name: &'static str,
    pub params: &'static [MethodParam],
}

/// Interpolation methods the backend accepts.
pub const INTERPOLATOR_METHODS: &[InterpolatorMethod] = &[
    InterpolatorMethod {
        name: "KNN",
        params: &[MethodParam {
            name: "k",
            kind: ParamKind::Number,
            options: &[],
        }],
    },
    InterpolatorMethod {
        name: "Kriging",
        params: &[
            MethodParam {
                name: "method",
                kind: ParamKind::Text,
                options: &["ordinary", "universal"],
            },
            MethodParam {
                name: "variogram_model",
                kind: ParamKind::Text,
                options: &["linear", "power", "gaussian", "spherical", "exponential"],
            },
            MethodParam {
                name: "n_lags",
                kind: ParamKind::Number,
                options: &[],
            },
            MethodParam {
                name: "weight",
                kind: ParamKind::Checkbox,
                options: &[],
            },
        ],
    },
];

/// Look up an indicator by name.
pub fn find_indicator(name: &str) -> Option<&'static Indicator> {
    INDICATORS.iter().find(|i| i.name == name)
}

/// Look up an interpolation method by name.
pub fn find_method(name: &str) -> Option<&'static InterpolatorMethod> {
    INTERPOLATOR_METHODS.iter().find(|m| m.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_count_matches_interval_count() {
        for indicator in INDICATORS {
            assert_eq!(
                indicator.quality_colors.len(),
                indicator.quality_intervals.len() + 1,
                "indicator {} has mismatched scale lengths",
                indicator.name
            );
        }
    }

    #[test]
    fn test_intervals_are_ascending() {
        for indicator in INDICATORS {
            let mut prev = f64::NEG_INFINITY;
            for b in indicator.quality_intervals {
                assert!(*b > prev, "indicator {} breakpoints not ascending", indicator.name);
                prev = *b;
            }
        }
    }

    #[test]
    fn test_color_selection_boundaries() {
        let mp25 = find_indicator("MP2.5").unwrap();
        assert_eq!(mp25.color_for(10.0), "green");
        assert_eq!(mp25.color_for(25.0), "green");
        assert_eq!(mp25.color_for(26.0), "yellow");
        assert_eq!(mp25.color_for(125.0), "red");
        assert_eq!(mp25.color_for(126.0), "purple");
    }

    #[test]
    fn test_method_lookup() {
        let kriging = find_method("Kriging").unwrap();
        assert_eq!(kriging.params.len(), 4);
        assert_eq!(kriging.params[3].default_value(), "false");
        assert_eq!(find_method("KNN").unwrap().params[0].name, "k");
        assert!(find_method("IDW").is_none());
    }

    #[test]
    fn test_graph_indicators_cover_catalog() {
        for indicator in INDICATORS {
            assert!(GRAPH_INDICATORS.contains(&indicator.name));
        }
    }
}
