//! Line-graph response reshaping.
//!
//! The backend returns one time-series per requested indicator:
//! `{"line_graph": [{"MP2.5": [{"year": 2020, "average_value": 12.3}, ...]}, ...]}`.
//! Each point carries exactly one time-unit key (`year`, `month`, `day` or
//! `hour`) plus `average_value`, and the unit is consistent within one
//! response. Series may cover different time values, so before charting,
//! every series is aligned to the sorted union of all time values, with gaps
//! left as `None` so the chart shows holes instead of misaligned points.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One reading: a single time-unit key plus `average_value`.
pub type SeriesPoint = BTreeMap<String, f64>;

/// One response entry: a single-key map from indicator name to its points.
pub type IndicatorSeries = BTreeMap<String, Vec<SeriesPoint>>;

/// Full line-graph response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGraphResponse {
    pub line_graph: Vec<IndicatorSeries>,
}

impl LineGraphResponse {
    pub fn is_empty(&self) -> bool {
        self.line_graph.is_empty()
    }
}

/// Rendering failure for a structurally unusable response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineGraphError {
    #[error("the response contains no data points")]
    EmptyResponse,
    #[error("no recognized time unit in the response")]
    UnknownTimeUnit,
}

/// Time resolution of a response, detected from the point key set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Year,
    Month,
    Day,
    Hour,
}

impl TimeUnit {
    const CANDIDATES: [TimeUnit; 4] = [TimeUnit::Year, TimeUnit::Month, TimeUnit::Day, TimeUnit::Hour];

    /// Wire key carrying this unit's value in a data point.
    pub fn key(&self) -> &'static str {
        match self {
            TimeUnit::Year => "year",
            TimeUnit::Month => "month",
            TimeUnit::Day => "day",
            TimeUnit::Hour => "hour",
        }
    }

    /// Localized x-axis title. Fixed lookup.
    pub fn axis_label(&self) -> &'static str {
        match self {
            TimeUnit::Year => "Ano",
            TimeUnit::Month => "Mês",
            TimeUnit::Day => "Dia",
            TimeUnit::Hour => "Hora",
        }
    }

    /// Detect the unit from the first point of the first series. The backend
    /// contract has no explicit discriminator, so absence of every candidate
    /// key is a contract violation reported to the caller.
    pub fn detect(response: &LineGraphResponse) -> Result<TimeUnit, LineGraphError> {
        let first_point = response
            .line_graph
            .first()
            .and_then(|series| series.values().next())
            .and_then(|points| points.first())
            .ok_or(LineGraphError::EmptyResponse)?;
        Self::CANDIDATES
            .into_iter()
            .find(|unit| first_point.contains_key(unit.key()))
            .ok_or(LineGraphError::UnknownTimeUnit)
    }
}

/// One chart dataset: label, deterministic color, values aligned to the
/// shared axis with `None` gaps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub color: String,
    pub values: Vec<Option<f64>>,
}

/// A fully chart-ready line graph.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedChart {
    pub time_unit: TimeUnit,
    pub axis: Vec<f64>,
    pub series: Vec<ChartSeries>,
}

impl AlignedChart {
    /// Axis tick labels. Time values are integers in practice (years, days,
    /// hours), so they render without a fractional part.
    pub fn axis_labels(&self) -> Vec<String> {
        self.axis
            .iter()
            .map(|t| {
                if t.fract() == 0.0 {
                    format!("{}", *t as i64)
                } else {
                    t.to_string()
                }
            })
            .collect()
    }
}

/// Deterministic, visually distinct series color via hue rotation.
pub fn series_color(index: usize) -> String {
    let hue = (index * 137) % 360;
    format!("hsl({hue}, 70%, 45%)")
}

/// Align every series of a response to the sorted union of its time values.
pub fn align_series(response: &LineGraphResponse) -> Result<AlignedChart, LineGraphError> {
    let time_unit = TimeUnit::detect(response)?;
    let key = time_unit.key();

    let mut axis: Vec<f64> = Vec::new();
    for series in &response.line_graph {
        for points in series.values() {
            for point in points {
                if let Some(t) = point.get(key) {
                    if !axis.contains(t) {
                        axis.push(*t);
                    }
                }
            }
        }
    }
    axis.sort_by(f64::total_cmp);

    let series = response
        .line_graph
        .iter()
        .flat_map(|entry| entry.iter())
        .enumerate()
        .map(|(index, (name, points))| {
            let values = axis
                .iter()
                .map(|t| {
                    points
                        .iter()
                        .find(|point| point.get(key) == Some(t))
                        .and_then(|point| point.get("average_value").copied())
                })
                .collect();
            ChartSeries {
                label: name.clone(),
                color: series_color(index),
                values,
            }
        })
        .collect();

    Ok(AlignedChart { time_unit, axis, series })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> LineGraphResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_detects_each_time_unit() {
        let yearly = response(r#"{"line_graph": [{"O3": [{"year": 2020, "average_value": 1.0}]}]}"#);
        assert_eq!(TimeUnit::detect(&yearly), Ok(TimeUnit::Year));
        let hourly = response(r#"{"line_graph": [{"O3": [{"hour": 14, "average_value": 1.0}]}]}"#);
        assert_eq!(TimeUnit::detect(&hourly), Ok(TimeUnit::Hour));
    }

    #[test]
    fn test_unknown_time_unit_is_a_contract_violation() {
        let bad = response(r#"{"line_graph": [{"O3": [{"week": 7, "average_value": 1.0}]}]}"#);
        assert_eq!(TimeUnit::detect(&bad), Err(LineGraphError::UnknownTimeUnit));
        assert_eq!(align_series(&bad), Err(LineGraphError::UnknownTimeUnit));
    }

    #[test]
    fn test_empty_response_reported() {
        let empty = response(r#"{"line_graph": []}"#);
        assert!(empty.is_empty());
        assert_eq!(align_series(&empty), Err(LineGraphError::EmptyResponse));
    }

    #[test]
    fn test_series_aligned_to_union_axis() {
        let resp = response(
            r#"{"line_graph": [
                {"A": [{"year": 2020, "average_value": 1.0},
                        {"year": 2021, "average_value": 2.0},
                        {"year": 2023, "average_value": 3.0}]},
                {"B": [{"year": 2021, "average_value": 4.0},
                        {"year": 2022, "average_value": 5.0}]}
            ]}"#,
        );
        let chart = align_series(&resp).unwrap();
        assert_eq!(chart.time_unit, TimeUnit::Year);
        assert_eq!(chart.axis, vec![2020.0, 2021.0, 2022.0, 2023.0]);
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].label, "A");
        assert_eq!(
            chart.series[0].values,
            vec![Some(1.0), Some(2.0), None, Some(3.0)]
        );
        assert_eq!(
            chart.series[1].values,
            vec![None, Some(4.0), Some(5.0), None]
        );
    }

    #[test]
    fn test_unsorted_points_sorted_on_axis() {
        let resp = response(
            r#"{"line_graph": [{"A": [
                {"day": 3, "average_value": 30.0},
                {"day": 1, "average_value": 10.0},
                {"day": 2, "average_value": 20.0}
            ]}]}"#,
        );
        let chart = align_series(&resp).unwrap();
        assert_eq!(chart.axis, vec![1.0, 2.0, 3.0]);
        assert_eq!(
            chart.series[0].values,
            vec![Some(10.0), Some(20.0), Some(30.0)]
        );
    }

    #[test]
    fn test_axis_labels_render_as_integers() {
        let resp = response(r#"{"line_graph": [{"A": [{"year": 2020, "average_value": 1.0}, {"year": 2021, "average_value": 2.0}]}]}"#);
        let chart = align_series(&resp).unwrap();
        assert_eq!(chart.axis_labels(), vec!["2020".to_string(), "2021".to_string()]);
    }

    #[test]
    fn test_series_colors_are_deterministic_and_distinct() {
        assert_eq!(series_color(0), "hsl(0, 70%, 45%)");
        assert_eq!(series_color(1), "hsl(137, 70%, 45%)");
        assert_eq!(series_color(2), "hsl(274, 70%, 45%)");
        assert_eq!(series_color(3), "hsl(51, 70%, 45%)");
        // rotation keeps neighbors far apart for a long run of series
        let colors: Vec<String> = (0..19).map(series_color).collect();
        let unique: std::collections::BTreeSet<&String> = colors.iter().collect();
        assert_eq!(unique.len(), colors.len());
    }

    #[test]
    fn test_axis_title_localization() {
        assert_eq!(TimeUnit::Year.axis_label(), "Ano");
        assert_eq!(TimeUnit::Month.axis_label(), "Mês");
        assert_eq!(TimeUnit::Day.axis_label(), "Dia");
        assert_eq!(TimeUnit::Hour.axis_label(), "Hora");
    }
}
