//! Heatmap response reshaping.
//!
//! The backend returns interpolated samples grouped into time buckets:
//! `{"heatmaps": {"1": [{lat, long, value}, ...], "2": [...]}}`. Bucket keys
//! are stringified 1-based contiguous integers; sorted numerically they
//! drive the time slider. This module turns the samples of one bucket into
//! colored grid cells the map widget can draw directly.

use serde::{Deserialize, Serialize};

use crate::catalog::Indicator;

/// One interpolated spatial reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub lat: f64,
    pub long: f64,
    pub value: f64,
}

/// Full heatmap response: one sample set per time bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapResponse {
    pub heatmaps: std::collections::BTreeMap<String, Vec<Sample>>,
}

impl HeatmapResponse {
    /// Bucket indices sorted numerically. Non-numeric keys are dropped with
    /// a log line; the backend never sends them in normal operation.
    pub fn bucket_indices(&self) -> Vec<u32> {
        let mut indices: Vec<u32> = self
            .heatmaps
            .keys()
            .filter_map(|key| match key.parse::<u32>() {
                Ok(index) => Some(index),
                Err(_) => {
                    log::warn!("ignoring non-numeric heatmap bucket key {key:?}");
                    None
                }
            })
            .collect();
        indices.sort_unstable();
        indices
    }

    /// Samples of one bucket, if present.
    pub fn samples(&self, bucket: u32) -> Option<&[Sample]> {
        self.heatmaps.get(&bucket.to_string()).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.heatmaps.is_empty()
    }
}

/// Fixed spatial grid over the metropolitan São Paulo bounding box.
///
/// The box is divided into a constant number of latitude rows; the column
/// count follows from the box aspect ratio so cells come out approximately
/// square. Must stay in sync with the discretization the backend samples on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_long: f64,
    pub max_long: f64,
    pub lat_divisions: usize,
}

impl GridGeometry {
    /// The metropolitan São Paulo discretization used by the backend.
    pub fn sao_paulo() -> Self {
        Self {
            min_lat: -24.007_362_427_882_78,
            max_lat: -23.358_316_887_087_24,
            min_long: -46.834_596_313_888_34,
            max_long: -46.363_598_070_381_85,
            lat_divisions: 20,
        }
    }

    pub fn long_divisions(&self) -> usize {
        let aspect_ratio = (self.max_lat - self.min_lat) / (self.max_long - self.min_long);
        (self.lat_divisions as f64 / aspect_ratio) as usize
    }

    pub fn lat_step(&self) -> f64 {
        (self.max_lat - self.min_lat) / self.lat_divisions as f64
    }

    pub fn long_step(&self) -> f64 {
        (self.max_long - self.min_long) / self.long_divisions() as f64
    }

    /// Box center, used to position the map viewport.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_long + self.max_long) / 2.0,
        )
    }
}

/// One colored rectangle, centered on its sample, ready for the map widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
    pub color: &'static str,
}

/// Rectangles for one time bucket, colored by the indicator's quality scale.
/// An empty or missing bucket yields no cells; the caller clears the layer.
pub fn cells_for_bucket(
    response: &HeatmapResponse,
    bucket: u32,
    indicator: &Indicator,
    geometry: &GridGeometry,
) -> Vec<GridCell> {
    let samples = match response.samples(bucket) {
        Some(samples) => samples,
        None => return Vec::new(),
    };
    let half_lat = geometry.lat_step() / 2.0;
    let half_long = geometry.long_step() / 2.0;
    samples
        .iter()
        .map(|sample| GridCell {
            south: sample.lat - half_lat,
            west: sample.long - half_long,
            north: sample.lat + half_lat,
            east: sample.long + half_long,
            color: indicator.color_for(sample.value),
        })
        .collect()
}

/// Legend bands for an indicator's quality scale: swatch color plus label,
/// one band per color ("≤ first", "> prev – this", "> last", with unit).
pub fn legend_bands(indicator: &Indicator) -> Vec<(&'static str, String)> {
    let unit = indicator.measure_unit;
    let intervals = indicator.quality_intervals;
    indicator
        .quality_colors
        .iter()
        .enumerate()
        .map(|(i, color)| {
            let label = if i == 0 {
                format!("≤ {} {}", fmt_breakpoint(intervals[0]), unit)
            } else if i < intervals.len() {
                format!(
                    "> {} – {} {}",
                    fmt_breakpoint(intervals[i - 1]),
                    fmt_breakpoint(intervals[i]),
                    unit
                )
            } else {
                format!("> {} {}", fmt_breakpoint(intervals[intervals.len() - 1]), unit)
            };
            (*color, label)
        })
        .collect()
}

/// Breakpoints are integers in practice; render them without the ".0".
fn fmt_breakpoint(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_indicator;

    fn response(json: &str) -> HeatmapResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_bucket_indices_sort_numerically() {
        let resp = response(
            r#"{"heatmaps": {"10": [], "2": [], "1": [{"lat": -23.5, "long": -46.6, "value": 12.0}]}}"#,
        );
        assert_eq!(resp.bucket_indices(), vec![1, 2, 10]);
    }

    #[test]
    fn test_empty_response_draws_nothing() {
        let resp = response(r#"{"heatmaps": {}}"#);
        assert!(resp.is_empty());
        assert!(resp.bucket_indices().is_empty());
        let indicator = find_indicator("MP2.5").unwrap();
        let cells = cells_for_bucket(&resp, 1, indicator, &GridGeometry::sao_paulo());
        assert!(cells.is_empty());
    }

    #[test]
    fn test_empty_bucket_draws_nothing() {
        let resp = response(r#"{"heatmaps": {"1": []}}"#);
        let indicator = find_indicator("MP2.5").unwrap();
        let cells = cells_for_bucket(&resp, 1, indicator, &GridGeometry::sao_paulo());
        assert!(cells.is_empty());
    }

    #[test]
    fn test_cells_are_centered_and_colored() {
        let resp = response(r#"{"heatmaps": {"1": [{"lat": -23.5, "long": -46.6, "value": 30.0}]}}"#);
        let indicator = find_indicator("MP2.5").unwrap();
        let geometry = GridGeometry::sao_paulo();
        let cells = cells_for_bucket(&resp, 1, indicator, &geometry);
        assert_eq!(cells.len(), 1);
        let cell = &cells[0];
        assert!((cell.north - cell.south - geometry.lat_step()).abs() < 1e-12);
        assert!((cell.east - cell.west - geometry.long_step()).abs() < 1e-12);
        assert!(((cell.north + cell.south) / 2.0 - -23.5).abs() < 1e-12);
        assert!(((cell.east + cell.west) / 2.0 - -46.6).abs() < 1e-12);
        // 30.0 is above the 25 breakpoint, below 50
        assert_eq!(cell.color, "yellow");
    }

    #[test]
    fn test_legend_band_labels() {
        let mp25 = find_indicator("MP2.5").unwrap();
        let bands = legend_bands(mp25);
        assert_eq!(bands.len(), 5);
        assert_eq!(bands[0], ("green", "≤ 25 µg/m³".to_string()));
        assert_eq!(bands[1], ("yellow", "> 25 – 50 µg/m³".to_string()));
        assert_eq!(bands[4], ("purple", "> 125 µg/m³".to_string()));
    }

    #[test]
    fn test_legend_band_count_matches_colors() {
        for indicator in crate::catalog::INDICATORS {
            assert_eq!(legend_bands(indicator).len(), indicator.quality_colors.len());
        }
    }

    #[test]
    fn test_grid_cells_approximately_square() {
        let geometry = GridGeometry::sao_paulo();
        // 20 rows over a wider-than-tall box gives 14 columns
        assert_eq!(geometry.long_divisions(), 14);
        let ratio = geometry.lat_step() / geometry.long_step();
        assert!(ratio > 0.9 && ratio < 1.1, "cells far from square: {ratio}");
    }
}
