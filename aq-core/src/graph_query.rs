//! Line-graph query construction.
//!
//! The graph form collects a set of indicator checkboxes and a time period.
//! Periods that aggregate within a year (monthly, hourly) take a bare month
//! selector; the period that aggregates within a month (daily) takes a full
//! year + month pair; yearly takes neither. The payload carries explicit
//! nulls for the fields the resolved period does not use, matching the
//! backend contract.

use serde::{Deserialize, Serialize};

use crate::QueryError;

/// Aggregation period of a line-graph query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphInterval {
    Yearly,
    Monthly,
    Daily,
    Hourly,
}

impl GraphInterval {
    pub const ALL: [GraphInterval; 4] = [
        GraphInterval::Yearly,
        GraphInterval::Monthly,
        GraphInterval::Daily,
        GraphInterval::Hourly,
    ];

    /// Form label (Portuguese) for this period.
    pub fn label(&self) -> &'static str {
        match self {
            GraphInterval::Yearly => "Anual",
            GraphInterval::Monthly => "Mensal",
            GraphInterval::Daily => "Diária",
            GraphInterval::Hourly => "Horária",
        }
    }

    /// Translate a form label to the canonical backend enum value.
    /// Fixed lookup; `mensaltotal` is a legacy alias for the monthly period.
    pub fn from_label(label: &str) -> Option<GraphInterval> {
        match label.to_lowercase().as_str() {
            "anual" => Some(GraphInterval::Yearly),
            "mensal" | "mensaltotal" => Some(GraphInterval::Monthly),
            "diária" => Some(GraphInterval::Daily),
            "horária" => Some(GraphInterval::Hourly),
            _ => None,
        }
    }

    /// Periods aggregating within a year need a bare month selector.
    pub fn needs_month(&self) -> bool {
        matches!(self, GraphInterval::Monthly | GraphInterval::Hourly)
    }

    /// The daily period aggregates within a month and needs year + month.
    pub fn needs_year_and_month(&self) -> bool {
        matches!(self, GraphInterval::Daily)
    }
}

/// Backend-ready line-graph query payload. Fields the period does not use
/// are serialized as explicit `null`s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQuery {
    pub interval: GraphInterval,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub indicators: Vec<String>,
}

/// Assembles a `GraphQuery` from the graph form.
///
/// Indicator checkboxes toggle membership in the selection; changing the
/// period clears the month/year fields so nothing from a previous period
/// leaks into the payload.
#[derive(Debug, Clone, Default)]
pub struct GraphQueryBuilder {
    indicators: Vec<String>,
    interval: Option<GraphInterval>,
    month: String,
    year: String,
}

impl GraphQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or remove an indicator as its checkbox toggles.
    pub fn toggle_indicator(&mut self, name: &str, checked: bool) {
        if checked {
            if !self.indicators.iter().any(|i| i == name) {
                self.indicators.push(name.to_string());
            }
        } else {
            self.indicators.retain(|i| i != name);
        }
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.indicators.iter().any(|i| i == name)
    }

    /// Change the aggregation period, clearing the date fields.
    pub fn interval(&mut self, interval: GraphInterval) {
        self.interval = Some(interval);
        self.month.clear();
        self.year.clear();
    }

    pub fn set_month(&mut self, value: &str) {
        self.month = value.to_string();
    }

    pub fn set_year(&mut self, value: &str) {
        self.year = value.to_string();
    }

    pub fn selected_interval(&self) -> Option<GraphInterval> {
        self.interval
    }

    pub fn month_value(&self) -> &str {
        &self.month
    }

    pub fn year_value(&self) -> &str {
        &self.year
    }

    fn parse_month(&self) -> Result<u32, QueryError> {
        let raw = self.month.trim();
        if raw.is_empty() {
            return Err(QueryError::MissingField("Mês"));
        }
        let month = raw
            .parse::<u32>()
            .map_err(|_| QueryError::InvalidNumber("Mês"))?;
        if !(1..=12).contains(&month) {
            return Err(QueryError::InvalidNumber("Mês"));
        }
        Ok(month)
    }

    fn parse_year(&self) -> Result<i32, QueryError> {
        let raw = self.year.trim();
        if raw.is_empty() {
            return Err(QueryError::MissingField("Ano"));
        }
        raw.parse::<i32>().map_err(|_| QueryError::InvalidNumber("Ano"))
    }

    pub fn build(&self) -> Result<GraphQuery, QueryError> {
        if self.indicators.is_empty() {
            return Err(QueryError::NoIndicators);
        }
        let interval = self.interval.ok_or(QueryError::MissingInterval)?;

        let (year, month) = if interval.needs_year_and_month() {
            (Some(self.parse_year()?), Some(self.parse_month()?))
        } else if interval.needs_month() {
            (None, Some(self.parse_month()?))
        } else {
            (None, None)
        };

        Ok(GraphQuery {
            interval,
            year,
            month,
            indicators: self.indicators.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkbox_toggling() {
        let mut b = GraphQueryBuilder::new();
        b.toggle_indicator("MP10", true);
        b.toggle_indicator("O3", true);
        b.toggle_indicator("MP10", true); // no duplicate
        assert!(b.is_selected("MP10"));
        b.toggle_indicator("MP10", false);
        assert!(!b.is_selected("MP10"));
        b.interval(GraphInterval::Yearly);
        let query = b.build().unwrap();
        assert_eq!(query.indicators, vec!["O3".to_string()]);
    }

    #[test]
    fn test_no_indicators_rejected() {
        let mut b = GraphQueryBuilder::new();
        b.interval(GraphInterval::Yearly);
        assert_eq!(b.build(), Err(QueryError::NoIndicators));
    }

    #[test]
    fn test_yearly_nulls_date_fields() {
        let mut b = GraphQueryBuilder::new();
        b.toggle_indicator("NO2", true);
        b.interval(GraphInterval::Yearly);
        let json = serde_json::to_value(b.build().unwrap()).unwrap();
        assert_eq!(json["interval"], "yearly");
        assert!(json["year"].is_null());
        assert!(json["month"].is_null());
    }

    #[test]
    fn test_monthly_and_hourly_take_bare_month() {
        for interval in [GraphInterval::Monthly, GraphInterval::Hourly] {
            let mut b = GraphQueryBuilder::new();
            b.toggle_indicator("SO2", true);
            b.interval(interval);
            assert_eq!(b.build(), Err(QueryError::MissingField("Mês")));
            b.set_month("6");
            let query = b.build().unwrap();
            assert_eq!(query.month, Some(6));
            assert_eq!(query.year, None);
        }
    }

    #[test]
    fn test_daily_takes_year_and_month() {
        let mut b = GraphQueryBuilder::new();
        b.toggle_indicator("CO", true);
        b.interval(GraphInterval::Daily);
        b.set_month("2");
        assert_eq!(b.build(), Err(QueryError::MissingField("Ano")));
        b.set_year("2022");
        let query = b.build().unwrap();
        assert_eq!(query.year, Some(2022));
        assert_eq!(query.month, Some(2));
    }

    #[test]
    fn test_interval_change_clears_stale_fields() {
        let mut b = GraphQueryBuilder::new();
        b.toggle_indicator("CO", true);
        b.interval(GraphInterval::Daily);
        b.set_year("2022");
        b.set_month("2");
        b.interval(GraphInterval::Monthly);
        // the daily year/month pair must not leak into the monthly payload
        assert_eq!(b.build(), Err(QueryError::MissingField("Mês")));
    }

    #[test]
    fn test_month_range_validation() {
        let mut b = GraphQueryBuilder::new();
        b.toggle_indicator("CO", true);
        b.interval(GraphInterval::Monthly);
        b.set_month("13");
        assert_eq!(b.build(), Err(QueryError::InvalidNumber("Mês")));
    }

    #[test]
    fn test_label_translation_table() {
        assert_eq!(GraphInterval::from_label("Anual"), Some(GraphInterval::Yearly));
        assert_eq!(GraphInterval::from_label("mensal"), Some(GraphInterval::Monthly));
        assert_eq!(GraphInterval::from_label("MensalTotal"), Some(GraphInterval::Monthly));
        assert_eq!(GraphInterval::from_label("Diária"), Some(GraphInterval::Daily));
        assert_eq!(GraphInterval::from_label("Horária"), Some(GraphInterval::Hourly));
        assert_eq!(GraphInterval::from_label("semanal"), None);
    }
}
