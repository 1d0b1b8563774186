//! Heatmap query construction.
//!
//! The backend addresses time in five granularities, each with its own
//! payload field. Rather than a shared mutable field bag, the submitted
//! selection is a tagged union (`TimeSelection`) keyed by the granularity,
//! and a dedicated builder assembles each variant from the raw form fields.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::find_method;
use crate::QueryError;

/// Time granularity of a heatmap query, as chosen on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInterval {
    Instant,
    Hourly,
    Daily,
    Monthly,
    Yearly,
}

impl TimeInterval {
    pub const ALL: [TimeInterval; 5] = [
        TimeInterval::Instant,
        TimeInterval::Hourly,
        TimeInterval::Daily,
        TimeInterval::Monthly,
        TimeInterval::Yearly,
    ];

    /// Canonical label shown on the form (the UI is Portuguese).
    pub fn label(&self) -> &'static str {
        match self {
            TimeInterval::Instant => "Instantânea",
            TimeInterval::Hourly => "Horária",
            TimeInterval::Daily => "Diária",
            TimeInterval::Monthly => "Mensal",
            TimeInterval::Yearly => "Anual",
        }
    }

    /// Resolve a form label back to its granularity. Fixed lookup, case-insensitive.
    pub fn from_label(label: &str) -> Option<TimeInterval> {
        match label.to_lowercase().as_str() {
            "instantânea" => Some(TimeInterval::Instant),
            "horária" => Some(TimeInterval::Hourly),
            "diária" => Some(TimeInterval::Daily),
            "mensal" => Some(TimeInterval::Monthly),
            "anual" => Some(TimeInterval::Yearly),
            _ => None,
        }
    }

    /// The raw date fields this granularity requires on the form. Switching
    /// granularity replaces the field set wholesale; nothing lingers.
    pub fn required_fields(&self) -> &'static [DateField] {
        match self {
            TimeInterval::Instant => {
                &[DateField::Year, DateField::Month, DateField::Day, DateField::Hour]
            }
            TimeInterval::Hourly => &[DateField::Year, DateField::Month, DateField::Day],
            TimeInterval::Daily => &[DateField::Year, DateField::Month],
            TimeInterval::Monthly => &[DateField::Year],
            TimeInterval::Yearly => &[DateField::FirstYear, DateField::LastYear],
        }
    }
}

/// One raw date input collected by the heatmap form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DateField {
    Year,
    Month,
    Day,
    Hour,
    FirstYear,
    LastYear,
}

impl DateField {
    pub fn label(&self) -> &'static str {
        match self {
            DateField::Year => "Ano",
            DateField::Month => "Mês",
            DateField::Day => "Dia",
            DateField::Hour => "Hora",
            DateField::FirstYear => "Primeiro ano",
            DateField::LastYear => "Último ano",
        }
    }
}

/// Interval-specific part of the payload. Serialized with the granularity as
/// the `interval` tag and exactly the fields the backend reads for it:
/// a collapsed timestamp/date string for instant/hourly/daily, plain year
/// integers for monthly/yearly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "interval", rename_all = "lowercase")]
pub enum TimeSelection {
    /// `{"interval":"instant","hour":"YYYY-MM-DD HH:00:00"}`
    Instant { hour: String },
    /// `{"interval":"hourly","day":"YYYY-MM-DD"}`
    Hourly { day: String },
    /// `{"interval":"daily","month":"YYYY-MM"}`
    Daily { month: String },
    /// `{"interval":"monthly","year":N}`
    Monthly { year: i32 },
    /// `{"interval":"yearly","first_year":N,"last_year":M}`
    Yearly { first_year: i32, last_year: i32 },
}

/// Chosen interpolation method plus its parameter values, as the backend
/// expects them: `{"method": "...", "params": {"name": "value"}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolatorSelection {
    pub method: String,
    pub params: BTreeMap<String, String>,
}

/// Backend-ready heatmap query payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapQuery {
    pub indicator: String,
    pub interpolator: InterpolatorSelection,
    #[serde(flatten)]
    pub time: TimeSelection,
}

/// Assembles a `HeatmapQuery` from raw form input.
///
/// The builder mirrors the form exactly: selecting a granularity replaces
/// the date field set, selecting a method replaces the parameter set with
/// the method's declared defaults. `build` validates everything and either
/// returns the payload or the first user-presentable error.
#[derive(Debug, Clone, Default)]
pub struct HeatmapQueryBuilder {
    indicator: String,
    method: String,
    params: BTreeMap<String, String>,
    interval: Option<TimeInterval>,
    fields: BTreeMap<DateField, String>,
}

impl HeatmapQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indicator(&mut self, name: &str) {
        self.indicator = name.to_string();
    }

    /// Select an interpolation method: drops all previous parameter fields
    /// and seeds one field per declared parameter with its kind's default.
    pub fn method(&mut self, name: &str) {
        self.method = name.to_string();
        self.params.clear();
        if let Some(method) = find_method(name) {
            for param in method.params {
                self.params
                    .insert(param.name.to_string(), param.default_value().to_string());
            }
        }
    }

    pub fn set_param(&mut self, name: &str, value: &str) {
        self.params.insert(name.to_string(), value.to_string());
    }

    /// Select a time granularity: drops every interval-specific field and
    /// seeds empty values for exactly the new granularity's field set.
    pub fn interval(&mut self, interval: TimeInterval) {
        self.interval = Some(interval);
        self.fields.clear();
        for field in interval.required_fields() {
            self.fields.insert(*field, String::new());
        }
    }

    pub fn set_field(&mut self, field: DateField, value: &str) {
        self.fields.insert(field, value.to_string());
    }

    /// Currently present date fields, in form order.
    pub fn date_fields(&self) -> &'static [DateField] {
        self.interval.as_ref().map(TimeInterval::required_fields).unwrap_or(&[])
    }

    pub fn indicator_name(&self) -> &str {
        &self.indicator
    }

    pub fn method_name(&self) -> &str {
        &self.method
    }

    pub fn selected_interval(&self) -> Option<TimeInterval> {
        self.interval
    }

    pub fn field_value(&self, field: DateField) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn param_value(&self, name: &str) -> &str {
        self.params.get(name).map(String::as_str).unwrap_or("")
    }

    /// Currently present parameter fields with their values.
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    fn numeric_field(&self, field: DateField) -> Result<i32, QueryError> {
        let raw = self
            .fields
            .get(&field)
            .map(String::as_str)
            .unwrap_or("")
            .trim();
        if raw.is_empty() {
            return Err(QueryError::MissingField(field.label()));
        }
        raw.parse::<i32>()
            .map_err(|_| QueryError::InvalidNumber(field.label()))
    }

    /// Validates a (year, month, day) combination against the real calendar.
    fn checked_date(&self) -> Result<(i32, u32, u32), QueryError> {
        let year = self.numeric_field(DateField::Year)?;
        let month = self.numeric_field(DateField::Month)? as u32;
        let day = self.numeric_field(DateField::Day)? as u32;
        NaiveDate::from_ymd_opt(year, month, day).ok_or(QueryError::InvalidDate)?;
        Ok((year, month, day))
    }

    pub fn build(&self) -> Result<HeatmapQuery, QueryError> {
        if self.indicator.trim().is_empty() {
            return Err(QueryError::MissingIndicator);
        }
        if self.method.trim().is_empty() {
            return Err(QueryError::MissingMethod);
        }
        let method =
            find_method(&self.method).ok_or_else(|| QueryError::UnknownMethod(self.method.clone()))?;
        for param in method.params {
            let value = self.params.get(param.name).map(String::as_str).unwrap_or("");
            if value.trim().is_empty() {
                return Err(QueryError::MissingParam(param.name.to_string()));
            }
        }

        let interval = self.interval.ok_or(QueryError::MissingInterval)?;
        let time = match interval {
            TimeInterval::Instant => {
                let (year, month, day) = self.checked_date()?;
                let hour = self.numeric_field(DateField::Hour)?;
                if !(0..=23).contains(&hour) {
                    return Err(QueryError::InvalidNumber(DateField::Hour.label()));
                }
                TimeSelection::Instant {
                    hour: format!("{year:04}-{month:02}-{day:02} {hour:02}:00:00"),
                }
            }
            TimeInterval::Hourly => {
                let (year, month, day) = self.checked_date()?;
                TimeSelection::Hourly {
                    day: format!("{year:04}-{month:02}-{day:02}"),
                }
            }
            TimeInterval::Daily => {
                let year = self.numeric_field(DateField::Year)?;
                let month = self.numeric_field(DateField::Month)?;
                if !(1..=12).contains(&month) {
                    return Err(QueryError::InvalidNumber(DateField::Month.label()));
                }
                TimeSelection::Daily {
                    month: format!("{year:04}-{month:02}"),
                }
            }
            TimeInterval::Monthly => TimeSelection::Monthly {
                year: self.numeric_field(DateField::Year)?,
            },
            TimeInterval::Yearly => TimeSelection::Yearly {
                first_year: self.numeric_field(DateField::FirstYear)?,
                last_year: self.numeric_field(DateField::LastYear)?,
            },
        };

        Ok(HeatmapQuery {
            indicator: self.indicator.clone(),
            interpolator: InterpolatorSelection {
                method: self.method.clone(),
                params: self.params.clone(),
            },
            time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder_with_method() -> HeatmapQueryBuilder {
        let mut b = HeatmapQueryBuilder::new();
        b.indicator("MP2.5");
        b.method("KNN");
        b.set_param("k", "5");
        b
    }

    #[test]
    fn test_interval_change_replaces_field_set() {
        let mut b = builder_with_method();
        b.interval(TimeInterval::Instant);
        assert_eq!(
            b.date_fields(),
            &[DateField::Year, DateField::Month, DateField::Day, DateField::Hour]
        );
        b.interval(TimeInterval::Yearly);
        assert_eq!(b.date_fields(), &[DateField::FirstYear, DateField::LastYear]);
        // no residue from the previous interval
        assert!(!b.fields.contains_key(&DateField::Hour));
    }

    #[test]
    fn test_every_interval_has_exactly_its_field_set() {
        let expected: [(TimeInterval, &[DateField]); 5] = [
            (TimeInterval::Yearly, &[DateField::FirstYear, DateField::LastYear]),
            (TimeInterval::Monthly, &[DateField::Year]),
            (TimeInterval::Daily, &[DateField::Year, DateField::Month]),
            (TimeInterval::Hourly, &[DateField::Year, DateField::Month, DateField::Day]),
            (
                TimeInterval::Instant,
                &[DateField::Year, DateField::Month, DateField::Day, DateField::Hour],
            ),
        ];
        let mut b = builder_with_method();
        for (interval, fields) in expected {
            b.interval(interval);
            assert_eq!(b.date_fields(), fields);
            assert_eq!(b.fields.len(), fields.len());
        }
    }

    #[test]
    fn test_method_change_replaces_params_with_defaults() {
        let mut b = HeatmapQueryBuilder::new();
        b.method("KNN");
        assert_eq!(b.params().get("k").map(String::as_str), Some(""));
        b.method("Kriging");
        assert!(!b.params().contains_key("k"));
        assert_eq!(b.params().len(), 4);
        assert_eq!(b.params().get("weight").map(String::as_str), Some("false"));
    }

    #[test]
    fn test_instant_collapses_to_single_timestamp() {
        let mut b = builder_with_method();
        b.interval(TimeInterval::Instant);
        b.set_field(DateField::Year, "2024");
        b.set_field(DateField::Month, "3");
        b.set_field(DateField::Day, "5");
        b.set_field(DateField::Hour, "14");
        let query = b.build().unwrap();
        assert_eq!(
            query.time,
            TimeSelection::Instant {
                hour: "2024-03-05 14:00:00".to_string()
            }
        );

        // the wire payload has the collapsed string and no residual sub-fields
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["interval"], "instant");
        assert_eq!(json["hour"], "2024-03-05 14:00:00");
        assert!(json.get("year").is_none());
        assert!(json.get("month").is_none());
        assert!(json.get("day").is_none());
    }

    #[test]
    fn test_hourly_and_daily_date_strings() {
        let mut b = builder_with_method();
        b.interval(TimeInterval::Hourly);
        b.set_field(DateField::Year, "2023");
        b.set_field(DateField::Month, "11");
        b.set_field(DateField::Day, "7");
        assert_eq!(
            b.build().unwrap().time,
            TimeSelection::Hourly { day: "2023-11-07".to_string() }
        );

        b.interval(TimeInterval::Daily);
        b.set_field(DateField::Year, "2023");
        b.set_field(DateField::Month, "4");
        assert_eq!(
            b.build().unwrap().time,
            TimeSelection::Daily { month: "2023-04".to_string() }
        );
    }

    #[test]
    fn test_yearly_payload_fields() {
        let mut b = builder_with_method();
        b.interval(TimeInterval::Yearly);
        b.set_field(DateField::FirstYear, "2019");
        b.set_field(DateField::LastYear, "2023");
        let json = serde_json::to_value(b.build().unwrap()).unwrap();
        assert_eq!(json["interval"], "yearly");
        assert_eq!(json["first_year"], 2019);
        assert_eq!(json["last_year"], 2023);
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let mut b = HeatmapQueryBuilder::new();
        assert_eq!(b.build(), Err(QueryError::MissingIndicator));
        b.indicator("MP10");
        assert_eq!(b.build(), Err(QueryError::MissingMethod));
        b.method("KNN");
        assert_eq!(b.build(), Err(QueryError::MissingParam("k".to_string())));
        b.set_param("k", "3");
        assert_eq!(b.build(), Err(QueryError::MissingInterval));
        b.interval(TimeInterval::Monthly);
        assert_eq!(b.build(), Err(QueryError::MissingField("Ano")));
    }

    #[test]
    fn test_impossible_date_is_rejected() {
        let mut b = builder_with_method();
        b.interval(TimeInterval::Hourly);
        b.set_field(DateField::Year, "2023");
        b.set_field(DateField::Month, "2");
        b.set_field(DateField::Day, "30");
        assert_eq!(b.build(), Err(QueryError::InvalidDate));
    }

    #[test]
    fn test_label_round_trip() {
        for interval in TimeInterval::ALL {
            assert_eq!(TimeInterval::from_label(interval.label()), Some(interval));
        }
        assert_eq!(TimeInterval::from_label("quinzenal"), None);
    }
}
