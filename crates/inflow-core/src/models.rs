//! Domain models for Inflow
//!
//! Every type here is a request-scoped value object: built during one
//! `analyze` call, read-only afterwards, never persisted by this crate.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default minimum confidence for including a detected pattern in results
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.5;

/// A single dated income record
///
/// Owned by the record store; the engine only reads these. The store is
/// responsible for handing over validated records, and `new` is the
/// check it uses at the ingestion boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRecord {
    /// Payer identifier (employer, client, platform)
    pub source: String,
    pub date: NaiveDate,
    /// Always strictly positive
    pub amount: f64,
}

impl IncomeRecord {
    pub fn new(source: impl Into<String>, date: NaiveDate, amount: f64) -> Result<Self> {
        let source = source.into();
        if source.trim().is_empty() {
            return Err(Error::InvalidData("income record has empty source".into()));
        }
        if !(amount > 0.0) {
            return Err(Error::InvalidData(format!(
                "income amount must be positive, got {}",
                amount
            )));
        }
        Ok(Self {
            source,
            date,
            amount,
        })
    }
}

/// Payment cadence detected for one income source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    /// No recognizable cadence. Still informative: it says "no pattern".
    Irregular,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Irregular => "irregular",
        }
    }

    /// Expected days between payments, None for irregular
    pub fn expected_interval_days(&self) -> Option<f64> {
        match self {
            Self::Weekly => Some(7.0),
            Self::Biweekly => Some(14.0),
            Self::Monthly => Some(30.0),
            Self::Irregular => None,
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            "irregular" => Ok(Self::Irregular),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregation period for seasonality metrics
///
/// Only `Monthly` is produced today; the other variants exist for data
/// compatibility with downstream consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonalPeriod {
    Monthly,
    Quarterly,
    Annual,
}

impl SeasonalPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
        }
    }
}

impl std::str::FromStr for SeasonalPeriod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "annual" => Ok(Self::Annual),
            _ => Err(format!("Unknown seasonal period: {}", s)),
        }
    }
}

impl std::fmt::Display for SeasonalPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Detected payment pattern for one income source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomePattern {
    pub source: String,
    pub frequency: Frequency,
    pub average_amount: f64,
    /// In [0, 1]; 0 for irregular sources
    pub confidence_score: f64,
    pub last_occurrence: NaiveDate,
    /// Set only when confidence clears the prediction threshold
    pub next_predicted: Option<NaiveDate>,
}

/// Descriptive statistics for one income source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceStatistics {
    pub source: String,
    pub total_occurrences: u32,
    pub total_amount: f64,
    pub average_amount: f64,
    pub min_amount: f64,
    pub max_amount: f64,
    /// Sample standard deviation of amounts, 0 under two records
    pub standard_deviation: f64,
    /// In [0, 1]; blends amount and interval consistency
    pub reliability_score: f64,
}

impl SourceStatistics {
    /// Build statistics, checking the structural invariants
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: impl Into<String>,
        total_occurrences: u32,
        total_amount: f64,
        average_amount: f64,
        min_amount: f64,
        max_amount: f64,
        standard_deviation: f64,
        reliability_score: f64,
    ) -> Result<Self> {
        if total_occurrences == 0 {
            return Err(Error::InvalidData(
                "source statistics require at least one record".into(),
            ));
        }
        if max_amount < min_amount {
            return Err(Error::InvalidData(format!(
                "max_amount {} is below min_amount {}",
                max_amount, min_amount
            )));
        }
        if standard_deviation < 0.0 {
            return Err(Error::InvalidData(format!(
                "standard deviation must be non-negative, got {}",
                standard_deviation
            )));
        }
        Ok(Self {
            source: source.into(),
            total_occurrences,
            total_amount,
            average_amount,
            min_amount,
            max_amount,
            standard_deviation,
            reliability_score,
        })
    }
}

/// Calendar seasonality across all sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityMetrics {
    pub period: SeasonalPeriod,
    /// Months (1-12) whose average income sits above the upper band, ascending
    pub peak_months: Vec<u32>,
    /// Months (1-12) whose average income sits below the lower band, ascending
    pub trough_months: Vec<u32>,
    pub variance_coefficient: f64,
    pub confidence_score: f64,
}

impl SeasonalityMetrics {
    /// Build metrics, checking that month lists are valid calendar months
    /// without duplicates. The lists are sorted ascending.
    pub fn new(
        period: SeasonalPeriod,
        mut peak_months: Vec<u32>,
        mut trough_months: Vec<u32>,
        variance_coefficient: f64,
        confidence_score: f64,
    ) -> Result<Self> {
        validate_months("peak_months", &mut peak_months)?;
        validate_months("trough_months", &mut trough_months)?;
        Ok(Self {
            period,
            peak_months,
            trough_months,
            variance_coefficient,
            confidence_score,
        })
    }
}

fn validate_months(field: &str, months: &mut Vec<u32>) -> Result<()> {
    months.sort_unstable();
    for pair in months.windows(2) {
        if pair[0] == pair[1] {
            return Err(Error::InvalidData(format!(
                "{} contains duplicate month {}",
                field, pair[0]
            )));
        }
    }
    if let Some(bad) = months.iter().find(|m| !(1..=12).contains(*m)) {
        return Err(Error::InvalidData(format!(
            "{} contains invalid month {}",
            field, bad
        )));
    }
    Ok(())
}

/// Parameters for one analysis run
///
/// Builder-style setters keep call sites readable when only a couple of
/// filters are set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Restrict the analysis to a single source
    pub source: Option<String>,
    /// Patterns below this confidence are filtered out (irregular exempt)
    pub min_confidence: f64,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            source: None,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl AnalysisRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_date(mut self, date: Option<NaiveDate>) -> Self {
        self.start_date = date;
        self
    }

    pub fn end_date(mut self, date: Option<NaiveDate>) -> Self {
        self.end_date = date;
        self
    }

    pub fn source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }

    pub fn min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }
}

/// The composite result of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeTrendsAnalysis {
    /// Patterns that survived the confidence filter, ordered by source
    pub patterns: Vec<IncomePattern>,
    /// None when the combined record count is too small to judge
    pub seasonality: Option<SeasonalityMetrics>,
    /// Statistics for every analyzed source, ordered by source
    pub source_statistics: Vec<SourceStatistics>,
    pub analysis_date: DateTime<Utc>,
    /// Earliest record date actually fetched (not the requested bound)
    pub data_start_date: NaiveDate,
    /// Latest record date actually fetched (not the requested bound)
    pub data_end_date: NaiveDate,
    pub overall_predictability_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_frequency_round_trip() {
        for freq in [
            Frequency::Weekly,
            Frequency::Biweekly,
            Frequency::Monthly,
            Frequency::Irregular,
        ] {
            assert_eq!(Frequency::from_str(freq.as_str()).unwrap(), freq);
        }
        assert!(Frequency::from_str("fortnightly").is_err());
    }

    #[test]
    fn test_frequency_expected_intervals() {
        assert_eq!(Frequency::Weekly.expected_interval_days(), Some(7.0));
        assert_eq!(Frequency::Biweekly.expected_interval_days(), Some(14.0));
        assert_eq!(Frequency::Monthly.expected_interval_days(), Some(30.0));
        assert_eq!(Frequency::Irregular.expected_interval_days(), None);
    }

    #[test]
    fn test_income_record_rejects_bad_input() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(IncomeRecord::new("Acme", date, 1200.0).is_ok());
        assert!(IncomeRecord::new("Acme", date, 0.0).is_err());
        assert!(IncomeRecord::new("Acme", date, -5.0).is_err());
        assert!(IncomeRecord::new("  ", date, 100.0).is_err());
    }

    #[test]
    fn test_source_statistics_invariants() {
        let ok = SourceStatistics::new("Acme", 3, 300.0, 100.0, 90.0, 110.0, 10.0, 0.8);
        assert!(ok.is_ok());

        let swapped = SourceStatistics::new("Acme", 3, 300.0, 100.0, 110.0, 90.0, 10.0, 0.8);
        assert!(swapped.is_err());

        let empty = SourceStatistics::new("Acme", 0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert!(empty.is_err());
    }

    #[test]
    fn test_seasonality_metrics_month_validation() {
        let ok = SeasonalityMetrics::new(SeasonalPeriod::Monthly, vec![12, 6], vec![1], 0.2, 0.8);
        // Months come back sorted
        assert_eq!(ok.unwrap().peak_months, vec![6, 12]);

        let dup = SeasonalityMetrics::new(SeasonalPeriod::Monthly, vec![3, 3], vec![], 0.2, 0.8);
        assert!(dup.is_err());

        let range = SeasonalityMetrics::new(SeasonalPeriod::Monthly, vec![13], vec![], 0.2, 0.8);
        assert!(range.is_err());
    }

    #[test]
    fn test_request_builder_defaults() {
        let request = AnalysisRequest::new();
        assert!(request.start_date.is_none());
        assert!(request.end_date.is_none());
        assert!(request.source.is_none());
        assert_eq!(request.min_confidence, DEFAULT_MIN_CONFIDENCE);

        let request = AnalysisRequest::new()
            .source(Some("Acme".to_string()))
            .min_confidence(0.9);
        assert_eq!(request.source.as_deref(), Some("Acme"));
        assert_eq!(request.min_confidence, 0.9);
    }
}
