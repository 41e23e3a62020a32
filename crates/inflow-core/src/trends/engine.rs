//! Analysis orchestration
//!
//! `TrendsAnalyzer` is the single entry point: fetch records from the
//! store, partition by source, run the per-source and cross-source
//! analyzers, and assemble the composite result. Everything after the
//! fetch is pure computation over immutable request-scoped data, so
//! independent analyses can run concurrently without coordination.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{AnalysisRequest, Frequency, IncomeRecord, IncomeTrendsAnalysis};
use crate::store::RecordStore;

use super::pattern::detect_pattern;
use super::predictability::predictability_score;
use super::seasonality::analyze_seasonality;
use super::statistics::calculate_statistics;

/// Analyzer thresholds
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Maximum days the mean interval (and its stdev) may deviate from a
    /// candidate cadence. Must be positive.
    pub interval_tolerance_days: f64,
    /// Pattern confidence required before predicting the next payment date
    pub prediction_confidence_threshold: f64,
    /// Combined records required before seasonality is computed
    pub seasonality_min_records: usize,
    /// Peak/trough band width in standard deviations around the monthly mean
    pub seasonality_band_factor: f64,
    /// Weight of mean pattern confidence in the overall score
    pub pattern_weight: f64,
    /// Weight of mean source reliability in the overall score
    pub reliability_weight: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            interval_tolerance_days: 2.0,
            prediction_confidence_threshold: 0.7,
            seasonality_min_records: 12,
            seasonality_band_factor: 0.5,
            pattern_weight: 0.4,
            reliability_weight: 0.6,
        }
    }
}

/// The income trends analyzer
pub struct TrendsAnalyzer<'a> {
    store: &'a dyn RecordStore,
    config: AnalyzerConfig,
}

impl<'a> TrendsAnalyzer<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self {
            store,
            config: AnalyzerConfig::default(),
        }
    }

    pub fn with_config(store: &'a dyn RecordStore, config: AnalyzerConfig) -> Self {
        Self { store, config }
    }

    /// Run one analysis, stamping the result with the current time
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<IncomeTrendsAnalysis> {
        self.analyze_at(request, Utc::now()).await
    }

    /// Run one analysis with an explicit analysis timestamp
    ///
    /// With a pinned timestamp and an unchanged record set, the output is
    /// fully deterministic.
    pub async fn analyze_at(
        &self,
        request: &AnalysisRequest,
        analysis_date: DateTime<Utc>,
    ) -> Result<IncomeTrendsAnalysis> {
        if let (Some(start), Some(end)) = (request.start_date, request.end_date) {
            if end < start {
                return Err(Error::InvalidRequest(format!(
                    "end_date {} is before start_date {}",
                    end, start
                )));
            }
        }

        let records = self
            .store
            .fetch_records(
                request.start_date,
                request.end_date,
                request.source.as_deref(),
            )
            .await?;
        if records.is_empty() {
            return Err(Error::NoData);
        }
        debug!(records = records.len(), "Fetched income records");

        // BTreeMap keys the groups by source name, which also fixes the
        // output ordering of the pattern and statistics lists
        let mut groups: BTreeMap<String, Vec<IncomeRecord>> = BTreeMap::new();
        for record in &records {
            groups
                .entry(record.source.clone())
                .or_default()
                .push(record.clone());
        }

        let mut patterns = Vec::new();
        let mut source_statistics = Vec::new();
        for (source, group) in &mut groups {
            group.sort_by_key(|r| r.date);

            let Some(pattern) = detect_pattern(source, group, &self.config) else {
                continue;
            };
            let Some(stats) = calculate_statistics(source, group) else {
                continue;
            };
            source_statistics.push(stats);

            // An irregular classification is informative in itself, so it
            // bypasses the confidence filter
            if pattern.frequency == Frequency::Irregular
                || pattern.confidence_score >= request.min_confidence
            {
                patterns.push(pattern);
            } else {
                debug!(
                    source,
                    confidence = pattern.confidence_score,
                    min_confidence = request.min_confidence,
                    "Pattern filtered below confidence threshold"
                );
            }
        }

        // Seasonality looks at the whole fetched set, not per-source groups
        let seasonality = analyze_seasonality(&records, &self.config);
        let overall_predictability_score =
            predictability_score(&patterns, &source_statistics, &self.config);

        // Bounds come from the records actually fetched, not the request
        let (Some(data_start_date), Some(data_end_date)) = (
            records.iter().map(|r| r.date).min(),
            records.iter().map(|r| r.date).max(),
        ) else {
            return Err(Error::NoData);
        };

        info!(
            sources = groups.len(),
            patterns = patterns.len(),
            seasonality = seasonality.is_some(),
            predictability = overall_predictability_score,
            "Income trends analysis complete"
        );

        Ok(IncomeTrendsAnalysis {
            patterns,
            seasonality,
            source_statistics,
            analysis_date,
            data_start_date,
            data_end_date,
            overall_predictability_score,
        })
    }
}
