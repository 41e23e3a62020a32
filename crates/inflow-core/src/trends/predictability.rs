//! Aggregate predictability scoring

use crate::models::{IncomePattern, SourceStatistics};

use super::engine::AnalyzerConfig;
use super::mean;

/// Blend pattern confidence and source reliability into one scalar
///
/// Takes the patterns that survived the confidence filter and the
/// unfiltered statistics list. Either list being empty means there is
/// nothing to predict from, which scores 0.
pub(crate) fn predictability_score(
    patterns: &[IncomePattern],
    statistics: &[SourceStatistics],
    config: &AnalyzerConfig,
) -> f64 {
    if patterns.is_empty() || statistics.is_empty() {
        return 0.0;
    }

    let confidences: Vec<f64> = patterns.iter().map(|p| p.confidence_score).collect();
    let reliabilities: Vec<f64> = statistics.iter().map(|s| s.reliability_score).collect();

    config.pattern_weight * mean(&confidences) + config.reliability_weight * mean(&reliabilities)
}
