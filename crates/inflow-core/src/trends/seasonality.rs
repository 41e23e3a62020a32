//! Calendar seasonality across all income sources

use std::collections::BTreeMap;

use chrono::Datelike;
use tracing::debug;

use crate::models::{IncomeRecord, SeasonalPeriod, SeasonalityMetrics};

use super::engine::AnalyzerConfig;
use super::{mean, sample_stdev};

/// Detect monthly peak and trough behavior over the combined record set
///
/// Returns None when there is too little data to judge; absence is
/// meaningful and distinct from "no peaks found". Grouping ignores the
/// year, so multi-year histories reinforce the same calendar months.
pub(crate) fn analyze_seasonality(
    records: &[IncomeRecord],
    config: &AnalyzerConfig,
) -> Option<SeasonalityMetrics> {
    if records.len() < config.seasonality_min_records {
        debug!(
            records = records.len(),
            required = config.seasonality_min_records,
            "Skipping seasonality: not enough combined records"
        );
        return None;
    }

    let mut by_month: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for record in records {
        by_month.entry(record.date.month()).or_default().push(record.amount);
    }

    let monthly_averages: Vec<(u32, f64)> = by_month
        .iter()
        .map(|(month, amounts)| (*month, mean(amounts)))
        .collect();

    let averages: Vec<f64> = monthly_averages.iter().map(|(_, avg)| *avg).collect();
    let overall_avg = mean(&averages);
    let overall_std = sample_stdev(&averages);

    let upper_band = overall_avg + config.seasonality_band_factor * overall_std;
    let lower_band = overall_avg - config.seasonality_band_factor * overall_std;

    let peak_months: Vec<u32> = monthly_averages
        .iter()
        .filter(|(_, avg)| *avg > upper_band)
        .map(|(month, _)| *month)
        .collect();
    let trough_months: Vec<u32> = monthly_averages
        .iter()
        .filter(|(_, avg)| *avg < lower_band)
        .map(|(month, _)| *month)
        .collect();

    let variance_coefficient = if overall_avg <= 0.0 {
        f64::INFINITY
    } else {
        overall_std / overall_avg
    };
    let confidence_score = 1.0 / (1.0 + variance_coefficient);

    SeasonalityMetrics::new(
        SeasonalPeriod::Monthly,
        peak_months,
        trough_months,
        variance_coefficient,
        confidence_score,
    )
    .ok()
}
