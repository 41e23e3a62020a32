//! Payment cadence detection for a single income source

use chrono::Duration;
use tracing::debug;

use crate::models::{Frequency, IncomePattern, IncomeRecord};

use super::engine::AnalyzerConfig;
use super::{mean, sample_stdev};

/// Candidate cadences, evaluated in this order. On a confidence tie the
/// earlier bucket wins.
const CANDIDATES: [Frequency; 3] = [Frequency::Weekly, Frequency::Biweekly, Frequency::Monthly];

/// Classify one source's records into a cadence with a confidence score
///
/// Expects the slice sorted ascending by date. Returns None only for an
/// empty slice; a single record classifies as irregular with zero
/// confidence.
pub(crate) fn detect_pattern(
    source: &str,
    records: &[IncomeRecord],
    config: &AnalyzerConfig,
) -> Option<IncomePattern> {
    let amounts: Vec<f64> = records.iter().map(|r| r.amount).collect();
    let average_amount = mean(&amounts);
    let last_occurrence = records.last()?.date;

    if records.len() < 2 {
        return Some(IncomePattern {
            source: source.to_string(),
            frequency: Frequency::Irregular,
            average_amount,
            confidence_score: 0.0,
            last_occurrence,
            next_predicted: None,
        });
    }

    let gaps: Vec<f64> = records
        .windows(2)
        .map(|w| (w[1].date - w[0].date).num_days() as f64)
        .collect();
    let avg_interval = mean(&gaps);
    // A single gap gives no variance estimate. The infinity sentinel
    // keeps every candidate from qualifying, so the source falls
    // through to irregular.
    let interval_std = if gaps.len() >= 2 {
        sample_stdev(&gaps)
    } else {
        f64::INFINITY
    };

    let tolerance = config.interval_tolerance_days;
    let mut best: Option<(Frequency, f64)> = None;

    for candidate in CANDIDATES {
        let Some(expected) = candidate.expected_interval_days() else {
            continue;
        };
        let deviation = (avg_interval - expected).abs();
        if deviation > tolerance || interval_std > tolerance {
            continue;
        }

        let penalty = (deviation + interval_std) / (2.0 * tolerance);
        let confidence = (1.0 - penalty).clamp(0.0, 1.0);

        match best {
            Some((_, best_confidence)) if confidence <= best_confidence => {}
            _ => best = Some((candidate, confidence)),
        }
    }

    let (frequency, confidence_score) = best.unwrap_or((Frequency::Irregular, 0.0));

    let next_predicted = if confidence_score > config.prediction_confidence_threshold {
        Some(last_occurrence + Duration::days(avg_interval.round() as i64))
    } else {
        None
    };

    debug!(
        source,
        frequency = frequency.as_str(),
        confidence = confidence_score,
        avg_interval,
        "Detected income pattern"
    );

    Some(IncomePattern {
        source: source.to_string(),
        frequency,
        average_amount,
        confidence_score,
        last_occurrence,
        next_predicted,
    })
}
