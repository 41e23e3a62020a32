//! Descriptive statistics and reliability scoring for one income source

use crate::models::{IncomeRecord, SourceStatistics};

use super::{coefficient_of_variation, mean, sample_stdev};

/// Summarize one source's records
///
/// Expects the slice sorted ascending by date (the interval component of
/// the reliability score depends on it). Returns None only for an empty
/// slice.
pub(crate) fn calculate_statistics(
    source: &str,
    records: &[IncomeRecord],
) -> Option<SourceStatistics> {
    if records.is_empty() {
        return None;
    }

    let amounts: Vec<f64> = records.iter().map(|r| r.amount).collect();
    let total_amount: f64 = amounts.iter().sum();
    let average_amount = mean(&amounts);
    let min_amount = amounts.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_amount = amounts.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let standard_deviation = sample_stdev(&amounts);

    let reliability_score = if records.len() < 2 {
        // One record says nothing about consistency
        0.0
    } else {
        let gaps: Vec<f64> = records
            .windows(2)
            .map(|w| (w[1].date - w[0].date).num_days() as f64)
            .collect();
        let cv_amount = coefficient_of_variation(&amounts);
        let cv_interval = coefficient_of_variation(&gaps);
        // Each component maps cv=0 to 1.0 and decays toward 0; an
        // infinite cv (zero mean) contributes exactly 0
        (1.0 / (1.0 + cv_amount) + 1.0 / (1.0 + cv_interval)) / 2.0
    };

    SourceStatistics::new(
        source,
        records.len() as u32,
        total_amount,
        average_amount,
        min_amount,
        max_amount,
        standard_deviation,
        reliability_score,
    )
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn records_with_gaps(gaps: &[i64], amounts: &[f64]) -> Vec<IncomeRecord> {
        assert_eq!(gaps.len() + 1, amounts.len());
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut records = vec![IncomeRecord::new("Test", date, amounts[0]).unwrap()];
        for (gap, amount) in gaps.iter().zip(&amounts[1..]) {
            date += Duration::days(*gap);
            records.push(IncomeRecord::new("Test", date, *amount).unwrap());
        }
        records
    }

    #[test]
    fn test_basic_statistics() {
        let records = records_with_gaps(&[10, 20], &[100.0, 200.0, 300.0]);
        let stats = calculate_statistics("Test", &records).unwrap();

        assert_eq!(stats.total_occurrences, 3);
        assert_eq!(stats.total_amount, 600.0);
        assert_eq!(stats.average_amount, 200.0);
        assert_eq!(stats.min_amount, 100.0);
        assert_eq!(stats.max_amount, 300.0);
        assert!((stats.standard_deviation - 100.0).abs() < 1e-9);
        assert!(stats.max_amount >= stats.min_amount);
    }

    #[test]
    fn test_single_record() {
        let records = records_with_gaps(&[], &[750.0]);
        let stats = calculate_statistics("Test", &records).unwrap();

        assert_eq!(stats.total_occurrences, 1);
        assert_eq!(stats.min_amount, 750.0);
        assert_eq!(stats.max_amount, 750.0);
        assert_eq!(stats.standard_deviation, 0.0);
        assert_eq!(stats.reliability_score, 0.0);
    }

    #[test]
    fn test_perfectly_regular_source_scores_one() {
        // Identical amounts and identical gaps: both cv terms are 0
        let records = records_with_gaps(&[14; 5], &[1200.0; 6]);
        let stats = calculate_statistics("Test", &records).unwrap();

        assert!((stats.reliability_score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reliability_blends_amount_and_interval_consistency() {
        let records = records_with_gaps(&[10, 20], &[100.0, 200.0, 300.0]);
        let stats = calculate_statistics("Test", &records).unwrap();

        // cv_amount = 0.5, cv_interval = stdev([10,20]) / 15
        let cv_interval = (7.0710678118654755_f64) / 15.0;
        let expected = (1.0 / 1.5 + 1.0 / (1.0 + cv_interval)) / 2.0;
        assert!((stats.reliability_score - expected).abs() < 1e-9);
        assert!(stats.reliability_score > 0.0 && stats.reliability_score < 1.0);
    }

    #[test]
    fn test_variable_amounts_lower_reliability() {
        let steady = calculate_statistics(
            "Test",
            &records_with_gaps(&[7; 5], &[1000.0; 6]),
        )
        .unwrap();
        let volatile = calculate_statistics(
            "Test",
            &records_with_gaps(&[7; 5], &[200.0, 1800.0, 400.0, 1600.0, 300.0, 1700.0]),
        )
        .unwrap();

        assert!(steady.reliability_score > volatile.reliability_score);
    }

    #[test]
    fn test_same_day_records_zero_interval_component() {
        // Both records on one date: gap mean is 0, cv_interval is
        // infinite, so the interval component contributes nothing
        let records = records_with_gaps(&[0], &[500.0, 500.0]);
        let stats = calculate_statistics("Test", &records).unwrap();

        // cv_amount = 0 gives 1.0; interval side gives 0.0
        assert!((stats.reliability_score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_slice_returns_none() {
        assert!(calculate_statistics("Test", &[]).is_none());
    }
}
