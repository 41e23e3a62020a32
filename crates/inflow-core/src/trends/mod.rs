//! Income trends analysis
//!
//! The engine behind `analyze`: per-source pattern detection and
//! statistics, cross-source seasonality, and the overall predictability
//! blend. Submodules:
//! - `pattern` - cadence classification for one source
//! - `statistics` - descriptive statistics and reliability for one source
//! - `seasonality` - calendar-month peaks and troughs across all sources
//! - `predictability` - the single aggregate score
//! - `engine` - orchestration and assembly of the composite result

pub mod engine;
pub mod pattern;
pub mod predictability;
pub mod seasonality;
pub mod statistics;

pub use engine::{AnalyzerConfig, TrendsAnalyzer};

/// Arithmetic mean, 0 for an empty slice
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (N-1 denominator), 0 under two samples
pub(crate) fn sample_stdev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Coefficient of variation: stdev / mean
///
/// Returns infinity on a non-positive mean so that the downstream
/// `1 / (1 + cv)` transform collapses to 0 instead of faulting.
pub(crate) fn coefficient_of_variation(values: &[f64]) -> f64 {
    let avg = mean(values);
    if avg <= 0.0 {
        return f64::INFINITY;
    }
    sample_stdev(values) / avg
}
