//! Inflow Core Library
//!
//! Shared functionality for the Inflow income-planning tool:
//! - Income trends analysis engine (cadence detection, per-source
//!   statistics, calendar seasonality, predictability scoring)
//! - Record store collaborator trait with an in-memory implementation
//! - CSV ingestion for income record files

pub mod error;
pub mod import;
pub mod models;
pub mod store;
pub mod trends;

pub use error::{Error, Result};
pub use models::{
    AnalysisRequest, Frequency, IncomePattern, IncomeRecord, IncomeTrendsAnalysis,
    SeasonalPeriod, SeasonalityMetrics, SourceStatistics, DEFAULT_MIN_CONFIDENCE,
};
pub use store::{MemoryStore, RecordStore};
pub use trends::{AnalyzerConfig, TrendsAnalyzer};
