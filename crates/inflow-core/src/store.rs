//! Record store collaborator seam
//!
//! The engine never touches storage directly: it asks a `RecordStore`
//! for an already-filtered, already-validated record set. The fetch is
//! the only suspending operation in an analysis run.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::models::IncomeRecord;

/// External source of income records
///
/// Implementations must return records matching every provided filter.
/// Amount validation is the implementation's responsibility; the engine
/// assumes strictly positive amounts.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_records(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        source: Option<&str>,
    ) -> Result<Vec<IncomeRecord>>;
}

/// In-memory record store
///
/// Backs the CLI (records loaded from CSV) and the engine tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<IncomeRecord>,
}

impl MemoryStore {
    pub fn new(records: Vec<IncomeRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_records(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        source: Option<&str>,
    ) -> Result<Vec<IncomeRecord>> {
        let matches = self
            .records
            .iter()
            .filter(|r| start_date.map_or(true, |start| r.date >= start))
            .filter(|r| end_date.map_or(true, |end| r.date <= end))
            .filter(|r| source.map_or(true, |s| r.source == s))
            .cloned()
            .collect();
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: &str, date: (i32, u32, u32), amount: f64) -> IncomeRecord {
        IncomeRecord::new(
            source,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            amount,
        )
        .unwrap()
    }

    fn sample_store() -> MemoryStore {
        MemoryStore::new(vec![
            record("Acme", (2024, 1, 5), 1000.0),
            record("Acme", (2024, 2, 5), 1000.0),
            record("Freelance", (2024, 1, 20), 450.0),
            record("Freelance", (2024, 3, 2), 700.0),
        ])
    }

    #[tokio::test]
    async fn test_fetch_all() {
        let store = sample_store();
        let records = store.fetch_records(None, None, None).await.unwrap();
        assert_eq!(records.len(), 4);
    }

    #[tokio::test]
    async fn test_fetch_by_source() {
        let store = sample_store();
        let records = store.fetch_records(None, None, Some("Acme")).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.source == "Acme"));
    }

    #[tokio::test]
    async fn test_fetch_by_date_range() {
        let store = sample_store();
        let start = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let records = store
            .fetch_records(Some(start), Some(end), None)
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.date >= start && r.date <= end));
    }

    #[tokio::test]
    async fn test_fetch_range_bounds_inclusive() {
        let store = sample_store();
        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let records = store
            .fetch_records(Some(day), Some(day), None)
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, day);
    }
}
