//! In-Memory Sales Store
//!
//! Backs tests and local development when no DATABASE_URL is configured.
//! Holds records in insertion order and sorts on read, matching the remote
//! store's `ORDER BY date ASC`.

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::{AnalyticsSnapshot, SalesRecord};
use shared::{AppResult, DateRange};

use super::SalesStore;

#[derive(Default)]
pub struct MemorySalesStore {
    records: RwLock<Vec<SalesRecord>>,
    snapshots: RwLock<Vec<AnalyticsSnapshot>>,
    organization: Option<String>,
}

impl MemorySalesStore {
    pub fn new(organization: Option<String>) -> Self {
        Self {
            organization,
            ..Default::default()
        }
    }

    /// Store pre-populated with records, for tests
    pub fn seeded(organization: Option<String>, records: Vec<SalesRecord>) -> Self {
        let store = Self::new(organization);
        *store.records.write() = records;
        store
    }

    pub fn push(&self, record: SalesRecord) {
        self.records.write().push(record);
    }

    /// Snapshot log, for asserting on writes in tests
    pub fn snapshots(&self) -> Vec<AnalyticsSnapshot> {
        self.snapshots.read().clone()
    }
}

#[async_trait]
impl SalesStore for MemorySalesStore {
    async fn fetch_range(
        &self,
        range: &DateRange,
        team_id: Option<&str>,
    ) -> AppResult<Vec<SalesRecord>> {
        let mut matched: Vec<SalesRecord> = self
            .records
            .read()
            .iter()
            .filter(|r| range.contains(r.date))
            .filter(|r| team_id.is_none_or(|team| r.team_id.as_deref() == Some(team)))
            .cloned()
            .collect();
        matched.sort_by_key(|r| r.date);
        Ok(matched)
    }

    async fn current_organization(&self) -> AppResult<Option<String>> {
        Ok(self.organization.clone())
    }

    async fn write_snapshot(&self, snapshot: AnalyticsSnapshot) -> AppResult<()> {
        self.snapshots.write().push(snapshot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: &str, team: Option<&str>) -> SalesRecord {
        let json = format!(
            r#"{{"date":"{}","location":"Store A"{}}}"#,
            date,
            team.map(|t| format!(r#","team_id":"{}""#, t))
                .unwrap_or_default()
        );
        serde_json::from_str(&json).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_range_filters_and_sorts() {
        let store = MemorySalesStore::seeded(
            None,
            vec![
                record("2024-01-03", None),
                record("2024-01-01", None),
                record("2024-02-01", None),
            ],
        );
        let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
        let records = store.fetch_range(&range, None).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[tokio::test]
    async fn test_fetch_range_team_filter() {
        let store = MemorySalesStore::seeded(
            None,
            vec![
                record("2024-01-01", Some("team-1")),
                record("2024-01-01", Some("team-2")),
                record("2024-01-01", None),
            ],
        );
        let range = DateRange::parse("2024-01-01", "2024-01-01").unwrap();
        let records = store.fetch_range(&range, Some("team-1")).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].team_id.as_deref(), Some("team-1"));
    }

    #[tokio::test]
    async fn test_snapshot_write_is_logged() {
        let store = MemorySalesStore::new(Some("org-1".into()));
        assert_eq!(
            store.current_organization().await.unwrap().as_deref(),
            Some("org-1")
        );
        let snap = AnalyticsSnapshot::kpi_metrics(
            "2024-01-01_to_2024-01-31".into(),
            "org-1".into(),
            &Default::default(),
            &[],
        );
        store.write_snapshot(snap).await.unwrap();
        assert_eq!(store.snapshots().len(), 1);
    }
}
