//! Sales Data Store
//!
//! The pipeline reads daily sales records from a store it does not own and
//! writes back only analytics snapshots. [`SalesStore`] is the seam: the
//! production implementation talks to the remote database, while the
//! in-memory implementation backs tests and local development.

mod memory;
mod remote;

pub use memory::MemorySalesStore;
pub use remote::RemoteSalesStore;

use async_trait::async_trait;
use shared::models::{AnalyticsSnapshot, SalesRecord};
use shared::{AppResult, DateRange};

#[async_trait]
pub trait SalesStore: Send + Sync {
    /// Fetch records whose date falls inside the inclusive range, ordered
    /// ascending by date. `team_id` filters to one team when given.
    async fn fetch_range(
        &self,
        range: &DateRange,
        team_id: Option<&str>,
    ) -> AppResult<Vec<SalesRecord>>;

    /// Resolve the organization the caller belongs to, for snapshot tagging.
    /// `None` means no organization is configured.
    async fn current_organization(&self) -> AppResult<Option<String>>;

    /// Persist one analytics snapshot. Write-only; snapshots are never read
    /// back by this service.
    async fn write_snapshot(&self, snapshot: AnalyticsSnapshot) -> AppResult<()>;
}
