#![forbid(unsafe_code)]

use super::super::*;
use super::ages::query_age_groups;
use super::breakdown::{query_bottleneck, query_categories};
use super::counts::{query_status_counts, query_summary};
use super::trend::query_trend;

impl SqliteStore {
    /// Every dashboard view from a single read transaction.
    pub fn dashboard(&mut self, request: &DashboardRequest) -> Result<Dashboard, StoreError> {
        let tx = self.conn.transaction()?;
        let dashboard = Dashboard {
            status_counts: query_status_counts(&tx, &request.filter, request.now_ms)?,
            summary: query_summary(&tx, &request.filter, request.now_ms)?,
            categories: query_categories(&tx, &request.filter)?,
            trend: query_trend(&tx, &request.trend)?,
            bottleneck: query_bottleneck(&tx, &request.filter)?,
            age_groups: query_age_groups(&tx, &request.filter)?,
        };
        tx.commit()?;
        Ok(dashboard)
    }
}
