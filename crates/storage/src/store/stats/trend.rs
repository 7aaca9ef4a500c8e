#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::*;
use cp_core::TimeBasis;
use cp_core::stats::growth_series;
use rusqlite::{Connection, params_from_iter};

impl TrendRequest {
    /// Trend over the default window for `basis` ending at `now_ms`.
    pub fn recent(basis: TimeBasis, filter: StatsFilter, now_ms: i64) -> Result<Self, StoreError> {
        Ok(Self {
            basis,
            filter,
            since_ms: trend_window_start(basis, now_ms)?,
        })
    }
}

/// Non-empty buckets in ascending key order; growth is relative to the
/// previous emitted bucket.
pub(in crate::store) fn query_trend(
    conn: &Connection,
    request: &TrendRequest,
) -> Result<Vec<TrendPoint>, StoreError> {
    let mut filter = SqlFilter::new();
    filter.apply_stats("c", &request.filter);
    if let Some(since_ms) = request.since_ms {
        filter.push("c.created_at_ms >= ?", since_ms);
    }

    let bucket = bucket_sql(request.basis, "c.created_at_ms");
    let mut stmt = conn.prepare(&format!(
        "SELECT {bucket} AS bucket, COUNT(*) FROM complaints c{} GROUP BY bucket ORDER BY bucket ASC",
        filter.where_sql()
    ))?;
    let mut rows = stmt.query(params_from_iter(filter.values()))?;
    let mut buckets = Vec::<(String, u64)>::new();
    while let Some(row) = rows.next()? {
        buckets.push((row.get(0)?, count_from_sqlite(row.get(1)?)));
    }

    let counts: Vec<u64> = buckets.iter().map(|(_, count)| *count).collect();
    Ok(buckets
        .into_iter()
        .zip(growth_series(&counts))
        .map(|((bucket, count), growth)| TrendPoint {
            bucket,
            count,
            growth,
        })
        .collect())
}

impl SqliteStore {
    pub fn trend(&self, request: &TrendRequest) -> Result<Vec<TrendPoint>, StoreError> {
        query_trend(&self.conn, request)
    }
}
