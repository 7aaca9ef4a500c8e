#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::*;
use cp_core::ComplaintStatus;
use cp_core::stats::growth_rate;
use rusqlite::{Connection, params_from_iter};
use std::ops::Range;

fn count_between(
    conn: &Connection,
    filter: &StatsFilter,
    window: &Range<i64>,
) -> Result<u64, StoreError> {
    let mut sql_filter = SqlFilter::new();
    sql_filter.apply_stats("c", filter);
    sql_filter.push("c.created_at_ms >= ?", window.start);
    sql_filter.push("c.created_at_ms < ?", window.end);
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM complaints c{}", sql_filter.where_sql()),
        params_from_iter(sql_filter.values()),
        |row| row.get(0),
    )?;
    Ok(count_from_sqlite(count))
}

fn compare(
    conn: &Connection,
    filter: &StatsFilter,
    bounds: &PeriodBounds,
) -> Result<PeriodComparison, StoreError> {
    let current = count_between(conn, filter, &bounds.current)?;
    let previous = count_between(conn, filter, &bounds.previous)?;
    Ok(PeriodComparison {
        current,
        previous,
        growth: growth_rate(previous, current),
    })
}

/// Today vs yesterday, this month vs last, this year vs last (UTC).
pub(in crate::store) fn query_summary(
    conn: &Connection,
    filter: &StatsFilter,
    now_ms: i64,
) -> Result<SummaryCounters, StoreError> {
    Ok(SummaryCounters {
        day: compare(conn, filter, &day_bounds(now_ms)?)?,
        month: compare(conn, filter, &month_bounds(now_ms)?)?,
        year: compare(conn, filter, &year_bounds(now_ms)?)?,
    })
}

pub(in crate::store) fn query_status_counts(
    conn: &Connection,
    filter: &StatsFilter,
    now_ms: i64,
) -> Result<StatusCounts, StoreError> {
    let mut sql_filter = SqlFilter::new();
    sql_filter.apply_stats("c", filter);
    let mut counts = StatusCounts::default();
    {
        let mut stmt = conn.prepare(&format!(
            "SELECT c.status, COUNT(*) FROM complaints c{} GROUP BY c.status",
            sql_filter.where_sql()
        ))?;
        let mut rows = stmt.query(params_from_iter(sql_filter.values()))?;
        while let Some(row) = rows.next()? {
            let status = complaint_status_from_row(&row.get::<_, String>(0)?)?;
            let count = count_from_sqlite(row.get(1)?);
            counts.total += count;
            match status {
                ComplaintStatus::Received => counts.received = count,
                ComplaintStatus::InProgress => counts.in_progress = count,
                ComplaintStatus::Completed => counts.completed = count,
                ComplaintStatus::Rejected => counts.rejected = count,
                ComplaintStatus::Cancelled => counts.cancelled = count,
            }
        }
    }
    counts.today = count_between(conn, filter, &day_bounds(now_ms)?.current)?;
    Ok(counts)
}

impl SqliteStore {
    pub fn summary_counters(
        &self,
        filter: &StatsFilter,
        now_ms: i64,
    ) -> Result<SummaryCounters, StoreError> {
        query_summary(&self.conn, filter, now_ms)
    }

    pub fn status_counts(
        &self,
        filter: &StatsFilter,
        now_ms: i64,
    ) -> Result<StatusCounts, StoreError> {
        query_status_counts(&self.conn, filter, now_ms)
    }
}
