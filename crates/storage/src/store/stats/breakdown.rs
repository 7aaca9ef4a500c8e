#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::*;
use super::{BOTTLENECK_TOP_N, INSTITUTION_TOP_N, REGION_TOP_N};
use cp_core::stats::{NamedCount, RankedCount, rank_by_value, region_key};
use cp_core::{AgencyType, AssignmentStatus, StatsDimension};
use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};
use std::collections::HashMap;

/// Counts per category in order of first appearance, then ranked.
pub(in crate::store) fn query_categories(
    conn: &Connection,
    filter: &StatsFilter,
) -> Result<Vec<RankedCount>, StoreError> {
    let mut sql_filter = SqlFilter::new();
    sql_filter.apply_stats("c", filter);
    let mut stmt = conn.prepare(&format!(
        r#"
        SELECT c.category, COUNT(*)
        FROM complaints c{}
        GROUP BY c.category
        ORDER BY MIN(c.complaint_no) ASC
        "#,
        sql_filter.where_sql()
    ))?;
    let mut rows = stmt.query(params_from_iter(sql_filter.values()))?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(NamedCount::new(
            row.get::<_, String>(0)?,
            count_from_sqlite(row.get(1)?),
        ));
    }
    Ok(rank_by_value(items))
}

/// Stable descending sort by value, truncated to `top_n`.
fn top_by_value(mut items: Vec<NamedCount>, top_n: usize) -> Vec<NamedCount> {
    items.sort_by(|left, right| right.value.cmp(&left.value));
    items.truncate(top_n);
    items
}

fn query_regions(conn: &Connection, filter: &StatsFilter) -> Result<Vec<NamedCount>, StoreError> {
    let mut sql_filter = SqlFilter::new();
    sql_filter.apply_stats("c", filter);
    let mut stmt = conn.prepare(&format!(
        r#"
        SELECT sf.addr_text
        FROM complaints c
        JOIN spatial_features sf ON sf.complaint_no = c.complaint_no{}
        ORDER BY c.complaint_no ASC
        "#,
        sql_filter.where_sql()
    ))?;
    let mut rows = stmt.query(params_from_iter(sql_filter.values()))?;

    let mut index = HashMap::<String, usize>::new();
    let mut items = Vec::<NamedCount>::new();
    while let Some(row) = rows.next()? {
        let Some(key) = region_key(&row.get::<_, String>(0)?) else {
            continue;
        };
        match index.get(&key) {
            Some(&slot) => items[slot].value += 1,
            None => {
                index.insert(key.clone(), items.len());
                items.push(NamedCount::new(key, 1));
            }
        }
    }
    Ok(top_by_value(items, REGION_TOP_N))
}

/// Every agency name of `institution_type`, including those with no complaints.
/// Agencies sharing a name count as one institution.
fn query_institutions(
    conn: &Connection,
    filter: &StatsFilter,
    institution_type: AgencyType,
) -> Result<Vec<NamedCount>, StoreError> {
    let mut sql_filter = SqlFilter::new();
    sql_filter.apply_stats("c", filter);
    let mut stmt = conn.prepare(&format!(
        r#"
        SELECT a.agency_name, COUNT(c.complaint_no)
        FROM agencies a
        LEFT JOIN complaint_agencies ca ON ca.agency_no = a.agency_no
        LEFT JOIN complaints c ON c.complaint_no = ca.complaint_no{}
        WHERE a.agency_type = ?
        GROUP BY a.agency_name
        ORDER BY COUNT(c.complaint_no) DESC, a.agency_name ASC
        LIMIT ?
        "#,
        sql_filter.and_sql()
    ))?;
    let values = sql_filter.values_with([
        Value::from(institution_type.as_str().to_string()),
        Value::from(to_sqlite_i64(INSTITUTION_TOP_N)?),
    ]);
    let mut rows = stmt.query(params_from_iter(values.iter()))?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(NamedCount::new(
            row.get::<_, String>(0)?,
            count_from_sqlite(row.get(1)?),
        ));
    }
    Ok(items)
}

/// Agencies with the most assignments still RECEIVED or IN_PROGRESS.
pub(in crate::store) fn query_bottleneck(
    conn: &Connection,
    filter: &StatsFilter,
) -> Result<Vec<NamedCount>, StoreError> {
    let open: Vec<&str> = AssignmentStatus::ALL
        .into_iter()
        .filter(|status| status.is_open())
        .map(AssignmentStatus::as_str)
        .collect();
    let placeholders = vec!["?"; open.len()].join(", ");

    let mut sql_filter = SqlFilter::new();
    sql_filter.apply_stats("c", filter);
    let mut stmt = conn.prepare(&format!(
        r#"
        SELECT a.agency_name, COUNT(*)
        FROM complaint_agencies ca
        JOIN agencies a ON a.agency_no = ca.agency_no
        JOIN complaints c ON c.complaint_no = ca.complaint_no
        WHERE ca.status IN ({placeholders}){}
        GROUP BY a.agency_no
        ORDER BY COUNT(*) DESC, a.agency_no ASC
        LIMIT ?
        "#,
        sql_filter.and_sql()
    ))?;
    let mut values: Vec<Value> = open
        .iter()
        .map(|status| Value::from(status.to_string()))
        .collect();
    values.extend(sql_filter.values().iter().cloned());
    values.push(Value::from(to_sqlite_i64(BOTTLENECK_TOP_N)?));

    let mut rows = stmt.query(params_from_iter(values.iter()))?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(NamedCount::new(
            row.get::<_, String>(0)?,
            count_from_sqlite(row.get(1)?),
        ));
    }
    Ok(items)
}

impl SqliteStore {
    pub fn category_stats(&self, filter: &StatsFilter) -> Result<Vec<RankedCount>, StoreError> {
        query_categories(&self.conn, filter)
    }

    /// Top entries by region (address prefix) or by institution (agency name).
    pub fn distribution_stats(
        &self,
        request: &DistributionRequest,
    ) -> Result<DistributionStats, StoreError> {
        let items = match request.dimension {
            StatsDimension::Region => query_regions(&self.conn, &request.filter)?,
            StatsDimension::Institution => {
                query_institutions(&self.conn, &request.filter, request.institution_type)?
            }
        };
        Ok(DistributionStats {
            dimension: request.dimension,
            items,
        })
    }

    pub fn bottleneck(&self, filter: &StatsFilter) -> Result<Vec<NamedCount>, StoreError> {
        query_bottleneck(&self.conn, filter)
    }
}
