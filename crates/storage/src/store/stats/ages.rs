#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::*;
use cp_core::stats::{age_decade, age_in_years};
use rusqlite::{Connection, params_from_iter};
use std::collections::BTreeMap;

/// Complaints per decade of the complainant's age at submission. Complainants
/// without a usable birth date are left out.
pub(in crate::store) fn query_age_groups(
    conn: &Connection,
    filter: &StatsFilter,
) -> Result<Vec<AgeGroupCount>, StoreError> {
    let mut sql_filter = SqlFilter::new();
    sql_filter.push_clause("u.birth_date IS NOT NULL");
    sql_filter.apply_stats("c", filter);
    let mut stmt = conn.prepare(&format!(
        "SELECT u.birth_date, c.created_at_ms FROM complaints c \
         JOIN users u ON u.user_no = c.user_no{}",
        sql_filter.where_sql()
    ))?;
    let mut rows = stmt.query(params_from_iter(sql_filter.values()))?;

    let mut decades = BTreeMap::<u32, u64>::new();
    while let Some(row) = rows.next()? {
        let Some(birth) = parse_birth_date(&row.get::<_, String>(0)?) else {
            continue;
        };
        let submitted = calendar_date_from_ms(row.get(1)?);
        let Some(decade) = age_decade(age_in_years(birth, submitted)) else {
            continue;
        };
        *decades.entry(decade).or_default() += 1;
    }

    Ok(decades
        .into_iter()
        .map(|(decade, count)| AgeGroupCount { decade, count })
        .collect())
}

impl SqliteStore {
    pub fn age_group_stats(&self, filter: &StatsFilter) -> Result<Vec<AgeGroupCount>, StoreError> {
        query_age_groups(&self.conn, filter)
    }
}
