#![forbid(unsafe_code)]

use super::super::StatsFilter;
use rusqlite::types::Value;

/// Conjunction of `?`-parameterised conditions, bound positionally in push order.
#[derive(Debug, Default)]
pub(in crate::store) struct SqlFilter {
    clauses: Vec<String>,
    values: Vec<Value>,
}

impl SqlFilter {
    pub(in crate::store) fn new() -> Self {
        Self::default()
    }

    pub(in crate::store) fn push(&mut self, clause: impl Into<String>, value: impl Into<Value>) {
        self.clauses.push(clause.into());
        self.values.push(value.into());
    }

    /// A clause with several placeholders, bound in the given order.
    pub(in crate::store) fn push_all(
        &mut self,
        clause: impl Into<String>,
        values: impl IntoIterator<Item = Value>,
    ) {
        self.clauses.push(clause.into());
        self.values.extend(values);
    }

    pub(in crate::store) fn push_clause(&mut self, clause: impl Into<String>) {
        self.clauses.push(clause.into());
    }

    pub(in crate::store) fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            return String::new();
        }
        format!(" WHERE {}", self.clauses.join(" AND "))
    }

    /// Same conditions as a suffix for an existing `ON`/`WHERE` clause.
    pub(in crate::store) fn and_sql(&self) -> String {
        self.clauses
            .iter()
            .map(|clause| format!(" AND {clause}"))
            .collect()
    }

    pub(in crate::store) fn values(&self) -> &[Value] {
        &self.values
    }

    /// Bound values followed by `extra` (e.g. LIMIT/OFFSET).
    pub(in crate::store) fn values_with(&self, extra: impl IntoIterator<Item = Value>) -> Vec<Value> {
        let mut out = self.values.clone();
        out.extend(extra);
        out
    }

    /// Adds the dashboard filter against the complaints table aliased as `alias`.
    pub(in crate::store) fn apply_stats(&mut self, alias: &str, filter: &StatsFilter) {
        if let Some(category) = filter.category.as_deref() {
            self.push(format!("{alias}.category = ?"), category.to_string());
        }
        if let Some(agency_no) = filter.agency_no {
            self.push(
                format!(
                    "EXISTS (SELECT 1 FROM complaint_agencies fa \
                     WHERE fa.complaint_no = {alias}.complaint_no AND fa.agency_no = ?)"
                ),
                agency_no.get(),
            );
        }
    }
}
