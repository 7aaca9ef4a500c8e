#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::*;
use cp_core::ComplaintStatus;
use cp_core::access::listing_owner_scope;
use cp_core::paging::{PageInfo, PageRequest};
use rusqlite::types::Value;
use rusqlite::{Connection, Row, params_from_iter};

pub const TOP_LIKED_LIMIT: u32 = 5;

const SUMMARY_COLUMNS: &str = r#"
    c.complaint_no, c.category, c.title, c.status, c.is_public, c.created_at_ms,
    u.display_name,
    (SELECT COUNT(*) FROM post_likes l WHERE l.complaint_no = c.complaint_no),
    (SELECT COUNT(*) FROM complaint_replies r WHERE r.complaint_no = c.complaint_no)
"#;

fn summary_from_row(row: &Row<'_>) -> Result<ComplaintSummary, StoreError> {
    Ok(ComplaintSummary {
        complaint_no: complaint_no_from_row(row.get(0)?)?,
        category: row.get(1)?,
        title: row.get(2)?,
        status: complaint_status_from_row(&row.get::<_, String>(3)?)?,
        is_public: row.get(4)?,
        created_at_ms: row.get(5)?,
        author_name: row.get(6)?,
        like_count: count_from_sqlite(row.get(7)?),
        reply_count: count_from_sqlite(row.get(8)?),
    })
}

/// One newest-first page of summaries matching `filter`, with its total.
fn summary_page(
    conn: &Connection,
    filter: &SqlFilter,
    page: PageRequest,
) -> Result<ComplaintPage, StoreError> {
    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM complaints c{}", filter.where_sql()),
        params_from_iter(filter.values()),
        |row| row.get(0),
    )?;

    let sql = format!(
        "SELECT {SUMMARY_COLUMNS} FROM complaints c \
         JOIN users u ON u.user_no = c.user_no{} \
         ORDER BY c.created_at_ms DESC, c.complaint_no DESC \
         LIMIT ? OFFSET ?",
        filter.where_sql()
    );
    let values = filter.values_with([
        Value::from(i64::from(page.limit())),
        Value::from(to_sqlite_i64(page.offset())?),
    ]);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(values.iter()))?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(summary_from_row(row)?);
    }

    Ok(ComplaintPage {
        items,
        page: PageInfo::new(page, count_from_sqlite(total)),
    })
}

impl SqliteStore {
    /// Public complaints plus the viewer's own private ones, newest first.
    pub fn list_complaints(
        &mut self,
        request: ListComplaintsRequest,
    ) -> Result<ComplaintPage, StoreError> {
        let mut filter = SqlFilter::new();
        match listing_owner_scope(request.viewer.as_ref()) {
            Some(owner) => filter.push("(c.is_public = 1 OR c.user_no = ?)", owner.get()),
            None => filter.push_clause("c.is_public = 1"),
        }
        if let Some(status) = request.status {
            filter.push("c.status = ?", status.as_str().to_string());
        }
        if let Some(category) = optional_text(request.category.as_deref()) {
            filter.push("c.category = ?", category);
        }
        if let Some(keyword) = optional_text(request.search.as_deref()) {
            filter.push_all(
                "(instr(c.title, ?) > 0 OR instr(c.content, ?) > 0)",
                [Value::from(keyword.clone()), Value::from(keyword)],
            );
        }
        if let Some(region) = optional_text(request.region.as_deref()) {
            filter.push(
                "EXISTS (SELECT 1 FROM spatial_features sf \
                 WHERE sf.complaint_no = c.complaint_no AND instr(sf.addr_text, ?) = 1)",
                region,
            );
        }

        let tx = self.conn.transaction()?;
        let page = summary_page(&tx, &filter, request.page)?;
        tx.commit()?;
        Ok(page)
    }

    /// Everything the owner filed, public or not, newest first.
    pub fn my_complaints(
        &mut self,
        request: MyComplaintsRequest,
    ) -> Result<ComplaintPage, StoreError> {
        let mut filter = SqlFilter::new();
        filter.push("c.user_no = ?", request.owner.user_no.get());

        let tx = self.conn.transaction()?;
        ensure_user_exists(&tx, request.owner.user_no)?;
        let page = summary_page(&tx, &filter, request.page)?;
        tx.commit()?;
        Ok(page)
    }

    /// The most-liked public complaints. Ties go to the newer complaint.
    pub fn top_liked(
        &self,
        status: Option<ComplaintStatus>,
    ) -> Result<Vec<ComplaintSummary>, StoreError> {
        let mut filter = SqlFilter::new();
        filter.push_clause("c.is_public = 1");
        if let Some(status) = status {
            filter.push("c.status = ?", status.as_str().to_string());
        }

        let sql = format!(
            "SELECT {SUMMARY_COLUMNS} FROM complaints c \
             JOIN users u ON u.user_no = c.user_no{} \
             ORDER BY 8 DESC, c.created_at_ms DESC, c.complaint_no DESC \
             LIMIT ?",
            filter.where_sql()
        );
        let values = filter.values_with([Value::from(i64::from(TOP_LIKED_LIMIT))]);
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(values.iter()))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(summary_from_row(row)?);
        }
        Ok(items)
    }
}
