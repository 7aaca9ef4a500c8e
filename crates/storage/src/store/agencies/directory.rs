#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::*;
use cp_core::access::can_manage_assignments;
use cp_core::paging::PageInfo;
use cp_core::{AgencyNo, AgencyType, AssignmentStatus};
use rusqlite::types::Value;
use rusqlite::{Connection, params, params_from_iter};
use std::collections::HashMap;

const AGENCY_COLUMNS: &str = "agency_no, agency_type, agency_name, region_code, created_at_ms";

fn agency_from_row(row: &rusqlite::Row<'_>) -> Result<AgencyRow, StoreError> {
    Ok(AgencyRow {
        agency_no: agency_no_from_row(row.get(0)?)?,
        agency_type: agency_type_from_row(&row.get::<_, String>(1)?)?,
        agency_name: row.get(2)?,
        region_code: row.get(3)?,
        created_at_ms: row.get(4)?,
    })
}

fn load_agency(conn: &Connection, agency_no: AgencyNo) -> Result<AgencyRow, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {AGENCY_COLUMNS} FROM agencies WHERE agency_no = ?1"
    ))?;
    let mut rows = stmt.query(params![agency_no.get()])?;
    let Some(row) = rows.next()? else {
        return Err(StoreError::UnknownAgency);
    };
    agency_from_row(row)
}

impl SqliteStore {
    pub fn create_agency(&mut self, request: CreateAgencyRequest) -> Result<AgencyRow, StoreError> {
        let agency_name = require_text(&request.agency_name, "agencyName must not be empty")?;
        let region_code = optional_text(request.region_code.as_deref());

        self.conn.execute(
            r#"
            INSERT INTO agencies(agency_type, agency_name, region_code, created_at_ms)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                request.agency_type.as_str(),
                agency_name,
                region_code,
                request.created_at_ms,
            ],
        )?;
        let agency_no = agency_no_from_row(self.conn.last_insert_rowid())?;

        tracing::debug!(agency_no = agency_no.get(), "agency created");
        Ok(AgencyRow {
            agency_no,
            agency_type: request.agency_type,
            agency_name,
            region_code,
            created_at_ms: request.created_at_ms,
        })
    }

    /// Agencies ordered by name, optionally restricted to one type.
    pub fn list_agencies(
        &self,
        agency_type: Option<AgencyType>,
    ) -> Result<Vec<AgencyRow>, StoreError> {
        let mut filter = SqlFilter::new();
        if let Some(agency_type) = agency_type {
            filter.push("agency_type = ?", agency_type.as_str().to_string());
        }
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {AGENCY_COLUMNS} FROM agencies{} ORDER BY agency_name ASC, agency_no ASC",
            filter.where_sql()
        ))?;
        let mut rows = stmt.query(params_from_iter(filter.values()))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(agency_from_row(row)?);
        }
        Ok(out)
    }

    pub fn agency_detail(&mut self, agency_no: AgencyNo) -> Result<AgencyDetail, StoreError> {
        let tx = self.conn.transaction()?;
        let agency = load_agency(&tx, agency_no)?;

        let mut counts = HashMap::<AssignmentStatus, u64>::new();
        {
            let mut stmt = tx.prepare(
                r#"
                SELECT status, COUNT(*)
                FROM complaint_agencies
                WHERE agency_no = ?1
                GROUP BY status
                "#,
            )?;
            let mut rows = stmt.query(params![agency_no.get()])?;
            while let Some(row) = rows.next()? {
                let status = assignment_status_from_row(&row.get::<_, String>(0)?)?;
                counts.insert(status, count_from_sqlite(row.get(1)?));
            }
        }
        tx.commit()?;

        let status_counts = AssignmentStatus::ALL
            .into_iter()
            .filter_map(|status| counts.get(&status).map(|count| (status, *count)))
            .collect();
        Ok(AgencyDetail {
            agency,
            status_counts,
        })
    }

    /// Complaints routed to one agency, most recently assigned first.
    pub fn agency_complaints(
        &mut self,
        request: ListAgencyComplaintsRequest,
    ) -> Result<AgencyComplaintPage, StoreError> {
        if !can_manage_assignments(&request.actor) {
            return Err(StoreError::Forbidden("only agencies may browse agency queues"));
        }

        let mut filter = SqlFilter::new();
        filter.push("ca.agency_no = ?", request.agency_no.get());
        if let Some(status) = request.status {
            filter.push("ca.status = ?", status.as_str().to_string());
        }

        let tx = self.conn.transaction()?;
        ensure_agency_exists(&tx, request.agency_no)?;

        let total: i64 = tx.query_row(
            &format!(
                "SELECT COUNT(*) FROM complaint_agencies ca{}",
                filter.where_sql()
            ),
            params_from_iter(filter.values()),
            |row| row.get(0),
        )?;

        let items = {
            let sql = format!(
                r#"
                SELECT c.complaint_no, c.category, c.title, c.created_at_ms,
                       ca.status, ca.assigned_at_ms, ca.memo, u.display_name
                FROM complaint_agencies ca
                JOIN complaints c ON c.complaint_no = ca.complaint_no
                JOIN users u ON u.user_no = c.user_no{}
                ORDER BY ca.assigned_at_ms DESC, c.complaint_no DESC
                LIMIT ? OFFSET ?
                "#,
                filter.where_sql()
            );
            let values = filter.values_with([
                Value::from(i64::from(request.page.limit())),
                Value::from(to_sqlite_i64(request.page.offset())?),
            ]);
            let mut stmt = tx.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(values.iter()))?;
            let mut items = Vec::new();
            while let Some(row) = rows.next()? {
                items.push(AgencyComplaintRow {
                    complaint_no: complaint_no_from_row(row.get(0)?)?,
                    category: row.get(1)?,
                    title: row.get(2)?,
                    created_at_ms: row.get(3)?,
                    assignment_status: assignment_status_from_row(&row.get::<_, String>(4)?)?,
                    assigned_at_ms: row.get(5)?,
                    memo: row.get(6)?,
                    author_name: row.get(7)?,
                });
            }
            items
        };
        tx.commit()?;

        Ok(AgencyComplaintPage {
            items,
            page: PageInfo::new(request.page, count_from_sqlite(total)),
        })
    }
}
