#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::*;
use cp_core::access::can_manage_assignments;
use cp_core::{AgencyNo, AssignmentStatus, ComplaintNo, Subject};
use rusqlite::{Transaction, params};

fn ensure_ledger_actor(actor: &Subject) -> Result<(), StoreError> {
    if can_manage_assignments(actor) {
        Ok(())
    } else {
        Err(StoreError::Forbidden("only agencies may manage assignments"))
    }
}

fn assignment_tx(
    tx: &Transaction<'_>,
    complaint_no: ComplaintNo,
    agency_no: AgencyNo,
) -> Result<AgencyAssignmentRow, StoreError> {
    let mut stmt = tx.prepare(
        r#"
        SELECT a.agency_name, a.agency_type, ca.status, ca.assigned_at_ms, ca.updated_at_ms, ca.memo
        FROM complaint_agencies ca
        JOIN agencies a ON a.agency_no = ca.agency_no
        WHERE ca.complaint_no = ?1 AND ca.agency_no = ?2
        "#,
    )?;
    let mut rows = stmt.query(params![complaint_no.get(), agency_no.get()])?;
    let Some(row) = rows.next()? else {
        return Err(StoreError::UnknownAssignment);
    };
    Ok(AgencyAssignmentRow {
        agency_no,
        agency_name: row.get(0)?,
        agency_type: agency_type_from_row(&row.get::<_, String>(1)?)?,
        status: assignment_status_from_row(&row.get::<_, String>(2)?)?,
        assigned_at_ms: row.get(3)?,
        updated_at_ms: row.get(4)?,
        memo: row.get(5)?,
    })
}

impl SqliteStore {
    /// Routes a complaint to an agency. The assignment starts as RECEIVED and
    /// never touches the complaint's own status.
    pub fn assign_agency(
        &mut self,
        request: AssignAgencyRequest,
    ) -> Result<AgencyAssignmentRow, StoreError> {
        ensure_ledger_actor(&request.actor)?;
        let memo = optional_text(request.memo.as_deref());

        let tx = self.conn.transaction()?;
        complaint_head(&tx, request.complaint_no)?;
        ensure_agency_exists(&tx, request.agency_no)?;

        let inserted = tx.execute(
            r#"
            INSERT INTO complaint_agencies(complaint_no, agency_no, status, memo, assigned_at_ms, updated_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            "#,
            params![
                request.complaint_no.get(),
                request.agency_no.get(),
                AssignmentStatus::Received.as_str(),
                memo,
                request.assigned_at_ms,
            ],
        );
        match inserted {
            Ok(_) => {}
            Err(err) if is_constraint_violation(&err) => return Err(StoreError::AlreadyAssigned),
            Err(err) => return Err(err.into()),
        }

        let row = assignment_tx(&tx, request.complaint_no, request.agency_no)?;
        tx.commit()?;

        tracing::debug!(
            complaint_no = request.complaint_no.get(),
            agency_no = request.agency_no.get(),
            "agency assigned"
        );
        Ok(row)
    }

    /// Moves one assignment's sub-status and/or memo.
    pub fn update_assignment(
        &mut self,
        request: UpdateAssignmentRequest,
    ) -> Result<AgencyAssignmentRow, StoreError> {
        ensure_ledger_actor(&request.actor)?;
        let memo = optional_text(request.memo.as_deref());

        let tx = self.conn.transaction()?;
        complaint_head(&tx, request.complaint_no)?;
        ensure_agency_exists(&tx, request.agency_no)?;

        let changed = tx.execute(
            r#"
            UPDATE complaint_agencies
            SET status = COALESCE(?1, status),
                memo = COALESCE(?2, memo),
                updated_at_ms = ?3
            WHERE complaint_no = ?4 AND agency_no = ?5
            "#,
            params![
                request.status.map(AssignmentStatus::as_str),
                memo,
                request.updated_at_ms,
                request.complaint_no.get(),
                request.agency_no.get(),
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownAssignment);
        }

        let row = assignment_tx(&tx, request.complaint_no, request.agency_no)?;
        tx.commit()?;

        tracing::debug!(
            complaint_no = request.complaint_no.get(),
            agency_no = request.agency_no.get(),
            status = row.status.as_str(),
            "assignment updated"
        );
        Ok(row)
    }
}
