#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::*;
use cp_core::access::can_change_status;
use cp_core::{ComplaintNo, ComplaintStatus, Subject};
use rusqlite::{Transaction, params};

impl SqliteStore {
    /// Agency-side transition along the status state machine. Each accepted
    /// transition appends one history row in the same transaction.
    pub fn change_status(
        &mut self,
        request: ChangeStatusRequest,
    ) -> Result<Vec<StatusHistoryRow>, StoreError> {
        if !can_change_status(&request.actor) {
            return Err(StoreError::Forbidden("only agencies may change complaint status"));
        }
        let memo = optional_text(request.memo.as_deref());

        let tx = self.conn.transaction()?;
        let head = complaint_head(&tx, request.complaint_no)?;
        if !head.status.can_transition_to(request.status) {
            return Err(StoreError::IllegalTransition {
                from: head.status,
                to: request.status,
            });
        }
        ensure_user_exists(&tx, request.actor.user_no)?;

        let completed_at_ms =
            (request.status == ComplaintStatus::Completed).then_some(request.at_ms);
        tx.execute(
            r#"
            UPDATE complaints
            SET status = ?1,
                updated_at_ms = ?2,
                completed_at_ms = COALESCE(?3, completed_at_ms)
            WHERE complaint_no = ?4
            "#,
            params![
                request.status.as_str(),
                request.at_ms,
                completed_at_ms,
                request.complaint_no.get(),
            ],
        )?;
        tx.execute(
            r#"
            INSERT INTO complaint_history(complaint_no, status, memo, user_no, created_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                request.complaint_no.get(),
                request.status.as_str(),
                memo,
                request.actor.user_no.get(),
                request.at_ms,
            ],
        )?;
        let history = load_history_tx(&tx, request.complaint_no)?;
        tx.commit()?;

        tracing::debug!(
            complaint_no = request.complaint_no.get(),
            from = head.status.as_str(),
            to = request.status.as_str(),
            "complaint status changed"
        );
        Ok(history)
    }

    /// Status history, oldest first, under the detail visibility rules.
    pub fn complaint_history(
        &mut self,
        complaint_no: ComplaintNo,
        viewer: Option<&Subject>,
    ) -> Result<Vec<StatusHistoryRow>, StoreError> {
        let tx = self.conn.transaction()?;
        complaint_head(&tx, complaint_no)?.ensure_readable(viewer)?;
        let history = load_history_tx(&tx, complaint_no)?;
        tx.commit()?;
        Ok(history)
    }
}

pub(in crate::store) fn load_history_tx(
    tx: &Transaction<'_>,
    complaint_no: ComplaintNo,
) -> Result<Vec<StatusHistoryRow>, StoreError> {
    let mut stmt = tx.prepare(
        r#"
        SELECT status, memo, user_no, created_at_ms
        FROM complaint_history
        WHERE complaint_no = ?1
        ORDER BY history_no ASC
        "#,
    )?;
    let mut rows = stmt.query(params![complaint_no.get()])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(StatusHistoryRow {
            status: complaint_status_from_row(&row.get::<_, String>(0)?)?,
            memo: row.get(1)?,
            actor_user_no: user_no_from_row(row.get(2)?)?,
            created_at_ms: row.get(3)?,
        });
    }
    Ok(out)
}
