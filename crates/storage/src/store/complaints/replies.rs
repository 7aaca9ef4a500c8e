#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::*;
use cp_core::access::can_reply;
use rusqlite::params;

impl SqliteStore {
    pub fn add_reply(&mut self, request: AddReplyRequest) -> Result<ComplaintReplyRow, StoreError> {
        let content = require_text(&request.content, "content must not be empty")?;

        let tx = self.conn.transaction()?;
        let head = complaint_head(&tx, request.complaint_no)?;
        if !can_reply(head.owner, &request.actor) {
            return Err(StoreError::Forbidden("only the owner or an agency may reply"));
        }
        ensure_user_exists(&tx, request.actor.user_no)?;

        tx.execute(
            r#"
            INSERT INTO complaint_replies(complaint_no, user_no, content, created_at_ms)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                request.complaint_no.get(),
                request.actor.user_no.get(),
                content,
                request.created_at_ms,
            ],
        )?;
        let reply_no = tx.last_insert_rowid();
        let author_name: String = tx.query_row(
            "SELECT display_name FROM users WHERE user_no = ?1",
            params![request.actor.user_no.get()],
            |row| row.get(0),
        )?;
        tx.commit()?;

        tracing::debug!(complaint_no = request.complaint_no.get(), reply_no, "reply added");
        Ok(ComplaintReplyRow {
            reply_no,
            author_name,
            author_role: request.actor.role,
            content,
            created_at_ms: request.created_at_ms,
        })
    }
}
