#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::*;
use cp_core::access::can_update;
use rusqlite::params;

fn patch_text(value: Option<&str>, message: &'static str) -> Result<Option<String>, StoreError> {
    value.map(|value| require_text(value, message)).transpose()
}

impl SqliteStore {
    /// Owner-only partial edit while the complaint is still RECEIVED.
    pub fn update_complaint(&mut self, request: UpdateComplaintRequest) -> Result<(), StoreError> {
        let category = patch_text(request.category.as_deref(), "category must not be empty")?;
        let title = patch_text(request.title.as_deref(), "title must not be empty")?;
        let content = patch_text(request.content.as_deref(), "content must not be empty")?;

        let tx = self.conn.transaction()?;
        let head = complaint_head(&tx, request.complaint_no)?;
        if !can_update(head.owner, &request.actor) {
            return Err(StoreError::Forbidden("only the owner may edit a complaint"));
        }
        head.ensure_owner_mutable()?;

        tx.execute(
            r#"
            UPDATE complaints
            SET category = COALESCE(?1, category),
                title = COALESCE(?2, title),
                content = COALESCE(?3, content),
                is_public = COALESCE(?4, is_public),
                updated_at_ms = ?5
            WHERE complaint_no = ?6
            "#,
            params![
                category,
                title,
                content,
                request.is_public,
                request.updated_at_ms,
                request.complaint_no.get(),
            ],
        )?;
        tx.commit()?;

        tracing::debug!(complaint_no = request.complaint_no.get(), "complaint updated");
        Ok(())
    }
}
