#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::*;
use cp_core::access::can_delete;
use rusqlite::params;

const DEPENDENT_TABLES: [&str; 6] = [
    "post_likes",
    "complaint_replies",
    "complaint_files",
    "complaint_history",
    "complaint_agencies",
    "spatial_features",
];

impl SqliteStore {
    /// Removes a RECEIVED complaint together with every dependent row.
    pub fn delete_complaint(&mut self, request: DeleteComplaintRequest) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        let head = complaint_head(&tx, request.complaint_no)?;
        if !can_delete(head.owner, &request.actor) {
            return Err(StoreError::Forbidden("not allowed to delete this complaint"));
        }
        head.ensure_owner_mutable()?;

        let complaint_no = request.complaint_no.get();
        for table in DEPENDENT_TABLES {
            tx.execute(
                &format!("DELETE FROM {table} WHERE complaint_no = ?1"),
                params![complaint_no],
            )?;
        }
        tx.execute(
            "DELETE FROM complaints WHERE complaint_no = ?1",
            params![complaint_no],
        )?;
        tx.commit()?;

        tracing::debug!(
            complaint_no,
            by_owner = request.actor.is_owner_of(head.owner),
            "complaint deleted"
        );
        Ok(())
    }
}
