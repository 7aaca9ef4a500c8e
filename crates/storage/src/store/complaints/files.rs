#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::*;
use super::create::insert_file_tx;
use cp_core::access::can_attach_file;

impl SqliteStore {
    /// Owner-only, append-only; shares the RECEIVED-only mutation window.
    pub fn attach_file(
        &mut self,
        request: AttachFileRequest,
    ) -> Result<ComplaintFileRow, StoreError> {
        let file = NewFile {
            file_url: require_text(&request.file.file_url, "fileUrl must not be empty")?,
            file_type: optional_text(request.file.file_type.as_deref()),
        };

        let tx = self.conn.transaction()?;
        let head = complaint_head(&tx, request.complaint_no)?;
        if !can_attach_file(head.owner, &request.actor) {
            return Err(StoreError::Forbidden("only the owner may attach files"));
        }
        head.ensure_owner_mutable()?;

        let file_no = insert_file_tx(&tx, request.complaint_no, &file, request.uploaded_at_ms)?;
        tx.commit()?;

        tracing::debug!(complaint_no = request.complaint_no.get(), file_no, "file attached");
        Ok(ComplaintFileRow {
            file_no,
            file_url: file.file_url,
            file_type: file.file_type,
            uploaded_at_ms: request.uploaded_at_ms,
        })
    }
}
