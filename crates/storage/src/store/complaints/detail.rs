#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::*;
use super::status::load_history_tx;
use cp_core::geo::GeoPoint;
use cp_core::{ComplaintNo, Subject};
use rusqlite::{OptionalExtension, Transaction, params};

impl SqliteStore {
    /// Full record with location, files, replies, assignments and history,
    /// read from one transaction.
    pub fn get_complaint(
        &mut self,
        complaint_no: ComplaintNo,
        viewer: Option<&Subject>,
    ) -> Result<ComplaintDetail, StoreError> {
        let tx = self.conn.transaction()?;
        complaint_head(&tx, complaint_no)?.ensure_readable(viewer)?;

        let detail = ComplaintDetail {
            location: load_location_tx(&tx, complaint_no)?,
            files: load_files_tx(&tx, complaint_no)?,
            replies: load_replies_tx(&tx, complaint_no)?,
            agencies: load_assignments_tx(&tx, complaint_no)?,
            history: load_history_tx(&tx, complaint_no)?,
            ..load_core_tx(&tx, complaint_no)?
        };
        tx.commit()?;
        Ok(detail)
    }
}

fn load_core_tx(
    tx: &Transaction<'_>,
    complaint_no: ComplaintNo,
) -> Result<ComplaintDetail, StoreError> {
    let row = tx
        .query_row(
            r#"
            SELECT c.category, c.title, c.content, c.status, c.is_public,
                   c.created_at_ms, c.updated_at_ms, c.completed_at_ms, u.display_name,
                   (SELECT COUNT(*) FROM post_likes l WHERE l.complaint_no = c.complaint_no)
            FROM complaints c
            JOIN users u ON u.user_no = c.user_no
            WHERE c.complaint_no = ?1
            "#,
            params![complaint_no.get()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, bool>(4)?,
                    row.get::<_, i64>(5)?,
                    row.get::<_, Option<i64>>(6)?,
                    row.get::<_, Option<i64>>(7)?,
                    row.get::<_, String>(8)?,
                    row.get::<_, i64>(9)?,
                ))
            },
        )
        .optional()?;

    let Some((
        category,
        title,
        content,
        status,
        is_public,
        created_at_ms,
        updated_at_ms,
        completed_at_ms,
        author_name,
        like_count,
    )) = row
    else {
        return Err(StoreError::UnknownId);
    };

    Ok(ComplaintDetail {
        complaint_no,
        category,
        title,
        content,
        status: complaint_status_from_row(&status)?,
        is_public,
        created_at_ms,
        updated_at_ms,
        completed_at_ms,
        author_name,
        like_count: count_from_sqlite(like_count),
        location: None,
        files: Vec::new(),
        replies: Vec::new(),
        agencies: Vec::new(),
        history: Vec::new(),
    })
}

fn load_location_tx(
    tx: &Transaction<'_>,
    complaint_no: ComplaintNo,
) -> Result<Option<SpatialFeatureRow>, StoreError> {
    let row = tx
        .query_row(
            "SELECT feature_type, lat, lng, addr_text FROM spatial_features WHERE complaint_no = ?1",
            params![complaint_no.get()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;

    let Some((feature_type, lat, lng, address)) = row else {
        return Ok(None);
    };
    let point =
        GeoPoint::try_new(lat, lng).map_err(|_| StoreError::CorruptRow("spatial feature"))?;
    Ok(Some(SpatialFeatureRow {
        feature_type: feature_type_from_row(&feature_type)?,
        point,
        address,
    }))
}

fn load_files_tx(
    tx: &Transaction<'_>,
    complaint_no: ComplaintNo,
) -> Result<Vec<ComplaintFileRow>, StoreError> {
    let mut stmt = tx.prepare(
        r#"
        SELECT file_no, file_url, file_type, uploaded_at_ms
        FROM complaint_files
        WHERE complaint_no = ?1
        ORDER BY file_no ASC
        "#,
    )?;
    let mut rows = stmt.query(params![complaint_no.get()])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(ComplaintFileRow {
            file_no: row.get(0)?,
            file_url: row.get(1)?,
            file_type: row.get(2)?,
            uploaded_at_ms: row.get(3)?,
        });
    }
    Ok(out)
}

fn load_replies_tx(
    tx: &Transaction<'_>,
    complaint_no: ComplaintNo,
) -> Result<Vec<ComplaintReplyRow>, StoreError> {
    let mut stmt = tx.prepare(
        r#"
        SELECT r.reply_no, u.display_name, u.role, r.content, r.created_at_ms
        FROM complaint_replies r
        JOIN users u ON u.user_no = r.user_no
        WHERE r.complaint_no = ?1
        ORDER BY r.created_at_ms ASC, r.reply_no ASC
        "#,
    )?;
    let mut rows = stmt.query(params![complaint_no.get()])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(ComplaintReplyRow {
            reply_no: row.get(0)?,
            author_name: row.get(1)?,
            author_role: role_from_row(&row.get::<_, String>(2)?)?,
            content: row.get(3)?,
            created_at_ms: row.get(4)?,
        });
    }
    Ok(out)
}

pub(in crate::store) fn load_assignments_tx(
    tx: &Transaction<'_>,
    complaint_no: ComplaintNo,
) -> Result<Vec<AgencyAssignmentRow>, StoreError> {
    let mut stmt = tx.prepare(
        r#"
        SELECT ca.agency_no, a.agency_name, a.agency_type, ca.status,
               ca.assigned_at_ms, ca.updated_at_ms, ca.memo
        FROM complaint_agencies ca
        JOIN agencies a ON a.agency_no = ca.agency_no
        WHERE ca.complaint_no = ?1
        ORDER BY ca.assigned_at_ms ASC, ca.agency_no ASC
        "#,
    )?;
    let mut rows = stmt.query(params![complaint_no.get()])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(AgencyAssignmentRow {
            agency_no: agency_no_from_row(row.get(0)?)?,
            agency_name: row.get(1)?,
            agency_type: agency_type_from_row(&row.get::<_, String>(2)?)?,
            status: assignment_status_from_row(&row.get::<_, String>(3)?)?,
            assigned_at_ms: row.get(4)?,
            updated_at_ms: row.get(5)?,
            memo: row.get(6)?,
        });
    }
    Ok(out)
}
