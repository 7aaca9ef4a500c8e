#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::*;
use cp_core::geo::GeoPoint;
use cp_core::{ComplaintNo, ComplaintStatus, FeatureType};
use rusqlite::{Transaction, params};

struct ValidatedLocation {
    point: GeoPoint,
    address: String,
}

impl SqliteStore {
    /// Inserts the complaint, its optional spatial feature and any initial files
    /// as one unit. A failure at any step leaves none of them behind.
    pub fn create_complaint(
        &mut self,
        request: CreateComplaintRequest,
    ) -> Result<CreatedComplaint, StoreError> {
        let category = require_text(&request.category, "category must not be empty")?;
        let title = require_text(&request.title, "title must not be empty")?;
        let content = require_text(&request.content, "content must not be empty")?;
        let is_public = request.is_public.unwrap_or(true);

        let location = request
            .location
            .as_ref()
            .map(|location| {
                let point = GeoPoint::try_new(location.lat, location.lng)
                    .map_err(|err| StoreError::InvalidInput(err.message()))?;
                Ok::<_, StoreError>(ValidatedLocation {
                    point,
                    address: optional_text(location.address.as_deref()).unwrap_or_default(),
                })
            })
            .transpose()?;

        let mut files = Vec::with_capacity(request.files.len());
        for file in &request.files {
            files.push(NewFile {
                file_url: require_text(&file.file_url, "fileUrl must not be empty")?,
                file_type: optional_text(file.file_type.as_deref()),
            });
        }

        let tx = self.conn.transaction()?;
        ensure_user_exists(&tx, request.owner.user_no)?;

        tx.execute(
            r#"
            INSERT INTO complaints(user_no, category, title, content, status, is_public, created_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                request.owner.user_no.get(),
                category,
                title,
                content,
                ComplaintStatus::Received.as_str(),
                is_public,
                request.created_at_ms,
            ],
        )?;
        let complaint_no = ComplaintNo::try_new(tx.last_insert_rowid())
            .map_err(|_| StoreError::CorruptRow("complaint_no"))?;

        if let Some(location) = &location {
            tx.execute(
                r#"
                INSERT INTO spatial_features(complaint_no, feature_type, lng, lat, addr_text)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    complaint_no.get(),
                    FeatureType::Point.as_str(),
                    location.point.lng(),
                    location.point.lat(),
                    location.address,
                ],
            )?;
        }

        for file in &files {
            insert_file_tx(&tx, complaint_no, file, request.created_at_ms)?;
        }

        tx.commit()?;
        tracing::debug!(
            complaint_no = complaint_no.get(),
            with_location = location.is_some(),
            files = files.len(),
            "complaint created"
        );

        Ok(CreatedComplaint {
            complaint_no,
            created_at_ms: request.created_at_ms,
        })
    }
}

pub(in crate::store) fn insert_file_tx(
    tx: &Transaction<'_>,
    complaint_no: ComplaintNo,
    file: &NewFile,
    uploaded_at_ms: i64,
) -> Result<i64, StoreError> {
    tx.execute(
        r#"
        INSERT INTO complaint_files(complaint_no, file_url, file_type, uploaded_at_ms)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![
            complaint_no.get(),
            file.file_url,
            file.file_type,
            uploaded_at_ms
        ],
    )?;
    Ok(tx.last_insert_rowid())
}
