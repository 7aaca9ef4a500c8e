#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::*;
use cp_core::FeatureType;
use rusqlite::params;

pub const MAP_LOCATION_LIMIT: u32 = 1000;

impl SqliteStore {
    /// Most recent public complaints carrying a point feature.
    pub fn map_locations(&self) -> Result<Vec<MapLocation>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT c.complaint_no, c.category, c.title, c.status, sf.addr_text, sf.lat, sf.lng
            FROM complaints c
            JOIN spatial_features sf ON sf.complaint_no = c.complaint_no
            WHERE c.is_public = 1 AND sf.feature_type = ?1
            ORDER BY c.created_at_ms DESC, c.complaint_no DESC
            LIMIT ?2
            "#,
        )?;
        let mut rows = stmt.query(params![
            FeatureType::Point.as_str(),
            i64::from(MAP_LOCATION_LIMIT)
        ])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(MapLocation {
                complaint_no: complaint_no_from_row(row.get(0)?)?,
                category: row.get(1)?,
                title: row.get(2)?,
                status: complaint_status_from_row(&row.get::<_, String>(3)?)?,
                address: row.get(4)?,
                lat: row.get(5)?,
                lng: row.get(6)?,
            });
        }
        Ok(out)
    }
}
