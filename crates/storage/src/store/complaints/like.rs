#![forbid(unsafe_code)]

use super::super::support::*;
use super::super::*;
use rusqlite::params;

impl SqliteStore {
    /// Flips the (complaint, actor) like. At most one row exists per pair.
    pub fn toggle_like(&mut self, request: ToggleLikeRequest) -> Result<LikeToggle, StoreError> {
        let tx = self.conn.transaction()?;
        complaint_head(&tx, request.complaint_no)?.ensure_readable(Some(&request.actor))?;
        ensure_user_exists(&tx, request.actor.user_no)?;

        let complaint_no = request.complaint_no.get();
        let user_no = request.actor.user_no.get();
        let removed = tx.execute(
            "DELETE FROM post_likes WHERE complaint_no = ?1 AND user_no = ?2",
            params![complaint_no, user_no],
        )?;
        let liked = removed == 0;
        if liked {
            tx.execute(
                "INSERT INTO post_likes(complaint_no, user_no, created_at_ms) VALUES (?1, ?2, ?3)",
                params![complaint_no, user_no, request.at_ms],
            )?;
        }

        let like_count: i64 = tx.query_row(
            "SELECT COUNT(*) FROM post_likes WHERE complaint_no = ?1",
            params![complaint_no],
            |row| row.get(0),
        )?;
        tx.commit()?;

        tracing::debug!(complaint_no, liked, "like toggled");
        Ok(LikeToggle {
            liked,
            like_count: count_from_sqlite(like_count),
        })
    }
}
