#![forbid(unsafe_code)]

use super::super::StoreError;
use super::convert::{complaint_status_from_row, user_no_from_row};
use cp_core::access::{ReadAccess, read_access};
use cp_core::{AgencyNo, ComplaintNo, ComplaintStatus, Subject, UserNo};
use rusqlite::{Connection, OptionalExtension, params};

/// The columns every permission check needs.
#[derive(Clone, Copy, Debug)]
pub(in crate::store) struct ComplaintHead {
    pub(in crate::store) owner: UserNo,
    pub(in crate::store) status: ComplaintStatus,
    pub(in crate::store) is_public: bool,
}

impl ComplaintHead {
    pub(in crate::store) fn ensure_readable(&self, viewer: Option<&Subject>) -> Result<(), StoreError> {
        match read_access(self.is_public, self.owner, viewer) {
            ReadAccess::Granted => Ok(()),
            ReadAccess::Forbidden => Err(StoreError::Forbidden("complaint is private")),
            ReadAccess::Hidden => Err(StoreError::UnknownId),
        }
    }

    pub(in crate::store) fn ensure_owner_mutable(&self) -> Result<(), StoreError> {
        if self.status.is_owner_mutable() {
            Ok(())
        } else {
            Err(StoreError::NotReceived {
                status: self.status,
            })
        }
    }
}

pub(in crate::store) fn complaint_head(
    conn: &Connection,
    complaint_no: ComplaintNo,
) -> Result<ComplaintHead, StoreError> {
    let row = conn
        .query_row(
            "SELECT user_no, status, is_public FROM complaints WHERE complaint_no = ?1",
            params![complaint_no.get()],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, bool>(2)?,
                ))
            },
        )
        .optional()?;

    let Some((owner, status, is_public)) = row else {
        return Err(StoreError::UnknownId);
    };

    Ok(ComplaintHead {
        owner: user_no_from_row(owner)?,
        status: complaint_status_from_row(&status)?,
        is_public,
    })
}

pub(in crate::store) fn ensure_user_exists(
    conn: &Connection,
    user_no: UserNo,
) -> Result<(), StoreError> {
    let exists = conn
        .query_row(
            "SELECT 1 FROM users WHERE user_no = ?1",
            params![user_no.get()],
            |row| row.get::<_, i64>(0),
        )
        .optional()?
        .is_some();
    if exists {
        Ok(())
    } else {
        Err(StoreError::UnknownUser)
    }
}

pub(in crate::store) fn ensure_agency_exists(
    conn: &Connection,
    agency_no: AgencyNo,
) -> Result<(), StoreError> {
    let exists = conn
        .query_row(
            "SELECT 1 FROM agencies WHERE agency_no = ?1",
            params![agency_no.get()],
            |row| row.get::<_, i64>(0),
        )
        .optional()?
        .is_some();
    if exists {
        Ok(())
    } else {
        Err(StoreError::UnknownAgency)
    }
}
