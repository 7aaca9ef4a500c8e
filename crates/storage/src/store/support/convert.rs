#![forbid(unsafe_code)]

use super::super::StoreError;
use cp_core::{
    AgencyNo, AgencyType, AssignmentStatus, ComplaintNo, ComplaintStatus, FeatureType, Role,
    UserNo,
};
use rusqlite::ErrorCode;

pub(in crate::store) fn to_sqlite_i64<T: TryInto<i64>>(value: T) -> Result<i64, StoreError> {
    value
        .try_into()
        .map_err(|_| StoreError::InvalidInput("numeric overflow"))
}

pub(in crate::store) fn count_from_sqlite(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

pub(in crate::store) fn complaint_no_from_row(value: i64) -> Result<ComplaintNo, StoreError> {
    ComplaintNo::try_new(value).map_err(|_| StoreError::CorruptRow("complaint_no"))
}

pub(in crate::store) fn user_no_from_row(value: i64) -> Result<UserNo, StoreError> {
    UserNo::try_new(value).map_err(|_| StoreError::CorruptRow("user_no"))
}

pub(in crate::store) fn agency_no_from_row(value: i64) -> Result<AgencyNo, StoreError> {
    AgencyNo::try_new(value).map_err(|_| StoreError::CorruptRow("agency_no"))
}

pub(in crate::store) fn complaint_status_from_row(
    value: &str,
) -> Result<ComplaintStatus, StoreError> {
    ComplaintStatus::parse(value).ok_or(StoreError::CorruptRow("complaint status"))
}

pub(in crate::store) fn assignment_status_from_row(
    value: &str,
) -> Result<AssignmentStatus, StoreError> {
    AssignmentStatus::parse(value).ok_or(StoreError::CorruptRow("assignment status"))
}

pub(in crate::store) fn role_from_row(value: &str) -> Result<Role, StoreError> {
    Role::parse(value).ok_or(StoreError::CorruptRow("role"))
}

pub(in crate::store) fn agency_type_from_row(value: &str) -> Result<AgencyType, StoreError> {
    AgencyType::parse(value).ok_or(StoreError::CorruptRow("agency type"))
}

pub(in crate::store) fn feature_type_from_row(value: &str) -> Result<FeatureType, StoreError> {
    FeatureType::parse(value).ok_or(StoreError::CorruptRow("feature type"))
}

/// Trimmed copy of a required text field, or the given error when blank.
pub(in crate::store) fn require_text(
    value: &str,
    message: &'static str,
) -> Result<String, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidInput(message));
    }
    Ok(trimmed.to_string())
}

pub(in crate::store) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub(in crate::store) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, message) => {
            code.code == ErrorCode::ConstraintViolation
                || message.as_deref().is_some_and(|value| {
                    value.contains("UNIQUE constraint failed")
                        || value.contains("PRIMARY KEY constraint failed")
                })
        }
        _ => false,
    }
}
