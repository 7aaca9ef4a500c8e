#![forbid(unsafe_code)]

use cp_core::ComplaintStatus;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("unknown id")]
    UnknownId,
    #[error("unknown agency")]
    UnknownAgency,
    #[error("unknown user")]
    UnknownUser,
    #[error("forbidden: {0}")]
    Forbidden(&'static str),
    #[error("complaint is {}, not RECEIVED", .status.as_str())]
    NotReceived { status: ComplaintStatus },
    #[error("illegal status transition ({} -> {})", .from.as_str(), .to.as_str())]
    IllegalTransition {
        from: ComplaintStatus,
        to: ComplaintStatus,
    },
    #[error("agency is not assigned to this complaint")]
    UnknownAssignment,
    #[error("agency is already assigned to this complaint")]
    AlreadyAssigned,
    #[error("login id already exists")]
    LoginTaken,
    #[error("corrupt row: {0}")]
    CorruptRow(&'static str),
}
