#![forbid(unsafe_code)]

use cp_core::{AgencyNo, Role, UserNo};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRow {
    pub user_no: UserNo,
    pub login_id: String,
    pub display_name: String,
    pub role: Role,
    pub agency_no: Option<AgencyNo>,
    /// `YYYY-MM-DD`.
    pub birth_date: Option<String>,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub login_id: String,
    pub display_name: String,
    pub role: Role,
    pub agency_no: Option<AgencyNo>,
    pub birth_date: Option<String>,
    pub created_at_ms: i64,
}
