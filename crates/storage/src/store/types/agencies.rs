#![forbid(unsafe_code)]

use cp_core::paging::{PageInfo, PageRequest};
use cp_core::{AgencyNo, AgencyType, AssignmentStatus, ComplaintNo, Subject};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgencyRow {
    pub agency_no: AgencyNo,
    pub agency_type: AgencyType,
    pub agency_name: String,
    pub region_code: Option<String>,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgencyDetail {
    pub agency: AgencyRow,
    /// Assignment counts per sub-status; statuses with no rows are omitted.
    pub status_counts: Vec<(AssignmentStatus, u64)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgencyComplaintRow {
    pub complaint_no: ComplaintNo,
    pub category: String,
    pub title: String,
    pub created_at_ms: i64,
    pub assignment_status: AssignmentStatus,
    pub assigned_at_ms: i64,
    pub memo: Option<String>,
    pub author_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgencyComplaintPage {
    pub items: Vec<AgencyComplaintRow>,
    pub page: PageInfo,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateAgencyRequest {
    pub agency_type: AgencyType,
    pub agency_name: String,
    pub region_code: Option<String>,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListAgencyComplaintsRequest {
    pub agency_no: AgencyNo,
    pub actor: Subject,
    pub status: Option<AssignmentStatus>,
    pub page: PageRequest,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssignAgencyRequest {
    pub complaint_no: ComplaintNo,
    pub agency_no: AgencyNo,
    pub actor: Subject,
    pub memo: Option<String>,
    pub assigned_at_ms: i64,
}

/// `None` fields keep their stored value.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateAssignmentRequest {
    pub complaint_no: ComplaintNo,
    pub agency_no: AgencyNo,
    pub actor: Subject,
    pub status: Option<AssignmentStatus>,
    pub memo: Option<String>,
    pub updated_at_ms: i64,
}
