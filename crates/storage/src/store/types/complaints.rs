#![forbid(unsafe_code)]

use cp_core::geo::GeoPoint;
use cp_core::paging::{PageInfo, PageRequest};
use cp_core::{AgencyNo, AgencyType, AssignmentStatus, ComplaintNo, ComplaintStatus, FeatureType};
use cp_core::{Role, Subject, UserNo};

#[derive(Clone, Debug, PartialEq)]
pub struct ComplaintSummary {
    pub complaint_no: ComplaintNo,
    pub category: String,
    pub title: String,
    pub status: ComplaintStatus,
    pub is_public: bool,
    pub created_at_ms: i64,
    pub author_name: String,
    pub like_count: u64,
    pub reply_count: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComplaintPage {
    pub items: Vec<ComplaintSummary>,
    pub page: PageInfo,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpatialFeatureRow {
    pub feature_type: FeatureType,
    pub point: GeoPoint,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplaintFileRow {
    pub file_no: i64,
    pub file_url: String,
    pub file_type: Option<String>,
    pub uploaded_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplaintReplyRow {
    pub reply_no: i64,
    pub author_name: String,
    pub author_role: Role,
    pub content: String,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgencyAssignmentRow {
    pub agency_no: AgencyNo,
    pub agency_name: String,
    pub agency_type: AgencyType,
    pub status: AssignmentStatus,
    pub assigned_at_ms: i64,
    pub updated_at_ms: i64,
    pub memo: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusHistoryRow {
    pub status: ComplaintStatus,
    pub memo: Option<String>,
    pub actor_user_no: UserNo,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComplaintDetail {
    pub complaint_no: ComplaintNo,
    pub category: String,
    pub title: String,
    pub content: String,
    pub status: ComplaintStatus,
    pub is_public: bool,
    pub created_at_ms: i64,
    pub updated_at_ms: Option<i64>,
    pub completed_at_ms: Option<i64>,
    pub author_name: String,
    pub like_count: u64,
    pub location: Option<SpatialFeatureRow>,
    pub files: Vec<ComplaintFileRow>,
    pub replies: Vec<ComplaintReplyRow>,
    pub agencies: Vec<AgencyAssignmentRow>,
    pub history: Vec<StatusHistoryRow>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapLocation {
    pub complaint_no: ComplaintNo,
    pub category: String,
    pub title: String,
    pub status: ComplaintStatus,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreatedComplaint {
    pub complaint_no: ComplaintNo,
    pub created_at_ms: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LikeToggle {
    pub liked: bool,
    pub like_count: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LocationInput {
    pub lat: f64,
    pub lng: f64,
    pub address: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewFile {
    pub file_url: String,
    pub file_type: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListComplaintsRequest {
    pub viewer: Option<Subject>,
    pub status: Option<ComplaintStatus>,
    pub category: Option<String>,
    /// Keyword matched against title and content.
    pub search: Option<String>,
    /// Address prefix of the complaint's location.
    pub region: Option<String>,
    pub page: PageRequest,
}

/// The owner's own complaints, private ones included.
#[derive(Clone, Debug, PartialEq)]
pub struct MyComplaintsRequest {
    pub owner: Subject,
    pub page: PageRequest,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CreateComplaintRequest {
    pub owner: Subject,
    pub category: String,
    pub title: String,
    pub content: String,
    pub is_public: Option<bool>,
    pub location: Option<LocationInput>,
    pub files: Vec<NewFile>,
    pub created_at_ms: i64,
}

/// Partial patch: `None` keeps the stored value.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateComplaintRequest {
    pub complaint_no: ComplaintNo,
    pub actor: Subject,
    pub category: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_public: Option<bool>,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeleteComplaintRequest {
    pub complaint_no: ComplaintNo,
    pub actor: Subject,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToggleLikeRequest {
    pub complaint_no: ComplaintNo,
    pub actor: Subject,
    pub at_ms: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChangeStatusRequest {
    pub complaint_no: ComplaintNo,
    pub actor: Subject,
    pub status: ComplaintStatus,
    pub memo: Option<String>,
    pub at_ms: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AddReplyRequest {
    pub complaint_no: ComplaintNo,
    pub actor: Subject,
    pub content: String,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AttachFileRequest {
    pub complaint_no: ComplaintNo,
    pub actor: Subject,
    pub file: NewFile,
    pub uploaded_at_ms: i64,
}
