#![forbid(unsafe_code)]
//! Wire shapes for the HTTP surface. Field names are camelCase and
//! timestamps are RFC 3339 strings in UTC.

use crate::support::ts_ms_to_rfc3339;
use cp_core::paging::PageInfo;
use cp_core::stats::{GrowthRate, NamedCount, RankedCount, most_common};
use cp_storage::{
    AgeGroupCount, AgencyAssignmentRow, AgencyComplaintPage, AgencyComplaintRow, AgencyDetail,
    AgencyRow, ComplaintDetail, ComplaintFileRow, ComplaintPage, ComplaintReplyRow,
    ComplaintSummary, CreatedComplaint, Dashboard, DistributionStats, LikeToggle, MapLocation,
    PeriodComparison, SpatialFeatureRow, StatusCounts, StatusHistoryRow, SummaryCounters,
    TrendPoint,
};
use serde::{Deserialize, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListComplaintsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopLikedQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationBody {
    pub lat: f64,
    pub lng: f64,
    pub address: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileBody {
    #[serde(default)]
    pub file_url: String,
    pub file_type: Option<String>,
}

/// Missing text fields arrive as empty strings and fail store validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaintBody {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub is_public: Option<bool>,
    pub location: Option<LocationBody>,
    #[serde(default)]
    pub files: Vec<FileBody>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComplaintBody {
    pub category: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusBody {
    pub status: String,
    pub memo: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyBody {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignAgencyBody {
    pub agency_no: i64,
    pub memo: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignmentBody {
    pub status: Option<String>,
    pub memo: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AgencyListQuery {
    #[serde(rename = "type")]
    pub agency_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyComplaintsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub category: Option<String>,
    pub agency_no: Option<i64>,
    pub time_basis: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionQuery {
    #[serde(rename = "type")]
    pub dimension: Option<String>,
    pub category: Option<String>,
    pub agency_no: Option<i64>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct MessageDto {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub page: u32,
    pub limit: u32,
    pub total_count: u64,
    pub total_pages: u64,
}

impl From<PageInfo> for PaginationDto {
    fn from(page: PageInfo) -> Self {
        Self {
            page: page.page,
            limit: page.limit,
            total_count: page.total_count,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintSummaryDto {
    pub complaint_no: i64,
    pub category: String,
    pub title: String,
    pub status: &'static str,
    pub is_public: bool,
    pub created_at: String,
    pub author_name: String,
    pub like_count: u64,
    pub reply_count: u64,
}

impl From<ComplaintSummary> for ComplaintSummaryDto {
    fn from(row: ComplaintSummary) -> Self {
        Self {
            complaint_no: row.complaint_no.get(),
            category: row.category,
            title: row.title,
            status: row.status.as_str(),
            is_public: row.is_public,
            created_at: ts_ms_to_rfc3339(row.created_at_ms),
            author_name: row.author_name,
            like_count: row.like_count,
            reply_count: row.reply_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ComplaintListDto {
    pub items: Vec<ComplaintSummaryDto>,
    pub pagination: PaginationDto,
}

impl From<ComplaintPage> for ComplaintListDto {
    fn from(page: ComplaintPage) -> Self {
        Self {
            items: page.items.into_iter().map(Into::into).collect(),
            pagination: page.page.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    pub feature_type: &'static str,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    /// `[lng, lat]`.
    pub coordinates: [f64; 2],
}

impl From<SpatialFeatureRow> for LocationDto {
    fn from(row: SpatialFeatureRow) -> Self {
        Self {
            feature_type: row.feature_type.as_str(),
            address: row.address,
            lat: row.point.lat(),
            lng: row.point.lng(),
            coordinates: row.point.coordinates(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDto {
    pub file_no: i64,
    pub file_url: String,
    pub file_type: Option<String>,
    pub uploaded_at: String,
}

impl From<ComplaintFileRow> for FileDto {
    fn from(row: ComplaintFileRow) -> Self {
        Self {
            file_no: row.file_no,
            file_url: row.file_url,
            file_type: row.file_type,
            uploaded_at: ts_ms_to_rfc3339(row.uploaded_at_ms),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyDto {
    pub reply_no: i64,
    pub author_name: String,
    pub author_role: &'static str,
    pub content: String,
    pub created_at: String,
}

impl From<ComplaintReplyRow> for ReplyDto {
    fn from(row: ComplaintReplyRow) -> Self {
        Self {
            reply_no: row.reply_no,
            author_name: row.author_name,
            author_role: row.author_role.as_str(),
            content: row.content,
            created_at: ts_ms_to_rfc3339(row.created_at_ms),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDto {
    pub agency_no: i64,
    pub agency_name: String,
    pub agency_type: &'static str,
    pub status: &'static str,
    pub assigned_at: String,
    pub updated_at: String,
    pub memo: Option<String>,
}

impl From<AgencyAssignmentRow> for AssignmentDto {
    fn from(row: AgencyAssignmentRow) -> Self {
        Self {
            agency_no: row.agency_no.get(),
            agency_name: row.agency_name,
            agency_type: row.agency_type.as_str(),
            status: row.status.as_str(),
            assigned_at: ts_ms_to_rfc3339(row.assigned_at_ms),
            updated_at: ts_ms_to_rfc3339(row.updated_at_ms),
            memo: row.memo,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryDto {
    pub status: &'static str,
    pub memo: Option<String>,
    pub actor_user_no: i64,
    pub created_at: String,
}

impl From<StatusHistoryRow> for HistoryDto {
    fn from(row: StatusHistoryRow) -> Self {
        Self {
            status: row.status.as_str(),
            memo: row.memo,
            actor_user_no: row.actor_user_no.get(),
            created_at: ts_ms_to_rfc3339(row.created_at_ms),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintDetailDto {
    pub complaint_no: i64,
    pub category: String,
    pub title: String,
    pub content: String,
    pub status: &'static str,
    pub is_public: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub completed_date: Option<String>,
    pub author_name: String,
    pub like_count: u64,
    pub location: Option<LocationDto>,
    pub files: Vec<FileDto>,
    pub replies: Vec<ReplyDto>,
    pub agencies: Vec<AssignmentDto>,
    pub history: Vec<HistoryDto>,
}

impl From<ComplaintDetail> for ComplaintDetailDto {
    fn from(detail: ComplaintDetail) -> Self {
        Self {
            complaint_no: detail.complaint_no.get(),
            category: detail.category,
            title: detail.title,
            content: detail.content,
            status: detail.status.as_str(),
            is_public: detail.is_public,
            created_at: ts_ms_to_rfc3339(detail.created_at_ms),
            updated_at: detail.updated_at_ms.map(ts_ms_to_rfc3339),
            completed_date: detail.completed_at_ms.map(ts_ms_to_rfc3339),
            author_name: detail.author_name,
            like_count: detail.like_count,
            location: detail.location.map(Into::into),
            files: detail.files.into_iter().map(Into::into).collect(),
            replies: detail.replies.into_iter().map(Into::into).collect(),
            agencies: detail.agencies.into_iter().map(Into::into).collect(),
            history: detail.history.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedDto {
    pub complaint_no: i64,
    pub created_at: String,
}

impl From<CreatedComplaint> for CreatedDto {
    fn from(created: CreatedComplaint) -> Self {
        Self {
            complaint_no: created.complaint_no.get(),
            created_at: ts_ms_to_rfc3339(created.created_at_ms),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeDto {
    pub liked: bool,
    pub like_count: u64,
}

impl From<LikeToggle> for LikeDto {
    fn from(toggle: LikeToggle) -> Self {
        Self {
            liked: toggle.liked,
            like_count: toggle.like_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapLocationDto {
    pub complaint_no: i64,
    pub category: String,
    pub title: String,
    pub status: &'static str,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

impl From<MapLocation> for MapLocationDto {
    fn from(row: MapLocation) -> Self {
        Self {
            complaint_no: row.complaint_no.get(),
            category: row.category,
            title: row.title,
            status: row.status.as_str(),
            address: row.address,
            lat: row.lat,
            lng: row.lng,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyDto {
    pub agency_no: i64,
    pub agency_type: &'static str,
    pub agency_name: String,
    pub region_code: Option<String>,
    pub created_at: String,
}

impl From<AgencyRow> for AgencyDto {
    fn from(row: AgencyRow) -> Self {
        Self {
            agency_no: row.agency_no.get(),
            agency_type: row.agency_type.as_str(),
            agency_name: row.agency_name,
            region_code: row.region_code,
            created_at: ts_ms_to_rfc3339(row.created_at_ms),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusCountDto {
    pub status: &'static str,
    pub count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyDetailDto {
    #[serde(flatten)]
    pub agency: AgencyDto,
    pub status_counts: Vec<StatusCountDto>,
}

impl From<AgencyDetail> for AgencyDetailDto {
    fn from(detail: AgencyDetail) -> Self {
        Self {
            agency: detail.agency.into(),
            status_counts: detail
                .status_counts
                .into_iter()
                .map(|(status, count)| StatusCountDto {
                    status: status.as_str(),
                    count,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyComplaintDto {
    pub complaint_no: i64,
    pub category: String,
    pub title: String,
    pub created_at: String,
    pub assignment_status: &'static str,
    pub assigned_at: String,
    pub memo: Option<String>,
    pub author_name: String,
}

impl From<AgencyComplaintRow> for AgencyComplaintDto {
    fn from(row: AgencyComplaintRow) -> Self {
        Self {
            complaint_no: row.complaint_no.get(),
            category: row.category,
            title: row.title,
            created_at: ts_ms_to_rfc3339(row.created_at_ms),
            assignment_status: row.assignment_status.as_str(),
            assigned_at: ts_ms_to_rfc3339(row.assigned_at_ms),
            memo: row.memo,
            author_name: row.author_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AgencyComplaintListDto {
    pub items: Vec<AgencyComplaintDto>,
    pub pagination: PaginationDto,
}

impl From<AgencyComplaintPage> for AgencyComplaintListDto {
    fn from(page: AgencyComplaintPage) -> Self {
        Self {
            items: page.items.into_iter().map(Into::into).collect(),
            pagination: page.page.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// A growth rate on the wire: a number with one decimal, or `"new"` when the
/// baseline was zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthDto(pub GrowthRate);

impl Serialize for GrowthDto {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            GrowthRate::Percent(value) => serializer.serialize_f64(value),
            GrowthRate::New => serializer.serialize_str("new"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RankedDto {
    pub rank: u32,
    pub name: String,
    pub value: u64,
}

impl From<RankedCount> for RankedDto {
    fn from(row: RankedCount) -> Self {
        Self {
            rank: row.rank,
            name: row.name,
            value: row.value,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NamedCountDto {
    pub name: String,
    pub value: u64,
}

impl From<&NamedCount> for NamedCountDto {
    fn from(row: &NamedCount) -> Self {
        Self {
            name: row.name.clone(),
            value: row.value,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionDto {
    #[serde(rename = "type")]
    pub dimension: &'static str,
    pub items: Vec<NamedCountDto>,
    pub most_common: Option<NamedCountDto>,
}

impl From<DistributionStats> for DistributionDto {
    fn from(stats: DistributionStats) -> Self {
        Self {
            dimension: stats.dimension.as_str(),
            most_common: most_common(&stats.items).map(Into::into),
            items: stats.items.iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPointDto {
    pub bucket: String,
    pub count: u64,
    pub growth_rate: Option<GrowthDto>,
}

impl From<TrendPoint> for TrendPointDto {
    fn from(point: TrendPoint) -> Self {
        Self {
            bucket: point.bucket,
            count: point.count,
            growth_rate: point.growth.map(GrowthDto),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDto {
    pub current: u64,
    pub previous: u64,
    pub growth_rate: GrowthDto,
}

impl From<PeriodComparison> for PeriodDto {
    fn from(period: PeriodComparison) -> Self {
        Self {
            current: period.current,
            previous: period.previous,
            growth_rate: GrowthDto(period.growth),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryDto {
    pub today: PeriodDto,
    pub month: PeriodDto,
    pub year: PeriodDto,
}

impl From<SummaryCounters> for SummaryDto {
    fn from(summary: SummaryCounters) -> Self {
        Self {
            today: summary.day.into(),
            month: summary.month.into(),
            year: summary.year.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCountsDto {
    pub total: u64,
    pub received: u64,
    pub in_progress: u64,
    pub completed: u64,
    pub rejected: u64,
    pub cancelled: u64,
    pub today: u64,
}

impl From<StatusCounts> for StatusCountsDto {
    fn from(counts: StatusCounts) -> Self {
        Self {
            total: counts.total,
            received: counts.received,
            in_progress: counts.in_progress,
            completed: counts.completed,
            rejected: counts.rejected,
            cancelled: counts.cancelled,
            today: counts.today,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroupDto {
    /// `"20s"`, `"30s"`, ...
    pub age_group: String,
    pub count: u64,
}

impl From<AgeGroupCount> for AgeGroupDto {
    fn from(group: AgeGroupCount) -> Self {
        Self {
            age_group: format!("{}s", group.decade),
            count: group.count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDto {
    pub status_counts: StatusCountsDto,
    pub summary: SummaryDto,
    pub categories: Vec<RankedDto>,
    pub trend: Vec<TrendPointDto>,
    pub bottleneck: Vec<NamedCountDto>,
    pub age_groups: Vec<AgeGroupDto>,
}

impl From<Dashboard> for DashboardDto {
    fn from(dashboard: Dashboard) -> Self {
        Self {
            status_counts: dashboard.status_counts.into(),
            summary: dashboard.summary.into(),
            categories: dashboard.categories.into_iter().map(Into::into).collect(),
            trend: dashboard.trend.into_iter().map(Into::into).collect(),
            bottleneck: dashboard.bottleneck.iter().map(Into::into).collect(),
            age_groups: dashboard.age_groups.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn growth_serializes_as_number_or_new() {
        assert_eq!(
            serde_json::to_value(GrowthDto(GrowthRate::Percent(-12.5))).unwrap(),
            json!(-12.5)
        );
        assert_eq!(
            serde_json::to_value(GrowthDto(GrowthRate::New)).unwrap(),
            json!("new")
        );
    }

    #[test]
    fn distribution_reports_most_common() {
        let stats = DistributionStats {
            dimension: cp_core::StatsDimension::Region,
            items: vec![NamedCount::new("서울", 3), NamedCount::new("부산", 3)],
        };
        let value = serde_json::to_value(DistributionDto::from(stats)).unwrap();
        assert_eq!(value["type"], json!("region"));
        assert_eq!(value["mostCommon"], json!({"name": "서울", "value": 3}));
        assert_eq!(value["items"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn age_group_label() {
        let dto = AgeGroupDto::from(AgeGroupCount {
            decade: 30,
            count: 4,
        });
        assert_eq!(
            serde_json::to_value(dto).unwrap(),
            json!({"ageGroup": "30s", "count": 4})
        );
    }
}
