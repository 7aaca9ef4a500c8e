#![forbid(unsafe_code)]

use super::{agency_no, complaint_no, parse_optional};
use crate::auth::Authenticated;
use crate::dto::*;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;
use crate::support::now_ms_i64;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use cp_core::paging::PageRequest;
use cp_core::{AgencyType, AssignmentStatus};
use cp_storage::{AssignAgencyRequest, ListAgencyComplaintsRequest, UpdateAssignmentRequest};

const UNKNOWN_ASSIGNMENT_STATUS: &str = "unknown assignment status";

pub(crate) async fn assign_agency(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    Authenticated(actor): Authenticated,
    ApiJson(body): ApiJson<AssignAgencyBody>,
) -> ApiResult<(StatusCode, Json<AssignmentDto>)> {
    let request = AssignAgencyRequest {
        complaint_no: complaint_no(id)?,
        agency_no: agency_no(body.agency_no)?,
        actor,
        memo: body.memo,
        assigned_at_ms: now_ms_i64(),
    };
    let assignment = state
        .with_store(move |store| store.assign_agency(request))
        .await?;
    tracing::info!(
        complaint_no = id,
        agency_no = %assignment.agency_no,
        "agency assigned"
    );
    Ok((StatusCode::CREATED, Json(assignment.into())))
}

pub(crate) async fn update_assignment(
    State(state): State<AppState>,
    ApiPath((id, agency)): ApiPath<(i64, i64)>,
    Authenticated(actor): Authenticated,
    ApiJson(body): ApiJson<UpdateAssignmentBody>,
) -> ApiResult<Json<AssignmentDto>> {
    let request = UpdateAssignmentRequest {
        complaint_no: complaint_no(id)?,
        agency_no: agency_no(agency)?,
        actor,
        status: parse_optional(body.status, AssignmentStatus::parse, UNKNOWN_ASSIGNMENT_STATUS)?,
        memo: body.memo,
        updated_at_ms: now_ms_i64(),
    };
    let assignment = state
        .with_store(move |store| store.update_assignment(request))
        .await?;
    Ok(Json(assignment.into()))
}

pub(crate) async fn list_agencies(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AgencyListQuery>,
) -> ApiResult<Json<Vec<AgencyDto>>> {
    let agency_type = parse_optional(query.agency_type, AgencyType::parse, "unknown agency type")?;
    let agencies = state
        .with_store(move |store| store.list_agencies(agency_type))
        .await?;
    Ok(Json(agencies.into_iter().map(Into::into).collect()))
}

pub(crate) async fn agency_detail(
    State(state): State<AppState>,
    ApiPath(agency): ApiPath<i64>,
) -> ApiResult<Json<AgencyDetailDto>> {
    let no = agency_no(agency)?;
    let detail = state
        .with_store(move |store| store.agency_detail(no))
        .await?;
    Ok(Json(detail.into()))
}

pub(crate) async fn agency_complaints(
    State(state): State<AppState>,
    ApiPath(agency): ApiPath<i64>,
    Authenticated(actor): Authenticated,
    ApiQuery(query): ApiQuery<AgencyComplaintsQuery>,
) -> ApiResult<Json<AgencyComplaintListDto>> {
    let request = ListAgencyComplaintsRequest {
        agency_no: agency_no(agency)?,
        actor,
        status: parse_optional(query.status, AssignmentStatus::parse, UNKNOWN_ASSIGNMENT_STATUS)?,
        page: PageRequest::normalize(query.page, query.limit),
    };
    let page = state
        .with_store(move |store| store.agency_complaints(request))
        .await?;
    Ok(Json(page.into()))
}
