#![forbid(unsafe_code)]

use super::{complaint_no, non_blank, parse_optional};
use crate::auth::{Authenticated, Viewer};
use crate::dto::*;
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;
use crate::support::now_ms_i64;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use cp_core::ComplaintStatus;
use cp_core::paging::PageRequest;
use cp_storage::{
    AddReplyRequest, AttachFileRequest, ChangeStatusRequest, CreateComplaintRequest,
    DeleteComplaintRequest, ListComplaintsRequest, LocationInput, MyComplaintsRequest, NewFile,
    ToggleLikeRequest, UpdateComplaintRequest,
};

pub(crate) async fn list_complaints(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    ApiQuery(query): ApiQuery<ListComplaintsQuery>,
) -> ApiResult<Json<ComplaintListDto>> {
    let request = ListComplaintsRequest {
        viewer,
        status: parse_optional(query.status, ComplaintStatus::parse, "unknown complaint status")?,
        category: non_blank(query.category),
        search: non_blank(query.search),
        region: non_blank(query.region),
        page: PageRequest::normalize(query.page, query.limit),
    };
    let page = state
        .with_store(move |store| store.list_complaints(request))
        .await?;
    Ok(Json(page.into()))
}

pub(crate) async fn my_complaints(
    State(state): State<AppState>,
    Authenticated(owner): Authenticated,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult<Json<ComplaintListDto>> {
    let request = MyComplaintsRequest {
        owner,
        page: PageRequest::normalize(query.page, query.limit),
    };
    let page = state
        .with_store(move |store| store.my_complaints(request))
        .await?;
    Ok(Json(page.into()))
}

pub(crate) async fn top_liked(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TopLikedQuery>,
) -> ApiResult<Json<Vec<ComplaintSummaryDto>>> {
    let status = parse_optional(query.status, ComplaintStatus::parse, "unknown complaint status")?;
    let items = state
        .with_store(move |store| store.top_liked(status))
        .await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

pub(crate) async fn create_complaint(
    State(state): State<AppState>,
    Authenticated(owner): Authenticated,
    ApiJson(body): ApiJson<CreateComplaintBody>,
) -> ApiResult<(StatusCode, Json<CreatedDto>)> {
    let request = CreateComplaintRequest {
        owner,
        category: body.category,
        title: body.title,
        content: body.content,
        is_public: body.is_public,
        location: body.location.map(|location| LocationInput {
            lat: location.lat,
            lng: location.lng,
            address: location.address,
        }),
        files: body.files.into_iter().map(new_file).collect(),
        created_at_ms: now_ms_i64(),
    };
    let created = state
        .with_store(move |store| store.create_complaint(request))
        .await?;
    tracing::info!(complaint_no = %created.complaint_no, "complaint created");
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub(crate) async fn map_locations(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<MapLocationDto>>> {
    let locations = state.with_store(|store| store.map_locations()).await?;
    Ok(Json(locations.into_iter().map(Into::into).collect()))
}

pub(crate) async fn get_complaint(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    Viewer(viewer): Viewer,
) -> ApiResult<Json<ComplaintDetailDto>> {
    let no = complaint_no(id)?;
    let detail = state
        .with_store(move |store| store.get_complaint(no, viewer.as_ref()))
        .await?;
    Ok(Json(detail.into()))
}

pub(crate) async fn update_complaint(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    Authenticated(actor): Authenticated,
    ApiJson(body): ApiJson<UpdateComplaintBody>,
) -> ApiResult<Json<MessageDto>> {
    let request = UpdateComplaintRequest {
        complaint_no: complaint_no(id)?,
        actor,
        category: body.category,
        title: body.title,
        content: body.content,
        is_public: body.is_public,
        updated_at_ms: now_ms_i64(),
    };
    state
        .with_store(move |store| store.update_complaint(request))
        .await?;
    Ok(Json(MessageDto {
        message: "complaint updated",
    }))
}

pub(crate) async fn delete_complaint(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    Authenticated(actor): Authenticated,
) -> ApiResult<Json<MessageDto>> {
    let request = DeleteComplaintRequest {
        complaint_no: complaint_no(id)?,
        actor,
    };
    state
        .with_store(move |store| store.delete_complaint(request))
        .await?;
    tracing::info!(complaint_no = id, "complaint deleted");
    Ok(Json(MessageDto {
        message: "complaint deleted",
    }))
}

pub(crate) async fn toggle_like(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    Authenticated(actor): Authenticated,
) -> ApiResult<Json<LikeDto>> {
    let request = ToggleLikeRequest {
        complaint_no: complaint_no(id)?,
        actor,
        at_ms: now_ms_i64(),
    };
    let toggle = state
        .with_store(move |store| store.toggle_like(request))
        .await?;
    Ok(Json(toggle.into()))
}

pub(crate) async fn change_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    Authenticated(actor): Authenticated,
    ApiJson(body): ApiJson<ChangeStatusBody>,
) -> ApiResult<Json<Vec<HistoryDto>>> {
    let status = ComplaintStatus::parse(&body.status)
        .ok_or_else(|| ApiError::validation("unknown complaint status"))?;
    let request = ChangeStatusRequest {
        complaint_no: complaint_no(id)?,
        actor,
        status,
        memo: body.memo,
        at_ms: now_ms_i64(),
    };
    let history = state
        .with_store(move |store| store.change_status(request))
        .await?;
    tracing::info!(complaint_no = id, status = status.as_str(), "complaint status changed");
    Ok(Json(history.into_iter().map(Into::into).collect()))
}

pub(crate) async fn complaint_history(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    Viewer(viewer): Viewer,
) -> ApiResult<Json<Vec<HistoryDto>>> {
    let no = complaint_no(id)?;
    let history = state
        .with_store(move |store| store.complaint_history(no, viewer.as_ref()))
        .await?;
    Ok(Json(history.into_iter().map(Into::into).collect()))
}

pub(crate) async fn add_reply(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    Authenticated(actor): Authenticated,
    ApiJson(body): ApiJson<ReplyBody>,
) -> ApiResult<(StatusCode, Json<ReplyDto>)> {
    let request = AddReplyRequest {
        complaint_no: complaint_no(id)?,
        actor,
        content: body.content,
        created_at_ms: now_ms_i64(),
    };
    let reply = state
        .with_store(move |store| store.add_reply(request))
        .await?;
    Ok((StatusCode::CREATED, Json(reply.into())))
}

pub(crate) async fn attach_file(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    Authenticated(actor): Authenticated,
    ApiJson(body): ApiJson<FileBody>,
) -> ApiResult<(StatusCode, Json<FileDto>)> {
    let request = AttachFileRequest {
        complaint_no: complaint_no(id)?,
        actor,
        file: new_file(body),
        uploaded_at_ms: now_ms_i64(),
    };
    let file = state
        .with_store(move |store| store.attach_file(request))
        .await?;
    Ok((StatusCode::CREATED, Json(file.into())))
}

fn new_file(body: FileBody) -> NewFile {
    NewFile {
        file_url: body.file_url,
        file_type: body.file_type,
    }
}
