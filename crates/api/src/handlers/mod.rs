#![forbid(unsafe_code)]

mod agencies;
mod complaints;
mod dashboard;

pub(crate) use agencies::*;
pub(crate) use complaints::*;
pub(crate) use dashboard::*;

use crate::error::{ApiError, ApiResult};
use axum::Json;
use cp_core::{AgencyNo, ComplaintNo};
use serde_json::{Value, json};

pub(crate) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn complaint_no(raw: i64) -> ApiResult<ComplaintNo> {
    ComplaintNo::try_new(raw).map_err(|err| ApiError::validation(err.message()))
}

fn agency_no(raw: i64) -> ApiResult<AgencyNo> {
    AgencyNo::try_new(raw).map_err(|err| ApiError::validation(err.message()))
}

/// Blank query values count as absent.
fn non_blank(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.trim().is_empty())
}

fn parse_optional<T>(
    raw: Option<String>,
    parse: fn(&str) -> Option<T>,
    message: &'static str,
) -> ApiResult<Option<T>> {
    match non_blank(raw) {
        None => Ok(None),
        Some(value) => parse(&value)
            .map(Some)
            .ok_or_else(|| ApiError::validation(message)),
    }
}
