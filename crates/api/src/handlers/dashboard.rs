#![forbid(unsafe_code)]

use super::{agency_no, non_blank, parse_optional};
use crate::dto::*;
use crate::error::ApiResult;
use crate::extract::ApiQuery;
use crate::state::AppState;
use crate::support::now_ms_i64;
use axum::Json;
use axum::extract::State;
use cp_core::{StatsDimension, TimeBasis};
use cp_storage::{DashboardRequest, DistributionRequest, StatsFilter, TrendRequest};

fn stats_filter(category: Option<String>, agency: Option<i64>) -> ApiResult<StatsFilter> {
    Ok(StatsFilter {
        category: non_blank(category),
        agency_no: agency.map(agency_no).transpose()?,
    })
}

fn time_basis(raw: Option<String>) -> ApiResult<TimeBasis> {
    Ok(parse_optional(raw, TimeBasis::parse, "timeBasis must be DAY, MONTH or YEAR")?
        .unwrap_or(TimeBasis::Day))
}

pub(crate) async fn dashboard(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StatsQuery>,
) -> ApiResult<Json<DashboardDto>> {
    let basis = time_basis(query.time_basis)?;
    let filter = stats_filter(query.category, query.agency_no)?;
    let now_ms = now_ms_i64();
    let dashboard = state
        .with_store(move |store| {
            let request = DashboardRequest {
                trend: TrendRequest::recent(basis, filter.clone(), now_ms)?,
                filter,
                now_ms,
            };
            store.dashboard(&request)
        })
        .await?;
    Ok(Json(dashboard.into()))
}

pub(crate) async fn category_stats(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StatsQuery>,
) -> ApiResult<Json<Vec<RankedDto>>> {
    let filter = stats_filter(query.category, query.agency_no)?;
    let ranked = state
        .with_store(move |store| store.category_stats(&filter))
        .await?;
    Ok(Json(ranked.into_iter().map(Into::into).collect()))
}

pub(crate) async fn distribution_stats(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DistributionQuery>,
) -> ApiResult<Json<DistributionDto>> {
    let request = DistributionRequest {
        dimension: parse_optional(
            query.dimension,
            StatsDimension::parse,
            "type must be region or institution",
        )?
        .unwrap_or(StatsDimension::Region),
        filter: stats_filter(query.category, query.agency_no)?,
        institution_type: state.settings.institution_type,
    };
    let stats = state
        .with_store(move |store| store.distribution_stats(&request))
        .await?;
    Ok(Json(stats.into()))
}

pub(crate) async fn trend(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StatsQuery>,
) -> ApiResult<Json<Vec<TrendPointDto>>> {
    let basis = time_basis(query.time_basis)?;
    let filter = stats_filter(query.category, query.agency_no)?;
    let now_ms = now_ms_i64();
    let points = state
        .with_store(move |store| store.trend(&TrendRequest::recent(basis, filter, now_ms)?))
        .await?;
    Ok(Json(points.into_iter().map(Into::into).collect()))
}

pub(crate) async fn summary(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StatsQuery>,
) -> ApiResult<Json<SummaryDto>> {
    let filter = stats_filter(query.category, query.agency_no)?;
    let now_ms = now_ms_i64();
    let summary = state
        .with_store(move |store| store.summary_counters(&filter, now_ms))
        .await?;
    Ok(Json(summary.into()))
}

pub(crate) async fn age_groups(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StatsQuery>,
) -> ApiResult<Json<Vec<AgeGroupDto>>> {
    let filter = stats_filter(query.category, query.agency_no)?;
    let groups = state
        .with_store(move |store| store.age_group_stats(&filter))
        .await?;
    Ok(Json(groups.into_iter().map(Into::into).collect()))
}

pub(crate) async fn bottleneck(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StatsQuery>,
) -> ApiResult<Json<Vec<NamedCountDto>>> {
    let filter = stats_filter(query.category, query.agency_no)?;
    let rows = state
        .with_store(move |store| store.bottleneck(&filter))
        .await?;
    Ok(Json(rows.iter().map(Into::into).collect()))
}

pub(crate) async fn status_counts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StatsQuery>,
) -> ApiResult<Json<StatusCountsDto>> {
    let filter = stats_filter(query.category, query.agency_no)?;
    let now_ms = now_ms_i64();
    let counts = state
        .with_store(move |store| store.status_counts(&filter, now_ms))
        .await?;
    Ok(Json(counts.into()))
}
