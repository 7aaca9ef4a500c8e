#![forbid(unsafe_code)]

use crate::handlers::*;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Complaints
        .route("/api/complaints", get(list_complaints).post(create_complaint))
        .route("/api/complaints/map/locations", get(map_locations))
        .route("/api/complaints/mypage", get(my_complaints))
        .route("/api/complaints/top-liked", get(top_liked))
        .route(
            "/api/complaints/:id",
            get(get_complaint)
                .put(update_complaint)
                .delete(delete_complaint),
        )
        .route("/api/complaints/:id/like", post(toggle_like))
        .route("/api/complaints/:id/status", post(change_status))
        .route("/api/complaints/:id/history", get(complaint_history))
        .route("/api/complaints/:id/replies", post(add_reply))
        .route("/api/complaints/:id/files", post(attach_file))
        // Assignment ledger
        .route("/api/complaints/:id/agencies", post(assign_agency))
        .route(
            "/api/complaints/:id/agencies/:agency_no",
            put(update_assignment),
        )
        .route("/api/agencies", get(list_agencies))
        .route("/api/agencies/:agency_no", get(agency_detail))
        .route("/api/agencies/:agency_no/complaints", get(agency_complaints))
        // Aggregation
        .route("/api/dashboard", get(dashboard))
        .route("/api/dashboard/categories", get(category_stats))
        .route("/api/dashboard/region-stats", get(distribution_stats))
        .route("/api/dashboard/trends", get(trend))
        .route("/api/dashboard/summary", get(summary))
        .route("/api/dashboard/age-groups", get(age_groups))
        .route("/api/dashboard/bottleneck", get(bottleneck))
        .route("/api/dashboard/status-counts", get(status_counts))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
