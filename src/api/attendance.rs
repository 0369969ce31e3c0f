use crate::{
    api::{local_now, lock},
    auth::auth::AuthUser,
    models::{CheckInReq, RecentQuery, RecordEnvelope},
    store::{DEFAULT_RECENT_LIMIT, SharedStore},
};
use actix_web::{HttpResponse, web};
use tracing::{info, warn};

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/check-in",
    request_body(content = CheckInReq, description = "Optional check-in location"),
    responses(
        (status = 201, description = "Checked in successfully", body = crate::model::attendance::AttendanceRecord),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Already checked in today", body = Object, example = json!({
            "message": "Already checked in today"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    auth: AuthUser,
    store: web::Data<SharedStore>,
    payload: Option<web::Json<CheckInReq>>,
) -> actix_web::Result<HttpResponse> {
    let location = payload.and_then(|p| p.into_inner().location);

    let mut store = lock(&store)?;
    let result = match location {
        Some(_) => store.check_in_at(&auth.user_id, local_now(), location),
        None => store.check_in(&auth.user_id, local_now()),
    };
    drop(store);

    let record = result.map_err(|e| {
        info!(error = %e, user_id = %auth.user_id, "Check-in rejected");
        e
    })?;

    info!(user_id = %auth.user_id, status = %record.status, "Checked in");
    Ok(HttpResponse::Created().json(record))
}

/// Check-out endpoint
///
/// Without an open record for today nothing changes and `record` is `null`.
#[utoipa::path(
    post,
    path = "/api/attendance/check-out",
    responses(
        (status = 200, description = "Today's record, or null when there was nothing to close", body = RecordEnvelope),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_out(
    auth: AuthUser,
    store: web::Data<SharedStore>,
) -> actix_web::Result<HttpResponse> {
    let record = lock(&store)?.check_out(&auth.user_id, local_now());

    if record.is_some() {
        info!(user_id = %auth.user_id, "Checked out");
    }

    Ok(HttpResponse::Ok().json(RecordEnvelope { record }))
}

/// Today's record of the caller, open or closed
#[utoipa::path(
    get,
    path = "/api/attendance/today",
    responses(
        (status = 200, description = "Today's record or null", body = RecordEnvelope),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn today(auth: AuthUser, store: web::Data<SharedStore>) -> actix_web::Result<HttpResponse> {
    let record = lock(&store)?
        .today_record_for(&auth.user_id, local_now())
        .cloned();

    Ok(HttpResponse::Ok().json(RecordEnvelope { record }))
}

/// Latest records of the caller, newest first
#[utoipa::path(
    get,
    path = "/api/attendance/recent",
    params(
        ("limit" = Option<usize>, Query, description = "Number of records, default 4")
    ),
    responses(
        (status = 200, description = "Recent records", body = Vec<crate::model::attendance::AttendanceRecord>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn recent(
    auth: AuthUser,
    store: web::Data<SharedStore>,
    query: web::Query<RecentQuery>,
) -> actix_web::Result<HttpResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let records = lock(&store)?.recent_records_for(&auth.user_id, limit);

    Ok(HttpResponse::Ok().json(records))
}

/// Discipline summary of the caller
#[utoipa::path(
    get,
    path = "/api/attendance/summary",
    responses(
        (status = 200, description = "Attendance counts and discipline score", body = crate::store::AttendanceSummary),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn summary(auth: AuthUser, store: web::Data<SharedStore>) -> actix_web::Result<HttpResponse> {
    let summary = lock(&store)?.summary_for(&auth.user_id);
    Ok(HttpResponse::Ok().json(summary))
}

/// Full attendance log (admin)
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, description = "Every record in insertion order", body = Vec<crate::model::attendance::AttendanceRecord>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn list_records(
    auth: AuthUser,
    store: web::Data<SharedStore>,
) -> actix_web::Result<HttpResponse> {
    auth.require_admin()?;

    let records = lock(&store)?.records().to_vec();
    Ok(HttpResponse::Ok().json(records))
}

/// Company-wide attendance figures (admin)
#[utoipa::path(
    get,
    path = "/api/attendance/overview",
    responses(
        (status = 200, description = "Headcount and status counts", body = crate::store::AttendanceOverview),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn overview(
    auth: AuthUser,
    store: web::Data<SharedStore>,
) -> actix_web::Result<HttpResponse> {
    auth.require_admin().map_err(|e| {
        warn!(user_id = %auth.user_id, "Non-admin requested attendance overview");
        e
    })?;

    let overview = lock(&store)?.overview(local_now());
    Ok(HttpResponse::Ok().json(overview))
}
