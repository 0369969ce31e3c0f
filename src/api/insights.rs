use crate::{
    api::lock,
    auth::auth::AuthUser,
    insights::{InsightProvider, generate_attendance_insights},
    models::InsightsResponse,
    store::SharedStore,
};
use actix_web::{HttpResponse, web};
use tracing::info;

/// AI summary of attendance patterns (admin)
///
/// Always answers 200; when the text service fails the report is a fixed
/// apology.
#[utoipa::path(
    post,
    path = "/api/insights",
    responses(
        (status = 200, description = "Generated report", body = InsightsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Insights"
)]
pub async fn generate_report(
    auth: AuthUser,
    store: web::Data<SharedStore>,
    provider: web::Data<dyn InsightProvider>,
) -> actix_web::Result<HttpResponse> {
    auth.require_admin()?;

    let (users, records) = {
        let store = lock(&store)?;
        (store.users().to_vec(), store.records().to_vec())
    };

    info!(users = users.len(), records = records.len(), "Generating attendance insights");
    let report = generate_attendance_insights(provider.get_ref(), &users, &records).await;

    Ok(HttpResponse::Ok().json(InsightsResponse { report }))
}

#[cfg(test)]
mod tests {
    use crate::insights::FALLBACK_REPORT;
    use crate::test_support::{TestState, app, bearer, login_as};
    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn returns_provider_report() {
        let state = TestState::with_report("Attendance is steady.");
        let app = test::init_service(app(&state)).await;

        let req = test::TestRequest::post()
            .uri("/api/insights")
            .insert_header(bearer(&login_as(&state, "admin")))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["report"], "Attendance is steady.");
    }

    #[actix_web::test]
    async fn provider_failure_becomes_fallback() {
        let state = TestState::new();
        let app = test::init_service(app(&state)).await;

        let req = test::TestRequest::post()
            .uri("/api/insights")
            .insert_header(bearer(&login_as(&state, "admin")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["report"], FALLBACK_REPORT);
    }

    #[actix_web::test]
    async fn employees_cannot_request_insights() {
        let state = TestState::with_report("secret");
        let app = test::init_service(app(&state)).await;

        let req = test::TestRequest::post()
            .uri("/api/insights")
            .insert_header(bearer(&login_as(&state, "jdoe")))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
    }
}
