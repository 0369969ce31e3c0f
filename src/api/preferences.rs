use crate::{api::lock, models::ThemeReq, store::SharedStore};
use actix_web::{HttpResponse, web};

/// Current display theme
#[utoipa::path(
    get,
    path = "/preferences/theme",
    responses(
        (status = 200, description = "Stored theme", body = ThemeReq)
    ),
    tag = "Preferences"
)]
pub async fn get_theme(store: web::Data<SharedStore>) -> actix_web::Result<HttpResponse> {
    let theme = lock(&store)?.theme();
    Ok(HttpResponse::Ok().json(ThemeReq { theme }))
}

/// Change the display theme
#[utoipa::path(
    put,
    path = "/preferences/theme",
    request_body = ThemeReq,
    responses(
        (status = 200, description = "Theme saved", body = ThemeReq),
        (status = 400, description = "Unknown theme")
    ),
    tag = "Preferences"
)]
pub async fn set_theme(
    store: web::Data<SharedStore>,
    payload: web::Json<ThemeReq>,
) -> actix_web::Result<HttpResponse> {
    let theme = payload.into_inner().theme;
    lock(&store)?.set_theme(theme);
    Ok(HttpResponse::Ok().json(ThemeReq { theme }))
}

/// Flip between light and dark
#[utoipa::path(
    post,
    path = "/preferences/theme/toggle",
    responses(
        (status = 200, description = "New theme", body = ThemeReq)
    ),
    tag = "Preferences"
)]
pub async fn toggle_theme(store: web::Data<SharedStore>) -> actix_web::Result<HttpResponse> {
    let mut store = lock(&store)?;
    let theme = store.theme().toggled();
    store.set_theme(theme);
    Ok(HttpResponse::Ok().json(ThemeReq { theme }))
}

#[cfg(test)]
mod tests {
    use crate::storage::{KeyValueStorage, THEME_KEY};
    use crate::test_support::{TestState, app};
    use actix_web::{http::StatusCode, test};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn theme_is_persisted() {
        let state = TestState::new();
        let app = test::init_service(app(&state)).await;

        let req = test::TestRequest::get().uri("/preferences/theme").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["theme"], "light");

        let req = test::TestRequest::put()
            .uri("/preferences/theme")
            .set_json(json!({"theme": "dark"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["theme"], "dark");
        assert_eq!(state.storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        let req = test::TestRequest::post().uri("/preferences/theme/toggle").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["theme"], "light");
    }

    #[actix_web::test]
    async fn rejects_unknown_theme() {
        let state = TestState::new();
        let app = test::init_service(app(&state)).await;

        let req = test::TestRequest::put()
            .uri("/preferences/theme")
            .set_json(json!({"theme": "sepia"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }
}
