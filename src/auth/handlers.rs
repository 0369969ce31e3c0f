use crate::{
    api::lock,
    auth::{auth::AuthUser, jwt::generate_access_token},
    config::Config,
    models::{LoginReqDto, LoginResponse, UserResponse},
    store::SharedStore,
};
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::{debug, error, info, instrument};

/// Login with username and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Username or password missing"),
        (status = 401, description = "Invalid credentials", body = Object, example = json!({
            "message": "Invalid credentials"
        }))
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(store, config, user),
    fields(username = %user.username)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    store: web::Data<SharedStore>,
    config: web::Data<Config>,
) -> actix_web::Result<HttpResponse> {
    info!("Login request received");

    if user.username.trim().is_empty() || user.password.is_empty() {
        info!("Validation failed: empty username or password");
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Username or password required"
        })));
    }

    let db_user = match lock(&store)?.authenticate(&user.username, &user.password) {
        Ok(u) => u,
        Err(e) => {
            info!("Invalid credentials");
            return Err(e.into());
        }
    };

    debug!(user_id = %db_user.id, "Generating access token");

    let access_token = generate_access_token(&db_user, &config.jwt_secret, config.access_token_ttl)
        .map_err(|e| {
            error!(error = %e, "Failed to sign access token");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    info!(user_id = %db_user.id, role = %db_user.role, "Login successful");

    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token,
        user: UserResponse::from(&db_user),
    }))
}

/// Current user
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "The authenticated user", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Account no longer exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn me(auth: AuthUser, store: web::Data<SharedStore>) -> actix_web::Result<HttpResponse> {
    let store = lock(&store)?;
    match store.user(&auth.user_id) {
        Some(user) => Ok(HttpResponse::Ok().json(UserResponse::from(user))),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "User not found"
        }))),
    }
}
