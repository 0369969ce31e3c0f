use crate::{
    api::{local_now, lock},
    auth::auth::AuthUser,
    models::{UserForm, UserResponse},
    store::SharedStore,
};
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::{info, warn};

/// Team roster (admin)
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users, passwords omitted", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_users(
    auth: AuthUser,
    store: web::Data<SharedStore>,
) -> actix_web::Result<HttpResponse> {
    auth.require_admin()?;

    let users: Vec<UserResponse> = lock(&store)?.users().iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(users))
}

/// Add a team member (admin)
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserForm,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "A required field is empty", body = Object, example = json!({
            "message": "fullName must not be empty"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Username already taken")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn create_user(
    auth: AuthUser,
    store: web::Data<SharedStore>,
    payload: web::Json<UserForm>,
) -> actix_web::Result<HttpResponse> {
    auth.require_admin()?;

    let user = lock(&store)?
        .create_user(payload.into_inner(), local_now())
        .map_err(|e| {
            info!(error = %e, "Create user rejected");
            e
        })?;

    info!(admin = %auth.username, user_id = %user.id, "User created");
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Delete a user and all of their attendance records (admin)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id", Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 400, description = "Admins cannot delete their own account"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    auth: AuthUser,
    store: web::Data<SharedStore>,
    path: web::Path<String>,
) -> actix_web::Result<HttpResponse> {
    auth.require_admin()?;
    let user_id = path.into_inner();

    if user_id == auth.user_id {
        warn!(user_id = %user_id, "Admin tried to delete their own account");
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "You cannot delete your own account"
        })));
    }

    if !lock(&store)?.delete_user(&user_id) {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "User not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully deleted"
    })))
}
