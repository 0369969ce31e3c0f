use crate::auth::auth::AuthUser;
use crate::auth::jwt::verify_token;
use crate::config::Config;
use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::AUTHORIZATION,
    web::Data,
};
use serde_json::{Value, json};
use tracing::debug;

fn bearer_token(req: &ServiceRequest) -> Result<&str, &'static str> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or("Missing Authorization header")?
        .to_str()
        .map_err(|_| "Invalid Authorization header encoding")?;

    header
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must start with Bearer")
}

fn reject(req: ServiceRequest, body: Value) -> ServiceResponse<BoxBody> {
    req.into_response(HttpResponse::Unauthorized().json(body).map_into_boxed_body())
}

/// Verifies the bearer JWT and stores the caller as [`AuthUser`] in the
/// request extensions.
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;

    let verified = bearer_token(&req)
        .map_err(|msg| json!({ "error": msg }))
        .and_then(|token| {
            verify_token(token, &config.jwt_secret)
                .map_err(|e| json!({ "error": "Invalid or expired token", "details": e }))
        });

    let claims = match verified {
        Ok(claims) => claims,
        Err(body) => {
            debug!(path = %req.path(), "Rejected unauthenticated request");
            return Ok(reject(req, body));
        }
    };

    req.extensions_mut().insert(AuthUser {
        user_id: claims.user_id,
        username: claims.sub,
        role: claims.role,
    });

    next.call(req).await
}
