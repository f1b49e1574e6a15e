use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use uuid::Uuid;

use service::auth::{
    domain::{LoggedUser, LoginInput, RegisterInput, RegisteredUser, Role},
    token::Claims,
};

use crate::errors::JsonApiError;
use crate::startup::ServerState;

/// Cookie carrying the token as a fallback to the Authorization header.
pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Debug, Serialize)]
pub struct MeOutput {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub expires_at: i64,
}

#[utoipa::path(post, path = "/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequestDoc, responses((status = 200, description = "Registered"), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn register(State(state): State<ServerState>, WithRejection(Json(input), _): WithRejection<Json<RegisterInput>, JsonApiError>) -> Result<Json<RegisteredUser>, JsonApiError> {
    let user = state.services.auth.register(input).await?;
    Ok(Json(user))
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequestDoc, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized"), (status = 404, description = "Unknown User")))]
pub async fn login(State(state): State<ServerState>, jar: CookieJar, WithRejection(Json(input), _): WithRejection<Json<LoginInput>, JsonApiError>) -> Result<(CookieJar, Json<LoggedUser>), JsonApiError> {
    let logged = state.services.auth.login(input).await?;
    let mut cookie = Cookie::new(AUTH_COOKIE, logged.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    Ok((jar.add(cookie), Json(logged)))
}

#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 204, description = "Cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    // always expire, whether or not the request carried the cookie
    let jar = jar.add(Cookie::build((AUTH_COOKIE, "")).path("/").removal());
    (jar, StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/me", tag = "auth", responses((status = 200, description = "Current identity"), (status = 401, description = "Unauthorized")))]
pub async fn me(Extension(claims): Extension<Claims>) -> Json<MeOutput> {
    Json(MeOutput { user_id: claims.uid, email: claims.email, role: claims.role, expires_at: claims.exp })
}

fn cookie_token(req: &Request) -> Option<String> {
    let cookie_header = req.headers().get(header::COOKIE).and_then(|v| v.to_str().ok())?;
    cookie_header
        .split(';')
        .filter_map(|kv| kv.trim().strip_prefix(AUTH_COOKIE)?.strip_prefix('='))
        .find(|t| !t.is_empty())
        .map(str::to_string)
}

/// Require `Authorization: Bearer <token>`, falling back to the `auth_token` cookie.
/// Verified claims are attached to the request extensions.
pub async fn require_bearer_token_state(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();

    let token = match req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(h) => match h.strip_prefix("Bearer ") {
            Some(t) => t.to_string(),
            None => {
                tracing::warn!(path = %path, "invalid Authorization format (expect Bearer)");
                return Err(JsonApiError::unauthorized("expected Bearer token"));
            }
        },
        None => match cookie_token(&req) {
            Some(t) => t,
            None => {
                tracing::warn!(path = %path, "missing Authorization header and auth_token cookie");
                return Err(JsonApiError::unauthorized("missing token"));
            }
        },
    };

    match state.services.auth.verify_token(&token) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(path = %path, err = %e, "token validation failed");
            Err(JsonApiError::from(e))
        }
    }
}
