//! Authentication handlers
//!
//! Google sign-in and logout. The session token is returned in the body and
//! also set as the `jwt` cookie.

use axum::extract::State;
use axum_extra::{
    extract::cookie::{Cookie, CookieJar, SameSite},
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use social_common::TOKEN_COOKIE;
use social_service::{AuthResponse, AuthService, LoginRequest, MessageResponse};

use crate::extractors::JsonOrDefault;
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

fn session_cookie(token: String, max_age_days: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(max_age_days))
        .build()
}

/// Sign in with a Google ID token. A request without a body is treated as
/// carrying no token.
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonOrDefault(request): JsonOrDefault<LoginRequest>,
) -> ApiResult<(CookieJar, ApiJson<AuthResponse>)> {
    let response = AuthService::new(state.service_context())
        .login(request)
        .await?;

    let config = state.config();
    let cookie = session_cookie(
        response.token.clone(),
        config.jwt.cookie_expires_in_days,
        config.app.env.is_production(),
    );

    Ok((jar.add(cookie), ApiJson(response)))
}

/// Revoke the current token and clear the cookie
///
/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, ApiJson<MessageResponse>)> {
    let token = bearer
        .map(|TypedHeader(Authorization(b))| b.token().to_string())
        .or_else(|| jar.get(TOKEN_COOKIE).map(|c| c.value().to_string()));

    AuthService::new(state.service_context())
        .logout(token.as_deref())
        .await?;

    let jar = jar.remove(Cookie::build(TOKEN_COOKIE).path("/"));
    Ok((jar, ApiJson(MessageResponse::new("Logged out successfully"))))
}
