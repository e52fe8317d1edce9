use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::LoginRequest;
use crate::domain::models::auth::{AuthResponse, HostProfile};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tower_cookies::{Cookie, Cookies};
use tower_cookies::cookie::SameSite;
use time::Duration;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use tracing::info;

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let host = state.host_repo.find_by_username(&payload.username).await?
        .ok_or(AppError::Unauthorized)?;

    let parsed_hash = PasswordHash::new(&host.password_hash)
        .map_err(|_| AppError::Internal)?;

    Argon2::default().verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized)?;

    let (access_jwt, csrf_token) = state.auth_service.login(&host)?;

    set_session_cookie(&cookies, &access_jwt);

    info!("Host logged in: {}", host.id);

    Ok(Json(AuthResponse {
        csrf_token,
        host: HostProfile {
            id: host.id,
            username: host.username,
            email: host.email,
        },
    }))
}

pub async fn logout(cookies: Cookies) -> impl IntoResponse {
    cookies.remove(Cookie::build(("access_token", "")).path("/").into());

    info!("Host logged out");

    StatusCode::OK
}

fn set_session_cookie(cookies: &Cookies, access: &str) {
    let mut access_c = Cookie::new("access_token", access.to_string());
    access_c.set_http_only(true);
    access_c.set_secure(true);
    access_c.set_same_site(SameSite::Strict);
    access_c.set_path("/");
    access_c.set_max_age(Duration::hours(12));
    cookies.add(access_c);
}
