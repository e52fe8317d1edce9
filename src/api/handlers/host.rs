use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::RegisterHostRequest;
use crate::domain::models::{auth::HostProfile, host::Host};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHasher};
use tracing::info;

pub async fn register_host(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterHostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = payload.username.trim().to_string();
    let email = payload.email.trim().to_string();

    if username.is_empty() || email.is_empty() {
        return Err(AppError::Validation("Username and email are required".into()));
    }
    if payload.password.len() < 8 {
        return Err(AppError::Validation("Password must be at least 8 characters".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    let host = state.host_repo.create(&Host::new(username, email, password_hash)).await?;

    info!("Host registered: {}", host.id);

    Ok((StatusCode::CREATED, Json(HostProfile {
        id: host.id,
        username: host.username,
        email: host.email,
    })))
}
