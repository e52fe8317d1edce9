use axum::{extract::{Path, State}, response::IntoResponse, Json};
use crate::api::dtos::requests::BookSlotRequest;
use crate::api::extractors::auth::AuthHost;
use crate::domain::models::slot::GuestDetails;
use crate::domain::ports::{ChangeKind, SlotChange};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub async fn book_slot(
    State(state): State<Arc<AppState>>,
    Path(slot_id): Path<String>,
    Json(payload): Json<BookSlotRequest>,
) -> Result<impl IntoResponse, AppError> {
    let guest_name = payload.guest_name.trim().to_string();
    let guest_email = payload.guest_email.trim().to_string();

    if guest_name.is_empty() || guest_email.is_empty() {
        return Err(AppError::Validation("Guest name and email are required".into()));
    }

    let guest_note = payload.guest_note.as_deref()
        .map(str::trim)
        .filter(|note| !note.is_empty())
        .map(str::to_string);

    let guest = GuestDetails {
        name: guest_name,
        email: guest_email,
        note: guest_note,
    };

    // The repository evaluates the unbooked guard atomically; a lost
    // race surfaces as AlreadyBooked and is never papered over here.
    let booked = state.slot_repo.book(&slot_id, &guest, Utc::now()).await?;

    state.notifier.publish(SlotChange {
        kind: ChangeKind::Updated,
        owner_id: booked.owner_id.clone(),
        slot_id: booked.id.clone(),
    });

    info!("Slot {} booked by {}", booked.id, guest.email);

    Ok(Json(booked))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    AuthHost { host_id: _ }: AuthHost,
    Path(slot_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let cancelled = state.slot_repo.cancel(&slot_id).await?;

    state.notifier.publish(SlotChange {
        kind: ChangeKind::Updated,
        owner_id: cancelled.owner_id.clone(),
        slot_id: cancelled.id.clone(),
    });

    info!("Booking cancelled on slot {}", cancelled.id);

    Ok(Json(cancelled))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    AuthHost { host_id }: AuthHost,
) -> Result<impl IntoResponse, AppError> {
    let booked = state.slot_repo.list_booked(&host_id).await?;
    Ok(Json(booked))
}
