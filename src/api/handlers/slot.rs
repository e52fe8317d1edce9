use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::requests::{CreateSlotsRequest, GenerateSlotsRequest, ListSlotsQuery, SetAvailabilityRequest};
use crate::api::dtos::responses::CreatedSlotsResponse;
use crate::api::extractors::auth::AuthHost;
use crate::domain::models::slot::{CandidateSlot, TimeSlot};
use crate::domain::ports::{ChangeKind, SlotChange};
use crate::domain::services::availability;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn list_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListSlotsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut slots = state.slot_repo.list(query.owner_id.as_deref()).await?;

    if let Some(date) = query.date {
        slots.retain(|slot| slot.date == date);
    }

    Ok(Json(slots))
}

pub async fn create_slots(
    State(state): State<Arc<AppState>>,
    AuthHost { host_id }: AuthHost,
    Json(payload): Json<CreateSlotsRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.slots.is_empty() {
        return Err(AppError::Validation("No slots to create".into()));
    }
    for slot in &payload.slots {
        if slot.start_time >= slot.end_time {
            return Err(AppError::Validation("Slot start time must be before its end time".into()));
        }
    }

    let slots: Vec<TimeSlot> = payload.slots.into_iter()
        .map(|s| TimeSlot::new(host_id.clone(), CandidateSlot {
            date: s.date,
            start_time: s.start_time,
            end_time: s.end_time,
        }))
        .collect();

    let created = state.slot_repo.insert_many(&slots).await?;

    for slot in &created {
        state.notifier.publish(SlotChange {
            kind: ChangeKind::Created,
            owner_id: slot.owner_id.clone(),
            slot_id: slot.id.clone(),
        });
    }

    info!("Created {} slots for host {}", created.len(), host_id);

    Ok((StatusCode::CREATED, Json(CreatedSlotsResponse {
        count: created.len(),
        slots: created,
    })))
}

pub async fn generate_slots(
    State(state): State<Arc<AppState>>,
    AuthHost { host_id }: AuthHost,
    Json(payload): Json<GenerateSlotsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let candidates = availability::generate_slots(
        payload.date,
        payload.window_start,
        payload.window_end,
        payload.granularity_min,
    )?;

    let slots: Vec<TimeSlot> = candidates.into_iter()
        .map(|candidate| TimeSlot::new(host_id.clone(), candidate))
        .collect();

    let created = state.slot_repo.insert_many(&slots).await?;

    for slot in &created {
        state.notifier.publish(SlotChange {
            kind: ChangeKind::Created,
            owner_id: slot.owner_id.clone(),
            slot_id: slot.id.clone(),
        });
    }

    info!(
        "Generated {} slots for host {} on {} ({}:00-{}:00 every {} min)",
        created.len(), host_id, payload.date,
        payload.window_start, payload.window_end, payload.granularity_min
    );

    Ok((StatusCode::CREATED, Json(CreatedSlotsResponse {
        count: created.len(),
        slots: created,
    })))
}

pub async fn set_availability(
    State(state): State<Arc<AppState>>,
    AuthHost { host_id: _ }: AuthHost,
    Path(slot_id): Path<String>,
    Json(payload): Json<SetAvailabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.slot_repo.set_availability(&slot_id, payload.is_available).await?;

    state.notifier.publish(SlotChange {
        kind: ChangeKind::Updated,
        owner_id: updated.owner_id.clone(),
        slot_id: updated.id.clone(),
    });

    Ok(Json(updated))
}

pub async fn delete_slot(
    State(state): State<Arc<AppState>>,
    AuthHost { host_id: _ }: AuthHost,
    Path(slot_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let slot = state.slot_repo.find_by_id(&slot_id).await?
        .ok_or(AppError::NotFound("Slot not found".into()))?;

    state.slot_repo.delete(&slot.id).await?;

    state.notifier.publish(SlotChange {
        kind: ChangeKind::Deleted,
        owner_id: slot.owner_id.clone(),
        slot_id: slot.id.clone(),
    });

    info!("Slot deleted: {}", slot.id);

    Ok(StatusCode::NO_CONTENT)
}
