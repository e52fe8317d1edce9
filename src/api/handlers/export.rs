use axum::{extract::State, http::header, response::IntoResponse};
use crate::api::extractors::auth::AuthHost;
use crate::domain::services::calendar::booked_slots_csv;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;

pub async fn export_bookings_csv(
    State(state): State<Arc<AppState>>,
    AuthHost { host_id }: AuthHost,
) -> Result<impl IntoResponse, AppError> {
    let booked = state.slot_repo.list_booked(&host_id).await?;
    let csv = booked_slots_csv(&booked);

    // BOM so spreadsheet tools detect UTF-8.
    let body = format!("\u{feff}{csv}");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"google_calendar_import.csv\""),
        ],
        body,
    ))
}
