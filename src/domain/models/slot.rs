use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;

/// A bookable meeting slot. Guest fields and `is_booked` are always
/// written and cleared together; `is_available` is an independent
/// host-controlled visibility flag and may be false on a booked slot.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TimeSlot {
    pub id: String,
    pub owner_id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub is_booked: bool,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_note: Option<String>,
    pub booked_at: Option<DateTime<Utc>>,
    pub booked_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A not-yet-persisted slot, either produced by the generator or taken
/// from an explicit create request.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CandidateSlot {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone)]
pub struct GuestDetails {
    pub name: String,
    pub email: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Available,
    Hidden,
    Booked,
}

impl TimeSlot {
    pub fn new(owner_id: String, candidate: CandidateSlot) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            date: candidate.date,
            start_time: candidate.start_time,
            end_time: candidate.end_time,
            is_available: true,
            is_booked: false,
            guest_name: None,
            guest_email: None,
            guest_note: None,
            booked_at: None,
            booked_by: None,
            created_at: Utc::now(),
        }
    }

    /// Booking wins over visibility: a booked slot is `Booked` even
    /// while hidden.
    pub fn state(&self) -> SlotState {
        if self.is_booked {
            SlotState::Booked
        } else if self.is_available {
            SlotState::Available
        } else {
            SlotState::Hidden
        }
    }
}
