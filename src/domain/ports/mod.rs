use crate::domain::models::{host::Host, slot::{GuestDetails, TimeSlot}};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Slots ordered by date then start time; all owners when `owner_id`
    /// is `None`.
    async fn list(&self, owner_id: Option<&str>) -> Result<Vec<TimeSlot>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<TimeSlot>, AppError>;
    async fn insert_many(&self, slots: &[TimeSlot]) -> Result<Vec<TimeSlot>, AppError>;
    async fn list_booked(&self, owner_id: &str) -> Result<Vec<TimeSlot>, AppError>;
    /// Transitions the slot to booked only if it is currently unbooked.
    /// The guard is evaluated by the storage backend in the same
    /// statement as the write; losing the race yields `AlreadyBooked`.
    async fn book(&self, id: &str, guest: &GuestDetails, booked_at: DateTime<Utc>) -> Result<TimeSlot, AppError>;
    /// Clears the booking and returns the slot to available. A no-op on
    /// a slot that is not booked.
    async fn cancel(&self, id: &str) -> Result<TimeSlot, AppError>;
    async fn set_availability(&self, id: &str, is_available: bool) -> Result<TimeSlot, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait HostRepository: Send + Sync {
    async fn create(&self, host: &Host) -> Result<Host, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Host>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Host>, AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// Pushed to subscribers after every mutation of the slot table.
/// Carries the changed row's identity only; listeners re-read the slot
/// list from storage rather than trusting local state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotChange {
    pub kind: ChangeKind,
    pub owner_id: String,
    pub slot_id: String,
}

pub trait ChangeNotifier: Send + Sync {
    fn publish(&self, change: SlotChange);
    fn subscribe(&self) -> broadcast::Receiver<SlotChange>;
}
