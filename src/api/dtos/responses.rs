use serde::Serialize;
use crate::domain::models::slot::TimeSlot;

#[derive(Serialize)]
pub struct CreatedSlotsResponse {
    pub count: usize,
    pub slots: Vec<TimeSlot>,
}
