use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterHostRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct NewSlotRequest {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Deserialize)]
pub struct CreateSlotsRequest {
    pub slots: Vec<NewSlotRequest>,
}

#[derive(Deserialize)]
pub struct GenerateSlotsRequest {
    pub date: NaiveDate,
    pub window_start: u32,
    pub window_end: u32,
    pub granularity_min: u32,
}

#[derive(Deserialize)]
pub struct BookSlotRequest {
    pub guest_name: String,
    pub guest_email: String,
    pub guest_note: Option<String>,
}

#[derive(Deserialize)]
pub struct SetAvailabilityRequest {
    pub is_available: bool,
}

#[derive(Deserialize)]
pub struct ListSlotsQuery {
    pub owner_id: Option<String>,
    pub date: Option<NaiveDate>,
}
