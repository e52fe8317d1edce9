use crate::domain::{models::slot::{GuestDetails, TimeSlot}, ports::SlotRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqliteSlotRepo {
    pool: SqlitePool,
}

impl SqliteSlotRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotRepository for SqliteSlotRepo {
    async fn list(&self, owner_id: Option<&str>) -> Result<Vec<TimeSlot>, AppError> {
        match owner_id {
            Some(owner) => sqlx::query_as::<_, TimeSlot>("SELECT * FROM time_slots WHERE owner_id = ? ORDER BY date, start_time").bind(owner).fetch_all(&self.pool).await.map_err(AppError::Database),
            None => sqlx::query_as::<_, TimeSlot>("SELECT * FROM time_slots ORDER BY date, start_time").fetch_all(&self.pool).await.map_err(AppError::Database),
        }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<TimeSlot>, AppError> {
        sqlx::query_as::<_, TimeSlot>("SELECT * FROM time_slots WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn insert_many(&self, slots: &[TimeSlot]) -> Result<Vec<TimeSlot>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let mut created = Vec::with_capacity(slots.len());
        for slot in slots {
            let row = sqlx::query_as::<_, TimeSlot>(
                "INSERT INTO time_slots (id, owner_id, date, start_time, end_time, is_available, is_booked, guest_name, guest_email, guest_note, booked_at, booked_by, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *")
                .bind(&slot.id).bind(&slot.owner_id).bind(slot.date).bind(slot.start_time).bind(slot.end_time).bind(slot.is_available).bind(slot.is_booked).bind(&slot.guest_name).bind(&slot.guest_email).bind(&slot.guest_note).bind(slot.booked_at).bind(&slot.booked_by).bind(slot.created_at)
                .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
            created.push(row);
        }
        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn list_booked(&self, owner_id: &str) -> Result<Vec<TimeSlot>, AppError> {
        sqlx::query_as::<_, TimeSlot>("SELECT * FROM time_slots WHERE owner_id = ? AND is_booked = TRUE ORDER BY date, start_time").bind(owner_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn book(&self, id: &str, guest: &GuestDetails, booked_at: DateTime<Utc>) -> Result<TimeSlot, AppError> {
        // The unbooked predicate rides in the UPDATE itself; whoever
        // matches the row first wins the slot.
        let updated = sqlx::query_as::<_, TimeSlot>(
            "UPDATE time_slots SET is_booked = TRUE, guest_name = ?, guest_email = ?, guest_note = ?, booked_at = ?, booked_by = ?
             WHERE id = ? AND is_booked = FALSE RETURNING *")
            .bind(&guest.name).bind(&guest.email).bind(&guest.note).bind(booked_at).bind(&guest.email).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?;

        match updated {
            Some(slot) => Ok(slot),
            None => match self.find_by_id(id).await? {
                Some(_) => Err(AppError::AlreadyBooked),
                None => Err(AppError::NotFound("Slot not found".into())),
            },
        }
    }

    async fn cancel(&self, id: &str) -> Result<TimeSlot, AppError> {
        sqlx::query_as::<_, TimeSlot>(
            "UPDATE time_slots SET is_booked = FALSE, is_available = TRUE, guest_name = NULL, guest_email = NULL, guest_note = NULL, booked_at = NULL, booked_by = NULL
             WHERE id = ? RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Slot not found".into()))
    }

    async fn set_availability(&self, id: &str, is_available: bool) -> Result<TimeSlot, AppError> {
        sqlx::query_as::<_, TimeSlot>("UPDATE time_slots SET is_available = ? WHERE id = ? RETURNING *")
            .bind(is_available).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Slot not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM time_slots WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Slot not found".into()));
        }
        Ok(())
    }
}
