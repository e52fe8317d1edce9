use chrono::{NaiveDate, NaiveTime};
use crate::domain::models::slot::CandidateSlot;
use crate::error::AppError;

pub const MAX_GRANULARITY_MIN: u32 = 1440;

/// Expands a working window on a single date into fixed-length candidate
/// slots at the requested granularity.
///
/// Hours iterate from `window_start` to `window_end - 1`; within each
/// hour the start minute steps from 0 by `granularity_min`. An interval
/// that crosses its hour is clipped to the next hour boundary, and a
/// candidate whose end hour would exceed `window_end` is dropped
/// entirely. The result is ordered by start time and pairwise
/// non-overlapping.
pub fn generate_slots(
    date: NaiveDate,
    window_start: u32,
    window_end: u32,
    granularity_min: u32,
) -> Result<Vec<CandidateSlot>, AppError> {
    if window_start > 23 || window_end > 23 {
        return Err(AppError::InvalidTimeWindow(
            "Window bounds must be hours between 0 and 23".into(),
        ));
    }
    if window_start >= window_end {
        return Err(AppError::InvalidTimeWindow(
            "Window start must be before window end".into(),
        ));
    }
    if granularity_min == 0 || granularity_min > MAX_GRANULARITY_MIN {
        return Err(AppError::InvalidTimeWindow(
            "Granularity must be between 1 and 1440 minutes".into(),
        ));
    }

    let mut candidates = Vec::new();

    for hour in window_start..window_end {
        let mut minute = 0;
        while minute < 60 {
            let end_minute = minute + granularity_min;
            let (end_hour, end_minute) = if end_minute >= 60 {
                (hour + 1, 0)
            } else {
                (hour, end_minute)
            };

            if end_hour <= window_end {
                candidates.push(CandidateSlot {
                    date,
                    start_time: NaiveTime::from_hms_opt(hour, minute, 0).unwrap(),
                    end_time: NaiveTime::from_hms_opt(end_hour, end_minute, 0).unwrap(),
                });
            }

            minute += granularity_min;
        }
    }

    Ok(candidates)
}
