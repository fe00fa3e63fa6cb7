use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{ApiResult, ApprovalError};

/// Date range plus a daily time-of-day window.
///
/// The same `start_time..end_time` window recurs on every date in
/// `start_date..=effective_end_date()`. Per-day varying times are not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleWindow {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl ScheduleWindow {
    pub fn new(
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> ApiResult<Self> {
        let window = Self {
            start_date,
            end_date,
            start_time,
            end_time,
        };
        window.validate()?;
        Ok(window)
    }

    pub fn single_day(date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> ApiResult<Self> {
        Self::new(date, None, start_time, end_time)
    }

    /// Inclusive last day; a missing `end_date` means a single-day event.
    pub fn effective_end_date(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.start_date)
    }

    pub fn validate(&self) -> ApiResult<()> {
        if self.end_time <= self.start_time {
            return Err(ApprovalError::ValidationError(format!(
                "end time {} must be after start time {}",
                self.end_time, self.start_time
            )));
        }
        if let Some(end_date) = self.end_date {
            if end_date < self.start_date {
                return Err(ApprovalError::ValidationError(format!(
                    "end date {} must not precede start date {}",
                    end_date, self.start_date
                )));
            }
        }
        Ok(())
    }
}
