use crate::libs::error::{Result, ScheduleError};
use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_STATUS: &str = "Scheduled";

/// Milliseconds in one day; `date` columns are stored as whole days since
/// the Unix epoch.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// One booked visit. `date` is a day index, `start_time_millis` the exact
/// UTC start instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Option<i64>,
    pub client_id: Option<i64>,
    pub service_id: Option<i64>,
    pub date: i64,
    pub start_time_millis: i64,
    pub duration_minutes: i32,
    pub notes: Option<String>,
    /// Final price in minor units, may differ from the service's list price.
    pub cost: Option<i64>,
    pub currency_code: Option<String>,
    pub status: String,
    pub optional_field1_value: Option<String>,
    pub optional_field2_value: Option<String>,
}

impl Appointment {
    /// New appointment starting at `start` (UTC), with the date derived
    /// from the same instant.
    pub fn new(start: NaiveDateTime, duration_minutes: i32) -> Self {
        Appointment {
            id: None,
            client_id: None,
            service_id: None,
            date: day_index(start.date()),
            start_time_millis: start.and_utc().timestamp_millis(),
            duration_minutes,
            notes: None,
            cost: None,
            currency_code: None,
            status: DEFAULT_STATUS.to_string(),
            optional_field1_value: None,
            optional_field2_value: None,
        }
    }

    /// Appointment on calendar day `date` at wall-clock `time` in `offset`.
    /// The day index follows the calendar day even when the UTC instant
    /// falls on a neighbouring day.
    pub fn scheduled(date: NaiveDate, time: NaiveTime, offset: FixedOffset, duration_minutes: i32) -> Result<Self> {
        let start = offset
            .from_local_datetime(&date.and_time(time))
            .single()
            .ok_or_else(|| ScheduleError::validation(format!("{date} {time} does not exist at offset {offset}")))?;
        let mut appointment = Appointment::new(start.naive_utc(), duration_minutes);
        appointment.date = day_index(date);
        Ok(appointment)
    }

    pub fn with_client(mut self, client_id: i64) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn with_service(mut self, service_id: i64) -> Self {
        self.service_id = Some(service_id);
        self
    }

    pub fn with_cost(mut self, cost: i64, currency_code: &str) -> Self {
        self.cost = Some(cost);
        self.currency_code = Some(currency_code.to_string());
        self
    }

    pub fn calendar_date(&self) -> Option<NaiveDate> {
        date_of_day_index(self.date)
    }
}

/// Filter applied to the paged appointment feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentFilter {
    All,
    /// Calendar month, `month` in 1..=12.
    Month { year: i32, month: u32 },
}

impl AppointmentFilter {
    /// Half-open day-index range `[from, to)` selected by the filter, or
    /// `None` when every appointment matches.
    pub fn day_range(&self) -> Result<Option<(i64, i64)>> {
        match *self {
            AppointmentFilter::All => Ok(None),
            AppointmentFilter::Month { year, month } => month_day_range(year, month).map(Some),
        }
    }
}

pub fn day_index(date: NaiveDate) -> i64 {
    start_of_day_millis(date).div_euclid(MILLIS_PER_DAY)
}

pub fn date_of_day_index(days: i64) -> Option<NaiveDate> {
    Utc.timestamp_millis_opt(days.checked_mul(MILLIS_PER_DAY)?).single().map(|dt| dt.date_naive())
}

/// Midnight UTC of `date`, in milliseconds.
pub fn start_of_day_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::default()).and_utc().timestamp_millis()
}

pub fn month_day_range(year: i32, month: u32) -> Result<(i64, i64)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| ScheduleError::validation(format!("invalid month {year}-{month}")))?;
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| ScheduleError::validation(format!("month {year}-{month} is out of range")))?;

    Ok((day_index(first), day_index(next)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_index_matches_epoch_days() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(day_index(date), 19723);
        assert_eq!(date_of_day_index(19723), Some(date));
    }

    #[test]
    fn december_range_rolls_over_the_year() {
        let (from, to) = month_day_range(2023, 12).unwrap();
        assert_eq!(to - from, 31);
        assert_eq!(to, 19723);
    }

    #[test]
    fn month_out_of_range_is_rejected() {
        assert!(matches!(month_day_range(2024, 13), Err(ScheduleError::Validation(_))));
        assert!(matches!(month_day_range(2024, 0), Err(ScheduleError::Validation(_))));
    }

    #[test]
    fn scheduled_keeps_calendar_day_across_offsets() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let time = NaiveTime::from_hms_opt(1, 0, 0).unwrap();
        let offset = FixedOffset::east_opt(3 * 3600).unwrap();

        let appointment = Appointment::scheduled(date, time, offset, 30).unwrap();
        assert_eq!(appointment.calendar_date(), Some(date));
        assert_eq!(appointment.start_time_millis, start_of_day_millis(date) - 2 * 3_600_000);
    }

    #[test]
    fn new_appointment_derives_date_from_start() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(14, 30, 0).unwrap();
        let appointment = Appointment::new(start, 60);
        assert_eq!(appointment.calendar_date(), Some(start.date()));
        assert_eq!(appointment.status, DEFAULT_STATUS);
        assert_eq!(appointment.start_time_millis, start_of_day_millis(start.date()) + (14 * 60 + 30) * 60_000);
    }
}
