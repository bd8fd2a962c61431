//! Cell rendering for the schedule table.
//!
//! Each [`ColumnKind`] knows how to turn an appointment (plus its client and
//! service) into display text. The dispatch is an exhaustive `match`, so a
//! new column kind does not compile until it has a renderer. Stored column
//! ids this build does not recognise render as [`PLACEHOLDER_UNKNOWN`].

use crate::libs::appointment::{date_of_day_index, Appointment};
use crate::libs::client::Client;
use crate::libs::column::{ColumnConfiguration, ColumnKind};
use crate::libs::service::Service;
use chrono::{FixedOffset, Offset, TimeZone, Utc};

pub const PLACEHOLDER_UNKNOWN: &str = "?";
pub const PLACEHOLDER_MISSING: &str = "-";

pub const DATE_FORMAT: &str = "%d.%m.%Y";
pub const TIME_FORMAT: &str = "%H:%M";
pub const DURATION_SUFFIX: &str = "min";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Offset applied to start instants before printing the clock time.
    pub offset: FixedOffset,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions { offset: Utc.fix() }
    }
}

impl RenderOptions {
    /// Options for an offset east of UTC in minutes; out-of-range offsets
    /// fall back to UTC.
    pub fn with_offset_minutes(minutes: i32) -> Self {
        let offset = minutes.checked_mul(60).and_then(FixedOffset::east_opt).unwrap_or_else(|| Utc.fix());
        RenderOptions { offset }
    }
}

/// An appointment together with the entities its foreign keys point at.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    pub appointment: &'a Appointment,
    pub client: Option<&'a Client>,
    pub service: Option<&'a Service>,
}

impl ColumnKind {
    pub fn render(&self, row: &RowContext<'_>, options: &RenderOptions) -> String {
        let appointment = row.appointment;
        match self {
            ColumnKind::Date => match date_of_day_index(appointment.date) {
                Some(date) => date.format(DATE_FORMAT).to_string(),
                None => PLACEHOLDER_UNKNOWN.to_string(),
            },
            ColumnKind::Client => row
                .client
                .and_then(|client| client.name.as_deref())
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(PLACEHOLDER_MISSING)
                .to_string(),
            ColumnKind::Time => match Utc.timestamp_millis_opt(appointment.start_time_millis).single() {
                Some(start) => start.with_timezone(&options.offset).format(TIME_FORMAT).to_string(),
                None => PLACEHOLDER_UNKNOWN.to_string(),
            },
            ColumnKind::Duration => format!("{} {}", appointment.duration_minutes, DURATION_SUFFIX),
            ColumnKind::Service => row.service.map(|service| service.name.clone()).unwrap_or_else(|| PLACEHOLDER_MISSING.to_string()),
            ColumnKind::Notes => appointment.notes.clone().unwrap_or_default(),
            ColumnKind::Contacts => match row.client {
                Some(client) => client.contacts().join(", "),
                None => PLACEHOLDER_MISSING.to_string(),
            },
            ColumnKind::Cost => format_cost(appointment.cost, appointment.currency_code.as_deref()),
            ColumnKind::Status => appointment.status.clone(),
            ColumnKind::Optional1 => appointment.optional_field1_value.clone().unwrap_or_default(),
            ColumnKind::Optional2 => appointment.optional_field2_value.clone().unwrap_or_default(),
        }
    }
}

/// `1050, Some("USD")` → `"10.50 USD"`; no cost → `""`.
pub fn format_cost(cost: Option<i64>, currency_code: Option<&str>) -> String {
    let Some(cost) = cost else {
        return String::new();
    };
    let sign = if cost < 0 { "-" } else { "" };
    let minor = cost.unsigned_abs();
    let amount = format!("{sign}{}.{:02}", minor / 100, minor % 100);

    match currency_code.map(str::trim).filter(|code| !code.is_empty()) {
        Some(code) => format!("{amount} {code}"),
        None => amount,
    }
}

/// Parses `"10.50"`, `"10,5"` or `"10"` into minor units. More than two
/// decimals or anything non-numeric yields `None`.
pub fn parse_cost(input: &str) -> Option<i64> {
    let input = input.trim();
    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    let (whole, fraction) = match digits.split_once(['.', ',']) {
        Some((whole, fraction)) => (whole, fraction),
        None => (digits, ""),
    };
    if whole.is_empty() || fraction.len() > 2 || !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let whole: i64 = whole.parse().ok()?;
    let cents: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };
    let minor = whole.checked_mul(100)?.checked_add(cents)?;
    Some(if negative { -minor } else { minor })
}

/// Produces one cell per configured column, in the order given.
#[derive(Debug, Clone, Default)]
pub struct RowRenderer {
    options: RenderOptions,
}

impl RowRenderer {
    pub fn new(options: RenderOptions) -> Self {
        RowRenderer { options }
    }

    pub fn render_cell(&self, column: &ColumnConfiguration, row: &RowContext<'_>) -> String {
        match column.kind() {
            Some(kind) => kind.render(row, &self.options),
            None => PLACEHOLDER_UNKNOWN.to_string(),
        }
    }

    pub fn render_row(&self, columns: &[ColumnConfiguration], row: &RowContext<'_>) -> Vec<String> {
        columns.iter().map(|column| self.render_cell(column, row)).collect()
    }
}
