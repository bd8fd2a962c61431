//! Column configuration model for the schedule table.
//!
//! A [`ColumnConfiguration`] row decides, per screen, whether a column is
//! shown, where it sits and what its header says. The behaviour of a column
//! (which appointment data it renders) is decided by its [`ColumnKind`],
//! parsed from the stored `column_id`.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const SCREEN_SCHEDULE: &str = "schedule";

/// Title given to the optional columns until the user renames them.
pub const OPTIONAL_COLUMN_TITLE: &str = "New column";

/// Every column the schedule table knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Date,
    Client,
    Time,
    Duration,
    Service,
    Notes,
    Contacts,
    Cost,
    Status,
    Optional1,
    Optional2,
}

impl ColumnKind {
    pub const ALL: [ColumnKind; 11] = [
        ColumnKind::Date,
        ColumnKind::Client,
        ColumnKind::Time,
        ColumnKind::Duration,
        ColumnKind::Service,
        ColumnKind::Notes,
        ColumnKind::Contacts,
        ColumnKind::Cost,
        ColumnKind::Status,
        ColumnKind::Optional1,
        ColumnKind::Optional2,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ColumnKind::Date => "date",
            ColumnKind::Client => "client",
            ColumnKind::Time => "time",
            ColumnKind::Duration => "duration",
            ColumnKind::Service => "service",
            ColumnKind::Notes => "notes",
            ColumnKind::Contacts => "contacts",
            ColumnKind::Cost => "cost",
            ColumnKind::Status => "status",
            ColumnKind::Optional1 => "optional_1",
            ColumnKind::Optional2 => "optional_2",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Appointment field backing the column, `None` for columns that need
    /// the related client or service.
    pub fn data_field_name(&self) -> Option<&'static str> {
        match self {
            ColumnKind::Date => Some("date"),
            ColumnKind::Time => Some("startTimeMillis"),
            ColumnKind::Duration => Some("durationMinutes"),
            ColumnKind::Notes => Some("notes"),
            ColumnKind::Cost => Some("cost"),
            ColumnKind::Status => Some("status"),
            ColumnKind::Optional1 => Some("optionalField1Value"),
            ColumnKind::Optional2 => Some("optionalField2Value"),
            ColumnKind::Client | ColumnKind::Service | ColumnKind::Contacts => None,
        }
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            ColumnKind::Date => "Date",
            ColumnKind::Client => "Client",
            ColumnKind::Time => "Time",
            ColumnKind::Duration => "Duration",
            ColumnKind::Service => "Service",
            ColumnKind::Notes => "Notes",
            ColumnKind::Contacts => "Contacts",
            ColumnKind::Cost => "Cost",
            ColumnKind::Status => "Status",
            ColumnKind::Optional1 | ColumnKind::Optional2 => OPTIONAL_COLUMN_TITLE,
        }
    }

    /// Only the two user-defined columns may be renamed.
    pub fn is_optional(&self) -> bool {
        matches!(self, ColumnKind::Optional1 | ColumnKind::Optional2)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Stored configuration of one column on one screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfiguration {
    pub column_id: String,
    pub screen_name: String,
    pub user_title: String,
    pub is_visible: bool,
    pub display_order: i32,
    pub data_field_name: Option<String>,
}

impl ColumnConfiguration {
    pub fn new(kind: ColumnKind, screen_name: &str, is_visible: bool, display_order: i32) -> Self {
        ColumnConfiguration {
            column_id: kind.id().to_string(),
            screen_name: screen_name.to_string(),
            user_title: kind.default_title().to_string(),
            is_visible,
            display_order,
            data_field_name: kind.data_field_name().map(str::to_string),
        }
    }

    /// `None` for identifiers this build does not know about.
    pub fn kind(&self) -> Option<ColumnKind> {
        ColumnKind::from_id(&self.column_id)
    }
}

/// Columns of the schedule screen as they are on a fresh database: nine
/// visible built-in columns followed by the two hidden optional ones.
pub fn initial_schedule_config() -> Vec<ColumnConfiguration> {
    ColumnKind::ALL
        .into_iter()
        .enumerate()
        .map(|(order, kind)| ColumnConfiguration::new(kind, SCREEN_SCHEDULE, !kind.is_optional(), order as i32))
        .collect()
}
