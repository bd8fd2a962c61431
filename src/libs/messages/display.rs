//! Text for every [`Message`] variant.
//!
//! All wording is kept in this one `match`, so adding a variant fails to
//! compile until it has a text.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CLIENT MESSAGES ===
            Message::ClientCreated(id) => format!("Client created with ID: {}", id),
            Message::ClientUpdated(id) => format!("Client {} updated", id),
            Message::ClientDeleted(id) => format!("Client {} deleted", id),
            Message::ClientNotFound(id) => format!("Client with ID {} not found", id),
            Message::ClientsHeader => "Clients:".to_string(),
            Message::ClientAppointmentsHeader(name) => format!("Appointments of {}:", name),
            Message::NoClientsFound => "No clients found".to_string(),
            Message::ConfirmDeleteClient(name) => format!("Delete client '{}'? Their appointments are kept without a client", name),

            // === SERVICE MESSAGES ===
            Message::ServiceCreated(id) => format!("Service created with ID: {}", id),
            Message::ServiceUpdated(id) => format!("Service {} updated", id),
            Message::ServiceNotFound(id) => format!("Service with ID {} not found", id),
            Message::ServicesDeletedCount(count) => format!("Deleted {} service(s)", count),
            Message::ServicesHeader => "Services:".to_string(),
            Message::NoServicesFound => "No services found".to_string(),
            Message::NoServiceIdsProvided => "No service IDs provided".to_string(),
            Message::ConfirmDeleteServices(count) => format!("Delete {} service(s)?", count),

            // === APPOINTMENT MESSAGES ===
            Message::AppointmentCreated(id) => format!("Appointment created with ID: {}", id),
            Message::AppointmentUpdated(id) => format!("Appointment {} updated", id),
            Message::AppointmentDeleted(id) => format!("Appointment {} deleted", id),
            Message::AppointmentNotFound(id) => format!("Appointment with ID {} not found", id),
            Message::OptionalValueSet(id, title) => format!("'{}' of appointment {} updated", title, id),
            Message::ConfirmDeleteAppointment(id) => format!("Delete appointment {}?", id),
            Message::DurationRequired => "Duration is required when the service has no default duration".to_string(),
            Message::InvalidCost(input) => format!("Invalid cost '{}', expected e.g. 30 or 12.50", input),
            Message::InvalidDate(input) => format!("Invalid date '{}', expected YYYY-MM-DD", input),
            Message::InvalidTime(input) => format!("Invalid time '{}', expected HH:MM", input),

            // === COLUMN MESSAGES ===
            Message::ColumnShown(title) => format!("Column '{}' is now visible", title),
            Message::ColumnHidden(title) => format!("Column '{}' is now hidden", title),
            Message::ColumnRenamed(old, new) => format!("Column '{}' renamed to '{}'", old, new),
            Message::ColumnRenameRejected(id) => format!("Column '{}' is built in and cannot be renamed", id),
            Message::ColumnNotEditable(title) => format!("Column '{}' is not a free-text column", title),
            Message::EmptyColumnTitle => "Column title must not be empty".to_string(),
            Message::ColumnNotFound(id) => format!("Column '{}' not found", id),
            Message::ColumnsReset => "Schedule columns restored to defaults".to_string(),
            Message::VisibleColumnsHeader => "Visible columns:".to_string(),
            Message::HiddenColumnsHeader => "Hidden columns:".to_string(),
            Message::NoHiddenColumns => "No hidden columns".to_string(),

            // === SCHEDULE MESSAGES ===
            Message::ScheduleHeader(period) => format!("Schedule for {}", period),
            Message::ScheduleAllTime => "Schedule, all appointments".to_string(),
            Message::NoAppointments => "No appointments found".to_string(),
            Message::PageFooter(page, has_more) => {
                if *has_more {
                    format!("Page {}, more with --page {}", page, page + 1)
                } else {
                    format!("Page {} (last)", page)
                }
            }
            Message::FilterSet(year, month) => format!("Showing {:02}.{}", month, year),
            Message::ScheduleExported(path) => format!("Schedule exported to: {}", path),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleDatabase => "Database settings".to_string(),
            Message::ConfigModuleDisplay => "Display settings".to_string(),
            Message::ConfigModulePaging => "Paging settings".to_string(),
            Message::PromptDatabasePath => "Database file (empty for default location)".to_string(),
            Message::PromptUtcOffset => "UTC offset for times, in minutes".to_string(),
            Message::PromptPageSize => "Appointments per page".to_string(),
            Message::DatabaseLocation(path) => format!("Database: {}", path),

            // === MIGRATION MESSAGES ===
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };

        write!(f, "{}", text)
    }
}
