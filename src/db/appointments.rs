use crate::db::db::{Db, Table};
use crate::libs::appointment::{Appointment, AppointmentFilter};
use crate::libs::column::ColumnKind;
use crate::libs::error::{Result, ScheduleError};
use crate::libs::live::LiveQuery;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

pub(crate) const SCHEMA_APPOINTMENTS: &str = "CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id INTEGER REFERENCES clients(id) ON DELETE SET NULL,
    service_id INTEGER REFERENCES services(id) ON DELETE SET NULL,
    date INTEGER NOT NULL,
    start_time_millis INTEGER NOT NULL,
    duration_minutes INTEGER NOT NULL,
    notes TEXT,
    cost INTEGER,
    currency_code TEXT,
    status TEXT NOT NULL DEFAULT 'Scheduled',
    optional_field1_value TEXT,
    optional_field2_value TEXT
)";
const COLUMNS: &str = "id, client_id, service_id, date, start_time_millis, duration_minutes, notes, cost, currency_code, status, \
     optional_field1_value, optional_field2_value";
const INSERT_APPOINTMENT: &str = "INSERT INTO appointments (client_id, service_id, date, start_time_millis, duration_minutes, notes, \
     cost, currency_code, status, optional_field1_value, optional_field2_value) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
const UPDATE_APPOINTMENT: &str = "UPDATE appointments SET client_id = ?2, service_id = ?3, date = ?4, start_time_millis = ?5, \
     duration_minutes = ?6, notes = ?7, cost = ?8, currency_code = ?9, status = ?10, optional_field1_value = ?11, \
     optional_field2_value = ?12 WHERE id = ?1";
const UPDATE_OPTIONAL_1: &str = "UPDATE appointments SET optional_field1_value = ?2 WHERE id = ?1";
const UPDATE_OPTIONAL_2: &str = "UPDATE appointments SET optional_field2_value = ?2 WHERE id = ?1";
const DELETE_APPOINTMENT: &str = "DELETE FROM appointments WHERE id = ?1";
const ORDER_NEWEST_FIRST: &str = "ORDER BY date DESC, start_time_millis DESC, id DESC";

fn map_appointment(row: &Row) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        client_id: row.get(1)?,
        service_id: row.get(2)?,
        date: row.get(3)?,
        start_time_millis: row.get(4)?,
        duration_minutes: row.get(5)?,
        notes: row.get(6)?,
        cost: row.get(7)?,
        currency_code: row.get(8)?,
        status: row.get(9)?,
        optional_field1_value: row.get(10)?,
        optional_field2_value: row.get(11)?,
    })
}

/// Data access for the `appointments` table.
#[derive(Clone)]
pub struct Appointments {
    db: Db,
}

impl Appointments {
    pub fn new(db: &Db) -> Self {
        Appointments { db: db.clone() }
    }

    /// Inserts the appointment and returns its id. A client or service id
    /// that does not exist fails with a foreign key violation.
    pub fn insert(&self, appointment: &Appointment) -> Result<i64> {
        let id = {
            let conn = self.db.conn();
            conn.execute(
                INSERT_APPOINTMENT,
                params![
                    appointment.client_id,
                    appointment.service_id,
                    appointment.date,
                    appointment.start_time_millis,
                    appointment.duration_minutes,
                    appointment.notes,
                    appointment.cost,
                    appointment.currency_code,
                    appointment.status,
                    appointment.optional_field1_value,
                    appointment.optional_field2_value,
                ],
            )?;
            conn.last_insert_rowid()
        };
        debug!(id, date = appointment.date, "appointment inserted");
        self.db.notify(&[Table::Appointments]);
        Ok(id)
    }

    pub fn update(&self, appointment: &Appointment) -> Result<()> {
        let id = appointment.id.ok_or_else(|| ScheduleError::validation("appointment has no id"))?;
        let affected = self.db.conn().execute(
            UPDATE_APPOINTMENT,
            params![
                id,
                appointment.client_id,
                appointment.service_id,
                appointment.date,
                appointment.start_time_millis,
                appointment.duration_minutes,
                appointment.notes,
                appointment.cost,
                appointment.currency_code,
                appointment.status,
                appointment.optional_field1_value,
                appointment.optional_field2_value,
            ],
        )?;
        if affected == 0 {
            return Err(ScheduleError::not_found("Appointment", id));
        }
        debug!(id, "appointment updated");
        self.db.notify(&[Table::Appointments]);
        Ok(())
    }

    /// Writes the value of one optional column cell.
    pub fn set_optional_value(&self, id: i64, kind: ColumnKind, value: Option<&str>) -> Result<()> {
        let sql = match kind {
            ColumnKind::Optional1 => UPDATE_OPTIONAL_1,
            ColumnKind::Optional2 => UPDATE_OPTIONAL_2,
            other => return Err(ScheduleError::validation(format!("column '{other}' is not a free-text column"))),
        };
        let affected = self.db.conn().execute(sql, params![id, value])?;
        if affected == 0 {
            return Err(ScheduleError::not_found("Appointment", id));
        }
        debug!(id, column = %kind, "optional value updated");
        self.db.notify(&[Table::Appointments]);
        Ok(())
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let affected = self.db.conn().execute(DELETE_APPOINTMENT, params![id])?;
        if affected == 0 {
            return Err(ScheduleError::not_found("Appointment", id));
        }
        debug!(id, "appointment deleted");
        self.db.notify(&[Table::Appointments]);
        Ok(())
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Appointment>> {
        let sql = format!("SELECT {COLUMNS} FROM appointments WHERE id = ?1");
        self.db
            .conn()
            .query_row(&sql, params![id], map_appointment)
            .optional()
            .map_err(Into::into)
    }

    /// Appointments of one client, newest first.
    pub fn for_client(&self, client_id: i64) -> Result<Vec<Appointment>> {
        let sql = format!("SELECT {COLUMNS} FROM appointments WHERE client_id = ?1 {ORDER_NEWEST_FIRST}");
        let conn = self.db.conn();
        let mut stmt = conn.prepare(&sql)?;
        let appointments = stmt.query_map(params![client_id], map_appointment)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(appointments)
    }

    pub fn watch_for_client(&self, client_id: i64) -> LiveQuery<Vec<Appointment>> {
        let appointments = self.clone();
        LiveQuery::new(&self.db, &[Table::Appointments], move || appointments.for_client(client_id))
    }

    /// One window of the feed, newest first, restricted by `filter`.
    pub fn page(&self, filter: AppointmentFilter, limit: usize, offset: usize) -> Result<Vec<Appointment>> {
        // Nothing lives beyond what an i64 offset can address
        let Ok(offset) = i64::try_from(offset) else {
            return Ok(Vec::new());
        };
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let conn = self.db.conn();
        let appointments = match filter.day_range()? {
            Some((from, to)) => {
                let sql = format!("SELECT {COLUMNS} FROM appointments WHERE date >= ?1 AND date < ?2 {ORDER_NEWEST_FIRST} LIMIT ?3 OFFSET ?4");
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(params![from, to, limit, offset], map_appointment)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let sql = format!("SELECT {COLUMNS} FROM appointments {ORDER_NEWEST_FIRST} LIMIT ?1 OFFSET ?2");
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(params![limit, offset], map_appointment)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };
        Ok(appointments)
    }

    pub fn count(&self, filter: AppointmentFilter) -> Result<usize> {
        let conn = self.db.conn();
        let count: i64 = match filter.day_range()? {
            Some((from, to)) => conn.query_row(
                "SELECT COUNT(*) FROM appointments WHERE date >= ?1 AND date < ?2",
                params![from, to],
                |row| row.get(0),
            )?,
            None => conn.query_row("SELECT COUNT(*) FROM appointments", [], |row| row.get(0))?,
        };
        Ok(count as usize)
    }
}
