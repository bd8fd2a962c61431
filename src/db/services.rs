use crate::db::db::{Db, Table};
use crate::libs::error::{Result, ScheduleError};
use crate::libs::live::LiveQuery;
use crate::libs::service::Service;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

pub(crate) const SCHEMA_SERVICES: &str = "CREATE TABLE IF NOT EXISTS services (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    cost INTEGER,
    currency_code TEXT,
    default_duration_minutes INTEGER
)";
const INSERT_SERVICE: &str = "INSERT INTO services (name, cost, currency_code, default_duration_minutes) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_SERVICE: &str = "UPDATE services SET name = ?2, cost = ?3, currency_code = ?4, default_duration_minutes = ?5 WHERE id = ?1";
const DELETE_SERVICE: &str = "DELETE FROM services WHERE id = ?1";
const SELECT_SERVICE_BY_ID: &str = "SELECT id, name, cost, currency_code, default_duration_minutes FROM services WHERE id = ?1";
const SELECT_ALL_SERVICES: &str = "SELECT id, name, cost, currency_code, default_duration_minutes FROM services ORDER BY name ASC";
const SEARCH_SERVICES: &str = "SELECT id, name, cost, currency_code, default_duration_minutes FROM services
    WHERE name LIKE '%' || ?1 || '%' ORDER BY name ASC";

fn map_service(row: &Row) -> rusqlite::Result<Service> {
    Ok(Service {
        id: row.get(0)?,
        name: row.get(1)?,
        cost: row.get(2)?,
        currency_code: row.get(3)?,
        default_duration_minutes: row.get(4)?,
    })
}

/// Data access for the `services` table.
#[derive(Clone)]
pub struct Services {
    db: Db,
}

impl Services {
    pub fn new(db: &Db) -> Self {
        Services { db: db.clone() }
    }

    pub fn insert(&self, service: &Service) -> Result<i64> {
        let id = {
            let conn = self.db.conn();
            conn.execute(
                INSERT_SERVICE,
                params![service.name, service.cost, service.currency_code, service.default_duration_minutes],
            )?;
            conn.last_insert_rowid()
        };
        debug!(id, "service inserted");
        self.db.notify(&[Table::Services]);
        Ok(id)
    }

    pub fn update(&self, service: &Service) -> Result<()> {
        let id = service.id.ok_or_else(|| ScheduleError::validation("service has no id"))?;
        let affected = self.db.conn().execute(
            UPDATE_SERVICE,
            params![id, service.name, service.cost, service.currency_code, service.default_duration_minutes],
        )?;
        if affected == 0 {
            return Err(ScheduleError::not_found("Service", id));
        }
        debug!(id, "service updated");
        self.db.notify(&[Table::Services]);
        Ok(())
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let affected = self.db.conn().execute(DELETE_SERVICE, params![id])?;
        if affected == 0 {
            return Err(ScheduleError::not_found("Service", id));
        }
        debug!(id, "service deleted");
        self.db.notify(&[Table::Services, Table::Appointments]);
        Ok(())
    }

    /// Deletes all listed services in one transaction; ids that do not exist
    /// are skipped. Returns the number of rows removed.
    pub fn delete_many(&self, ids: &[i64]) -> Result<usize> {
        let deleted = self.db.transaction(|tx| {
            let mut deleted = 0;
            for id in ids {
                deleted += tx.execute(DELETE_SERVICE, params![id])?;
            }
            Ok(deleted)
        })?;
        debug!(deleted, "services deleted");
        if deleted > 0 {
            self.db.notify(&[Table::Services, Table::Appointments]);
        }
        Ok(deleted)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Service>> {
        self.db
            .conn()
            .query_row(SELECT_SERVICE_BY_ID, params![id], map_service)
            .optional()
            .map_err(Into::into)
    }

    pub fn list(&self) -> Result<Vec<Service>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(SELECT_ALL_SERVICES)?;
        let services = stmt.query_map([], map_service)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(services)
    }

    pub fn search(&self, query: &str) -> Result<Vec<Service>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(SEARCH_SERVICES)?;
        let services = stmt.query_map(params![query], map_service)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(services)
    }

    pub fn watch_all(&self) -> LiveQuery<Vec<Service>> {
        let services = self.clone();
        LiveQuery::new(&self.db, &[Table::Services], move || services.list())
    }
}
