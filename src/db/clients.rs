use crate::db::db::{Db, Table};
use crate::libs::client::Client;
use crate::libs::error::{Result, ScheduleError};
use crate::libs::live::LiveQuery;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

pub(crate) const SCHEMA_CLIENTS: &str = "CREATE TABLE IF NOT EXISTS clients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    phone TEXT,
    telegram TEXT,
    viber TEXT,
    whatsapp TEXT,
    instagram TEXT,
    notes TEXT
)";
const INSERT_CLIENT: &str =
    "INSERT INTO clients (name, phone, telegram, viber, whatsapp, instagram, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPDATE_CLIENT: &str = "UPDATE clients
    SET name = ?2, phone = ?3, telegram = ?4, viber = ?5, whatsapp = ?6, instagram = ?7, notes = ?8
    WHERE id = ?1";
const DELETE_CLIENT: &str = "DELETE FROM clients WHERE id = ?1";
const SELECT_CLIENT_BY_ID: &str = "SELECT id, name, phone, telegram, viber, whatsapp, instagram, notes FROM clients WHERE id = ?1";
const SELECT_ALL_CLIENTS: &str = "SELECT id, name, phone, telegram, viber, whatsapp, instagram, notes FROM clients ORDER BY name ASC";
const SEARCH_CLIENTS: &str = "SELECT id, name, phone, telegram, viber, whatsapp, instagram, notes FROM clients
    WHERE name LIKE '%' || ?1 || '%' ORDER BY name ASC";

fn map_client(row: &Row) -> rusqlite::Result<Client> {
    Ok(Client {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        telegram: row.get(3)?,
        viber: row.get(4)?,
        whatsapp: row.get(5)?,
        instagram: row.get(6)?,
        notes: row.get(7)?,
    })
}

/// Data access for the `clients` table.
#[derive(Clone)]
pub struct Clients {
    db: Db,
}

impl Clients {
    pub fn new(db: &Db) -> Self {
        Clients { db: db.clone() }
    }

    /// Inserts the client and returns its new id.
    pub fn insert(&self, client: &Client) -> Result<i64> {
        let id = {
            let conn = self.db.conn();
            conn.execute(
                INSERT_CLIENT,
                params![client.name, client.phone, client.telegram, client.viber, client.whatsapp, client.instagram, client.notes],
            )?;
            conn.last_insert_rowid()
        };
        debug!(id, "client inserted");
        self.db.notify(&[Table::Clients]);
        Ok(id)
    }

    pub fn update(&self, client: &Client) -> Result<()> {
        let id = client.id.ok_or_else(|| ScheduleError::validation("client has no id"))?;
        let affected = self.db.conn().execute(
            UPDATE_CLIENT,
            params![id, client.name, client.phone, client.telegram, client.viber, client.whatsapp, client.instagram, client.notes],
        )?;
        if affected == 0 {
            return Err(ScheduleError::not_found("Client", id));
        }
        debug!(id, "client updated");
        self.db.notify(&[Table::Clients]);
        Ok(())
    }

    /// Deletes the client; appointments that referenced it keep existing with
    /// an empty client reference.
    pub fn delete(&self, id: i64) -> Result<()> {
        let affected = self.db.conn().execute(DELETE_CLIENT, params![id])?;
        if affected == 0 {
            return Err(ScheduleError::not_found("Client", id));
        }
        debug!(id, "client deleted");
        self.db.notify(&[Table::Clients, Table::Appointments]);
        Ok(())
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Client>> {
        self.db
            .conn()
            .query_row(SELECT_CLIENT_BY_ID, params![id], map_client)
            .optional()
            .map_err(Into::into)
    }

    pub fn list(&self) -> Result<Vec<Client>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(SELECT_ALL_CLIENTS)?;
        let clients = stmt.query_map([], map_client)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(clients)
    }

    pub fn search(&self, query: &str) -> Result<Vec<Client>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(SEARCH_CLIENTS)?;
        let clients = stmt.query_map(params![query], map_client)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(clients)
    }

    /// All clients by name, re-emitted whenever the table changes.
    pub fn watch_all(&self) -> LiveQuery<Vec<Client>> {
        let clients = self.clone();
        LiveQuery::new(&self.db, &[Table::Clients], move || clients.list())
    }
}
