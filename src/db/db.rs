//! Shared storage handle.
//!
//! [`Db`] owns the single SQLite connection of the application and the
//! change notifier that drives live queries. It is constructed once (by the
//! CLI or a test) and cloned into every accessor; the connection closes when
//! the last clone is dropped.

use crate::db::migrations::init_with_migrations;
use crate::libs::error::Result;
use parking_lot::{Mutex, MutexGuard};
use rusqlite::{Connection, Transaction};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

pub const DB_FILE_NAME: &str = "salonbook.db";

/// Environment variable overriding the database location.
pub const DB_PATH_ENV: &str = "SALONBOOK_DB";

const CHANGE_CAPACITY: usize = 64;

/// Tables whose changes are broadcast to live queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Clients,
    Services,
    Appointments,
    ColumnConfigurations,
}

#[derive(Clone)]
pub struct Db {
    conn: Arc<Mutex<Connection>>,
    changes: broadcast::Sender<Table>,
}

impl Db {
    /// Opens (creating if needed) the database file and applies pending
    /// migrations. The schedule columns are seeded on first creation.
    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        debug!(path = %path.as_ref().display(), "opening database");
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Db> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Db> {
        conn.pragma_update(None, "foreign_keys", true)?;
        init_with_migrations(&mut conn)?;

        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        Ok(Db {
            conn: Arc::new(Mutex::new(conn)),
            changes,
        })
    }

    /// Exclusive access to the connection. Keep the guard short-lived; live
    /// queries and background writes share it.
    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock()
    }

    /// Runs `f` inside one transaction, committing only when it succeeds.
    pub fn transaction<T>(&self, f: impl FnOnce(&Transaction) -> Result<T>) -> Result<T> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Table> {
        self.changes.subscribe()
    }

    /// Signals that `tables` changed. Nobody listening is not an error.
    pub fn notify(&self, tables: &[Table]) {
        for table in tables {
            let _ = self.changes.send(*table);
        }
    }
}
