use crate::db::db::{Db, Table};
use crate::libs::column::ColumnConfiguration;
use crate::libs::error::{Result, ScheduleError};
use crate::libs::live::LiveQuery;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

pub(crate) const SCHEMA_COLUMN_CONFIGURATIONS: &str = "CREATE TABLE IF NOT EXISTS column_configurations (
    column_id TEXT NOT NULL,
    screen_name TEXT NOT NULL,
    user_title TEXT NOT NULL,
    is_visible BOOLEAN NOT NULL,
    display_order INTEGER NOT NULL,
    data_field_name TEXT,
    PRIMARY KEY (column_id, screen_name)
)";
const UPSERT_COLUMN: &str = "INSERT INTO column_configurations (column_id, screen_name, user_title, is_visible, display_order, data_field_name)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    ON CONFLICT (column_id, screen_name) DO UPDATE SET
        user_title = excluded.user_title,
        is_visible = excluded.is_visible,
        display_order = excluded.display_order,
        data_field_name = excluded.data_field_name";
const UPDATE_COLUMN: &str = "UPDATE column_configurations SET user_title = ?3, is_visible = ?4, display_order = ?5, data_field_name = ?6
    WHERE column_id = ?1 AND screen_name = ?2";
const SELECT_COLUMN: &str = "SELECT column_id, screen_name, user_title, is_visible, display_order, data_field_name
    FROM column_configurations WHERE column_id = ?1 AND screen_name = ?2";
const SELECT_SCREEN: &str = "SELECT column_id, screen_name, user_title, is_visible, display_order, data_field_name
    FROM column_configurations WHERE screen_name = ?1 ORDER BY display_order ASC, column_id ASC";
const SELECT_SCREEN_BY_VISIBILITY: &str = "SELECT column_id, screen_name, user_title, is_visible, display_order, data_field_name
    FROM column_configurations WHERE screen_name = ?1 AND is_visible = ?2 ORDER BY display_order ASC, column_id ASC";
const SELECT_MAX_VISIBLE_ORDER: &str = "SELECT MAX(display_order) FROM column_configurations WHERE screen_name = ?1 AND is_visible = 1";

fn map_column(row: &Row) -> rusqlite::Result<ColumnConfiguration> {
    Ok(ColumnConfiguration {
        column_id: row.get(0)?,
        screen_name: row.get(1)?,
        user_title: row.get(2)?,
        is_visible: row.get(3)?,
        display_order: row.get(4)?,
        data_field_name: row.get(5)?,
    })
}

/// Inserts or replaces configurations by their (column, screen) key.
pub(crate) fn upsert_all(conn: &Connection, configs: &[ColumnConfiguration]) -> Result<()> {
    let mut stmt = conn.prepare(UPSERT_COLUMN)?;
    for config in configs {
        stmt.execute(params![
            config.column_id,
            config.screen_name,
            config.user_title,
            config.is_visible,
            config.display_order,
            config.data_field_name
        ])?;
    }
    Ok(())
}

fn update_in(conn: &Connection, config: &ColumnConfiguration) -> Result<()> {
    let affected = conn.execute(
        UPDATE_COLUMN,
        params![
            config.column_id,
            config.screen_name,
            config.user_title,
            config.is_visible,
            config.display_order,
            config.data_field_name
        ],
    )?;
    if affected == 0 {
        return Err(ScheduleError::not_found("Column", format!("{}/{}", config.screen_name, config.column_id)));
    }
    Ok(())
}

/// Data access for the `column_configurations` table.
#[derive(Clone)]
pub struct ColumnConfigurations {
    db: Db,
}

impl ColumnConfigurations {
    pub fn new(db: &Db) -> Self {
        ColumnConfigurations { db: db.clone() }
    }

    /// Upserts the whole list in one transaction; repeating the call does not
    /// create duplicates.
    pub fn insert_or_update_all(&self, configs: &[ColumnConfiguration]) -> Result<()> {
        self.db.transaction(|tx| upsert_all(tx, configs))?;
        debug!(count = configs.len(), "column configurations upserted");
        self.db.notify(&[Table::ColumnConfigurations]);
        Ok(())
    }

    pub fn update(&self, config: &ColumnConfiguration) -> Result<()> {
        update_in(&self.db.conn(), config)?;
        debug!(column = %config.column_id, screen = %config.screen_name, "column configuration updated");
        self.db.notify(&[Table::ColumnConfigurations]);
        Ok(())
    }

    /// Updates every configuration atomically: either all rows change or
    /// none does.
    pub fn update_all(&self, configs: &[ColumnConfiguration]) -> Result<()> {
        self.db.transaction(|tx| configs.iter().try_for_each(|config| update_in(tx, config)))?;
        debug!(count = configs.len(), "column configurations updated");
        self.db.notify(&[Table::ColumnConfigurations]);
        Ok(())
    }

    pub fn get(&self, column_id: &str, screen_name: &str) -> Result<Option<ColumnConfiguration>> {
        self.db
            .conn()
            .query_row(SELECT_COLUMN, params![column_id, screen_name], map_column)
            .optional()
            .map_err(Into::into)
    }

    pub fn for_screen(&self, screen_name: &str) -> Result<Vec<ColumnConfiguration>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(SELECT_SCREEN)?;
        let configs = stmt.query_map(params![screen_name], map_column)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(configs)
    }

    pub fn by_visibility(&self, screen_name: &str, is_visible: bool) -> Result<Vec<ColumnConfiguration>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(SELECT_SCREEN_BY_VISIBILITY)?;
        let configs = stmt
            .query_map(params![screen_name, is_visible], map_column)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(configs)
    }

    /// Largest display order among the visible columns, `None` when no
    /// column is visible.
    pub fn max_visible_order(&self, screen_name: &str) -> Result<Option<i32>> {
        let max: Option<i32> = self.db.conn().query_row(SELECT_MAX_VISIBLE_ORDER, params![screen_name], |row| row.get(0))?;
        Ok(max)
    }

    pub fn watch_visibility(&self, screen_name: &str, is_visible: bool) -> LiveQuery<Vec<ColumnConfiguration>> {
        let columns = self.clone();
        let screen_name = screen_name.to_string();
        LiveQuery::new(&self.db, &[Table::ColumnConfigurations], move || columns.by_visibility(&screen_name, is_visible))
    }
}
