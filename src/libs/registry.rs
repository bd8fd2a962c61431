//! Column visibility, ordering and titles for one screen.
//!
//! Visible columns are shown sorted by `display_order`; showing a column
//! appends it after the current last visible one. Hiding leaves the other
//! orders untouched, so gaps are normal. Only the two optional columns may
//! be renamed.

use crate::libs::column::{ColumnConfiguration, ColumnKind, SCREEN_SCHEDULE};
use crate::libs::error::{Result, ScheduleError};
use crate::libs::live::LiveQuery;
use crate::libs::repository::ScheduleRepository;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct ColumnRegistry {
    repository: Arc<dyn ScheduleRepository>,
    screen_name: String,
}

impl ColumnRegistry {
    pub fn new(repository: Arc<dyn ScheduleRepository>, screen_name: &str) -> Self {
        ColumnRegistry {
            repository,
            screen_name: screen_name.to_string(),
        }
    }

    pub fn schedule(repository: Arc<dyn ScheduleRepository>) -> Self {
        Self::new(repository, SCREEN_SCHEDULE)
    }

    pub fn screen_name(&self) -> &str {
        &self.screen_name
    }

    pub fn visible(&self) -> LiveQuery<Vec<ColumnConfiguration>> {
        self.repository.visible_columns(&self.screen_name)
    }

    pub fn hidden(&self) -> LiveQuery<Vec<ColumnConfiguration>> {
        self.repository.hidden_columns(&self.screen_name)
    }

    pub fn all(&self) -> Result<Vec<ColumnConfiguration>> {
        self.repository.all_columns(&self.screen_name)
    }

    pub fn get(&self, column_id: &str) -> Result<ColumnConfiguration> {
        self.repository
            .column(column_id, &self.screen_name)?
            .ok_or_else(|| ScheduleError::not_found("Column", column_id))
    }

    /// Makes the column visible as the last one. Already visible columns
    /// keep their place.
    pub fn show(&self, column_id: &str) -> Result<ColumnConfiguration> {
        let mut config = self.get(column_id)?;
        if config.is_visible {
            return Ok(config);
        }

        config.display_order = match self.repository.max_visible_order(&self.screen_name)? {
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| ScheduleError::validation(format!("no display order left after {max}")))?,
            None => 0,
        };
        config.is_visible = true;
        self.repository.update_column_configuration(&config)?;
        debug!(column = column_id, order = config.display_order, "column shown");
        Ok(config)
    }

    pub fn hide(&self, column_id: &str) -> Result<ColumnConfiguration> {
        let mut config = self.get(column_id)?;
        if !config.is_visible {
            return Ok(config);
        }

        config.is_visible = false;
        self.repository.update_column_configuration(&config)?;
        debug!(column = column_id, "column hidden");
        Ok(config)
    }

    /// Sets the user title of an optional column. Built-in columns and blank
    /// titles are refused.
    pub fn rename(&self, column_id: &str, title: &str) -> Result<ColumnConfiguration> {
        if !ColumnKind::from_id(column_id).is_some_and(|kind| kind.is_optional()) {
            warn!(column = column_id, "rename refused for non-optional column");
            return Err(ScheduleError::validation(format!("column '{column_id}' cannot be renamed")));
        }
        let title = title.trim();
        if title.is_empty() {
            return Err(ScheduleError::validation("column title must not be empty"));
        }

        let mut config = self.get(column_id)?;
        config.user_title = title.to_string();
        self.repository.update_column_configuration(&config)?;
        debug!(column = column_id, title, "column renamed");
        Ok(config)
    }

    /// Restores the default layout. Only the schedule screen has one.
    pub fn reset(&self) -> Result<()> {
        if self.screen_name != SCREEN_SCHEDULE {
            warn!(screen = %self.screen_name, "reset refused for screen without a default layout");
            return Err(ScheduleError::validation(format!("screen '{}' has no default column layout", self.screen_name)));
        }
        self.repository.seed_schedule_columns()
    }
}
