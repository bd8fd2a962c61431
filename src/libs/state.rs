//! UI state that outlives a single run: the month the schedule is filtered to.

use super::data_storage::DataStorage;
use anyhow::Result;
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const STATE_FILE_NAME: &str = "state.json";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SavedState {
    pub filter_year: i32,
    /// 1..=12.
    pub filter_month: u32,
}

impl Default for SavedState {
    /// The current local month.
    fn default() -> Self {
        let today = Local::now().date_naive();
        SavedState {
            filter_year: today.year(),
            filter_month: today.month(),
        }
    }
}

/// Location the state is persisted to.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// `state.json` in the data directory.
    pub fn new() -> Result<Self> {
        Ok(StateStore {
            path: DataStorage::new().get_path(STATE_FILE_NAME)?,
        })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        StateStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved state, or the default when nothing was saved yet.
    pub fn load(&self) -> Result<SavedState> {
        if !self.path.exists() {
            return Ok(SavedState::default());
        }
        let state_str = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&state_str)?)
    }

    pub fn save(&self, state: &SavedState) -> Result<()> {
        let state_file = File::create(&self.path)?;
        serde_json::to_writer_pretty(&state_file, state)?;
        Ok(())
    }
}
