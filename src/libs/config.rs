//! Application configuration.
//!
//! Stored as pretty-printed JSON in `config.json` inside the data directory.
//! A missing file means defaults; `salonbook init` walks through every
//! section with a dialoguer wizard.
//!
//! ```rust,no_run
//! use salonbook::libs::config::Config;
//!
//! let config = Config::read()?;
//! let db = config.open_db()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::db::db::{Db, DB_FILE_NAME, DB_PATH_ENV};
use crate::libs::messages::Message;
use crate::libs::paging::PagingConfig;
use crate::libs::render::RenderOptions;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DatabaseConfig {
    /// Database file; the data directory is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DisplayConfig {
    /// Offset east of UTC used when printing start times.
    pub utc_offset_minutes: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub paging: PagingConfig,
}

impl Config {
    pub fn read() -> Result<Config> {
        Self::load_from(DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Interactive setup, prefilled with the current values.
    pub fn init() -> Result<Self> {
        let current = Self::read().unwrap_or_default();
        let theme = ColorfulTheme::default();

        msg_print!(Message::ConfigModuleDatabase);
        let path: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptDatabasePath.to_string())
            .default(current.database.path.as_ref().map(|p| p.display().to_string()).unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;

        msg_print!(Message::ConfigModuleDisplay);
        let utc_offset_minutes: i32 = Input::with_theme(&theme)
            .with_prompt(Message::PromptUtcOffset.to_string())
            .default(current.display.utc_offset_minutes)
            .validate_with(|minutes: &i32| if minutes.abs() < 24 * 60 { Ok(()) } else { Err("offset must be under 24 hours") })
            .interact_text()?;

        msg_print!(Message::ConfigModulePaging);
        let page_size: usize = Input::with_theme(&theme)
            .with_prompt(Message::PromptPageSize.to_string())
            .default(current.paging.page_size)
            .validate_with(|size: &usize| if *size > 0 { Ok(()) } else { Err("page size must be positive") })
            .interact_text()?;

        let path = path.trim();
        Ok(Config {
            database: DatabaseConfig {
                path: (!path.is_empty()).then(|| PathBuf::from(path)),
            },
            display: DisplayConfig { utc_offset_minutes },
            paging: PagingConfig { page_size },
        })
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::with_offset_minutes(self.display.utc_offset_minutes)
    }

    /// Database location: `SALONBOOK_DB`, then `database.path`, then the
    /// data directory.
    pub fn db_path(&self) -> Result<PathBuf> {
        match std::env::var(DB_PATH_ENV) {
            Ok(path) if !path.is_empty() => Ok(path.into()),
            _ => match &self.database.path {
                Some(path) => Ok(path.clone()),
                None => DataStorage::new().get_path(DB_FILE_NAME),
            },
        }
    }

    pub fn open_db(&self) -> Result<Db> {
        Ok(Db::open(self.db_path()?)?)
    }
}
