//! Domain model, presentation state and support code.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use salonbook::libs::client::Client;
//! use salonbook::libs::config::Config;
//! use salonbook::libs::repository::{ScheduleRepository, SqliteScheduleRepository};
//!
//! let db = Config::read()?.open_db()?;
//! let repository = SqliteScheduleRepository::new(&db);
//! let id = repository.insert_client(&Client::new("Anna").with_phone("+375 29 111 22 33"))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod appointment;
pub mod client;
pub mod column;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod live;
pub mod messages;
pub mod paging;
pub mod registry;
pub mod render;
pub mod repository;
pub mod schedule;
pub mod service;
pub mod state;
pub mod view;
