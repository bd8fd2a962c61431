//! # Salonbook
//!
//! Appointment book for a beauty salon: clients, services and appointments
//! stored in SQLite, shown as a paged schedule table whose columns can be
//! shown, hidden and (for two free-text columns) renamed.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use salonbook::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
