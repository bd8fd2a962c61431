//! SQLite persistence.
//!
//! One [`db::Db`] handle owns the connection; each table has an accessor
//! that clones the handle and keeps its SQL in `const` strings. Schema
//! changes go through [`migrations`].

/// Connection handle and change notifications.
pub mod db;

/// Versioned schema migrations, applied when a database is opened.
pub mod migrations;

pub mod appointments;
pub mod clients;
pub mod columns;
pub mod services;
