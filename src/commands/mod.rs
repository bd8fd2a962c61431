//! Command-line interface.
//!
//! Each subcommand lives in its own module with an `Args` struct and an
//! async `cmd` entry point. Commands open the database named by the
//! configuration and talk to it through the repository facade.

pub mod appointment;
pub mod client;
pub mod column;
pub mod init;
pub mod schedule;
pub mod service;

use crate::libs::config::Config;
use crate::libs::repository::{ScheduleRepository, SqliteScheduleRepository};
use crate::libs::schedule::ScheduleViewModel;
use crate::libs::state::StateStore;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage clients")]
    Client(client::ClientArgs),
    #[command(about = "Manage services")]
    Service(service::ServiceArgs),
    #[command(about = "Book, edit and cancel appointments")]
    Appointment(appointment::AppointmentArgs),
    #[command(about = "Show, hide and rename schedule columns")]
    Column(column::ColumnArgs),
    #[command(about = "Display the schedule for a month")]
    Schedule(schedule::ScheduleArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Client(args) => client::cmd(args).await,
            Commands::Service(args) => service::cmd(args).await,
            Commands::Appointment(args) => appointment::cmd(args).await,
            Commands::Column(args) => column::cmd(args).await,
            Commands::Schedule(args) => schedule::cmd(args).await,
        }
    }
}

/// Configuration plus the repository over the configured database.
pub(crate) struct Session {
    pub config: Config,
    pub repository: Arc<dyn ScheduleRepository>,
}

impl Session {
    pub fn open() -> Result<Self> {
        let config = Config::read()?;
        let db = config.open_db()?;
        Ok(Session {
            repository: Arc::new(SqliteScheduleRepository::new(&db)),
            config,
        })
    }

    pub fn view_model(&self) -> Result<ScheduleViewModel> {
        Ok(ScheduleViewModel::new(
            self.repository.clone(),
            StateStore::new()?,
            self.config.paging,
            self.config.render_options(),
        )?)
    }
}
