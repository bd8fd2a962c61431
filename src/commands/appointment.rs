use super::Session;
use crate::{
    libs::{
        appointment::Appointment,
        error::ScheduleError,
        messages::Message,
        render::parse_cost,
    },
    msg_bail_anyhow, msg_error, msg_error_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct AppointmentArgs {
    #[command(subcommand)]
    command: AppointmentCommand,
}

#[derive(Debug, Args)]
struct DetailArgs {
    #[arg(long)]
    client: Option<i64>,
    #[arg(long)]
    service: Option<i64>,
    /// Duration in minutes; defaults to the service's duration
    #[arg(long)]
    duration: Option<i32>,
    /// Final price, e.g. 30 or 12.50; defaults to the service's price
    #[arg(long)]
    cost: Option<String>,
    #[arg(long)]
    currency: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Debug, Subcommand)]
enum AppointmentCommand {
    Add {
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// HH:MM
        #[arg(long)]
        time: String,
        #[command(flatten)]
        details: DetailArgs,
    },
    Edit {
        id: i64,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        details: DetailArgs,
    },
    Delete {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
    /// Fill a cell of one of the optional columns
    Set {
        id: i64,
        column: String,
        /// Omit to clear the cell
        value: Option<String>,
    },
}

pub async fn cmd(args: AppointmentArgs) -> Result<()> {
    let session = Session::open()?;
    match args.command {
        AppointmentCommand::Add { date, time, details } => handle_add(&session, date, time, details).await,
        AppointmentCommand::Edit {
            id,
            date,
            time,
            status,
            details,
        } => handle_edit(&session, id, date, time, status, details).await,
        AppointmentCommand::Delete { id, yes } => handle_delete(&session, id, yes).await,
        AppointmentCommand::Set { id, column, value } => handle_set(&session, id, column, value).await,
    }
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    match NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(_) => msg_bail_anyhow!(Message::InvalidDate(input.to_string())),
    }
}

fn parse_time(input: &str) -> Result<NaiveTime> {
    match NaiveTime::parse_from_str(input.trim(), "%H:%M") {
        Ok(time) => Ok(time),
        Err(_) => msg_bail_anyhow!(Message::InvalidTime(input.to_string())),
    }
}

async fn handle_add(session: &Session, date: String, time: String, details: DetailArgs) -> Result<()> {
    let date = parse_date(&date)?;
    let time = parse_time(&time)?;

    let service = match details.service {
        Some(id) => match session.repository.get_service_by_id(id)? {
            Some(service) => Some(service),
            None => msg_bail_anyhow!(Message::ServiceNotFound(id)),
        },
        None => None,
    };
    if let Some(id) = details.client {
        if session.repository.get_client_by_id(id)?.is_none() {
            msg_bail_anyhow!(Message::ClientNotFound(id));
        }
    }

    let Some(duration) = details.duration.or(service.as_ref().and_then(|s| s.default_duration_minutes)) else {
        msg_bail_anyhow!(Message::DurationRequired);
    };

    let offset = session.config.render_options().offset;
    let mut appointment = Appointment::scheduled(date, time, offset, duration)?;
    appointment.client_id = details.client;
    appointment.service_id = details.service;
    appointment.notes = details.notes;
    appointment.cost = match details.cost {
        Some(input) => Some(parse_cost(&input).ok_or_else(|| msg_error_anyhow!(Message::InvalidCost(input)))?),
        None => service.as_ref().and_then(|s| s.cost),
    };
    appointment.currency_code = details.currency.or(service.and_then(|s| s.currency_code));

    let view_model = session.view_model()?;
    let id = view_model.add_appointment(appointment).await?;
    msg_success!(Message::AppointmentCreated(id));
    Ok(())
}

async fn handle_edit(
    session: &Session,
    id: i64,
    date: Option<String>,
    time: Option<String>,
    status: Option<String>,
    details: DetailArgs,
) -> Result<()> {
    let Some(mut appointment) = session.repository.get_appointment(id)? else {
        msg_error!(Message::AppointmentNotFound(id));
        return Ok(());
    };

    if date.is_some() || time.is_some() {
        let offset = session.config.render_options().offset;
        let current = Utc
            .timestamp_millis_opt(appointment.start_time_millis)
            .single()
            .map(|start| start.with_timezone(&offset).naive_local());
        let date = match date {
            Some(input) => parse_date(&input)?,
            None => appointment.calendar_date().unwrap_or_default(),
        };
        let time = match time {
            Some(input) => parse_time(&input)?,
            None => current.map(|start| start.time()).unwrap_or_default(),
        };
        let moved = Appointment::scheduled(date, time, offset, appointment.duration_minutes)?;
        appointment.date = moved.date;
        appointment.start_time_millis = moved.start_time_millis;
    }

    if let Some(client) = details.client {
        appointment.client_id = Some(client);
    }
    if let Some(service) = details.service {
        appointment.service_id = Some(service);
    }
    if let Some(duration) = details.duration {
        appointment.duration_minutes = duration;
    }
    if let Some(input) = details.cost {
        match parse_cost(&input) {
            Some(cost) => appointment.cost = Some(cost),
            None => msg_bail_anyhow!(Message::InvalidCost(input)),
        }
    }
    if let Some(currency) = details.currency {
        appointment.currency_code = Some(currency);
    }
    if let Some(notes) = details.notes {
        appointment.notes = (!notes.trim().is_empty()).then_some(notes);
    }
    if let Some(status) = status {
        appointment.status = status;
    }

    session.view_model()?.update_appointment(appointment).await?;
    msg_success!(Message::AppointmentUpdated(id));
    Ok(())
}

async fn handle_delete(session: &Session, id: i64, yes: bool) -> Result<()> {
    if session.repository.get_appointment(id)?.is_none() {
        msg_error!(Message::AppointmentNotFound(id));
        return Ok(());
    }

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteAppointment(id).to_string())
            .default(false)
            .interact()?;

    if confirmed {
        session.view_model()?.delete_appointment(id).await?;
        msg_success!(Message::AppointmentDeleted(id));
    } else {
        msg_info!(Message::OperationCancelled);
    }
    Ok(())
}

async fn handle_set(session: &Session, id: i64, column: String, value: Option<String>) -> Result<()> {
    let view_model = session.view_model()?;
    let title = match view_model.registry().get(&column) {
        Ok(config) => config.user_title,
        Err(ScheduleError::NotFound { .. }) => {
            msg_error!(Message::ColumnNotFound(column));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let value = value.filter(|value| !value.trim().is_empty());
    match view_model.set_optional_value(id, &column, value).await {
        Ok(()) => msg_success!(Message::OptionalValueSet(id, title)),
        Err(ScheduleError::Validation(_)) => msg_error!(Message::ColumnNotEditable(title)),
        Err(ScheduleError::NotFound { .. }) => msg_error!(Message::AppointmentNotFound(id)),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
