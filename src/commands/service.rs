use super::Session;
use crate::{
    libs::{messages::Message, render::parse_cost, service::Service, view::View},
    msg_bail_anyhow, msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct ServiceArgs {
    #[command(subcommand)]
    command: ServiceCommand,
}

#[derive(Debug, Args)]
struct PriceArgs {
    /// List price, e.g. 30 or 12.50
    #[arg(long)]
    cost: Option<String>,
    #[arg(long)]
    currency: Option<String>,
    /// Default duration in minutes
    #[arg(long)]
    duration: Option<i32>,
}

#[derive(Debug, Subcommand)]
enum ServiceCommand {
    Add {
        name: String,
        #[command(flatten)]
        price: PriceArgs,
    },
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        price: PriceArgs,
    },
    Delete {
        ids: Vec<i64>,
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(args: ServiceArgs) -> Result<()> {
    let session = Session::open()?;
    match args.command {
        ServiceCommand::Add { name, price } => handle_add(&session, name, price),
        ServiceCommand::List { search } => handle_list(&session, search),
        ServiceCommand::Edit { id, name, price } => handle_edit(&session, id, name, price),
        ServiceCommand::Delete { ids, yes } => handle_delete(&session, ids, yes),
    }
}

fn cost_in_minor_units(cost: Option<String>) -> Result<Option<i64>> {
    match cost {
        Some(input) => match parse_cost(&input) {
            Some(minor) => Ok(Some(minor)),
            None => msg_bail_anyhow!(Message::InvalidCost(input)),
        },
        None => Ok(None),
    }
}

fn handle_add(session: &Session, name: String, price: PriceArgs) -> Result<()> {
    let cost = cost_in_minor_units(price.cost)?;
    let service = Service::new(&name, cost, price.currency.as_deref(), price.duration);

    let id = session.repository.insert_service(&service)?;
    msg_success!(Message::ServiceCreated(id));
    Ok(())
}

fn handle_list(session: &Session, search: Option<String>) -> Result<()> {
    let services = match search {
        Some(query) => session.repository.search_services(&query)?,
        None => session.repository.services().current()?,
    };

    if services.is_empty() {
        msg_info!(Message::NoServicesFound);
        return Ok(());
    }

    msg_print!(Message::ServicesHeader, true);
    View::services(&services);
    Ok(())
}

fn handle_edit(session: &Session, id: i64, name: Option<String>, price: PriceArgs) -> Result<()> {
    let Some(mut service) = session.repository.get_service_by_id(id)? else {
        msg_error!(Message::ServiceNotFound(id));
        return Ok(());
    };

    if let Some(name) = name {
        service.name = name;
    }
    if let Some(cost) = cost_in_minor_units(price.cost)? {
        service.cost = Some(cost);
    }
    if let Some(currency) = price.currency {
        service.currency_code = Some(currency);
    }
    if let Some(duration) = price.duration {
        service.default_duration_minutes = Some(duration);
    }

    session.repository.update_service(&service)?;
    msg_success!(Message::ServiceUpdated(id));
    Ok(())
}

fn handle_delete(session: &Session, ids: Vec<i64>, yes: bool) -> Result<()> {
    if ids.is_empty() {
        msg_error!(Message::NoServiceIdsProvided);
        return Ok(());
    }

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteServices(ids.len()).to_string())
            .default(false)
            .interact()?;

    if confirmed {
        let deleted = session.repository.delete_services(&ids)?;
        msg_success!(Message::ServicesDeletedCount(deleted));
    } else {
        msg_info!(Message::OperationCancelled);
    }
    Ok(())
}
