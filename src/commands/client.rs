use super::Session;
use crate::{
    libs::{client::Client, messages::Message, registry::ColumnRegistry, render::RowRenderer, schedule::render_rows, view::View},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct ClientArgs {
    #[command(subcommand)]
    command: ClientCommand,
}

#[derive(Debug, Args)]
struct ContactArgs {
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    telegram: Option<String>,
    #[arg(long)]
    viber: Option<String>,
    #[arg(long)]
    whatsapp: Option<String>,
    #[arg(long)]
    instagram: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl ContactArgs {
    /// Overwrites the fields that were given; an empty value clears one.
    fn apply(self, client: &mut Client) {
        let fields = [
            (self.phone, &mut client.phone),
            (self.telegram, &mut client.telegram),
            (self.viber, &mut client.viber),
            (self.whatsapp, &mut client.whatsapp),
            (self.instagram, &mut client.instagram),
            (self.notes, &mut client.notes),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                *field = (!value.trim().is_empty()).then_some(value);
            }
        }
    }
}

#[derive(Debug, Subcommand)]
enum ClientCommand {
    Add {
        name: String,
        #[command(flatten)]
        contacts: ContactArgs,
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
        contacts: ContactArgs,
    },
    Delete {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
    /// Appointments of one client, newest first
    Show {
        id: i64,
    },
}

pub async fn cmd(args: ClientArgs) -> Result<()> {
    let session = Session::open()?;
    match args.command {
        ClientCommand::Add { name, contacts } => handle_add(&session, name, contacts),
        ClientCommand::List { search } => handle_list(&session, search),
        ClientCommand::Edit { id, name, contacts } => handle_edit(&session, id, name, contacts),
        ClientCommand::Delete { id, yes } => handle_delete(&session, id, yes),
        ClientCommand::Show { id } => handle_show(&session, id).await,
    }
}

fn handle_add(session: &Session, name: String, contacts: ContactArgs) -> Result<()> {
    let mut client = Client::new(&name);
    contacts.apply(&mut client);

    let id = session.repository.insert_client(&client)?;
    msg_success!(Message::ClientCreated(id));
    Ok(())
}

fn handle_list(session: &Session, search: Option<String>) -> Result<()> {
    let clients = match search {
        Some(query) => session.repository.search_clients(&query)?,
        None => session.repository.clients().current()?,
    };

    if clients.is_empty() {
        msg_info!(Message::NoClientsFound);
        return Ok(());
    }

    msg_print!(Message::ClientsHeader, true);
    View::clients(&clients);
    Ok(())
}

fn handle_edit(session: &Session, id: i64, name: Option<String>, contacts: ContactArgs) -> Result<()> {
    let Some(mut client) = session.repository.get_client_by_id(id)? else {
        msg_error!(Message::ClientNotFound(id));
        return Ok(());
    };

    if let Some(name) = name {
        client.name = Some(name);
    }
    contacts.apply(&mut client);

    session.repository.update_client(&client)?;
    msg_success!(Message::ClientUpdated(id));
    Ok(())
}

fn handle_delete(session: &Session, id: i64, yes: bool) -> Result<()> {
    let Some(client) = session.repository.get_client_by_id(id)? else {
        msg_error!(Message::ClientNotFound(id));
        return Ok(());
    };

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteClient(client.name.unwrap_or_default()).to_string())
            .default(false)
            .interact()?;

    if confirmed {
        session.repository.delete_client(id)?;
        msg_success!(Message::ClientDeleted(id));
    } else {
        msg_info!(Message::OperationCancelled);
    }
    Ok(())
}

async fn handle_show(session: &Session, id: i64) -> Result<()> {
    let Some(client) = session.repository.get_client_by_id(id)? else {
        msg_error!(Message::ClientNotFound(id));
        return Ok(());
    };

    let mut appointments = session.repository.appointments_for_client(id);
    let appointments = match appointments.next().await {
        Some(snapshot) => snapshot?,
        None => Vec::new(),
    };
    if appointments.is_empty() {
        msg_info!(Message::NoAppointments);
        return Ok(());
    }

    let columns = ColumnRegistry::schedule(session.repository.clone()).visible().current()?;
    let renderer = RowRenderer::new(session.config.render_options());
    let rows = render_rows(session.repository.as_ref(), &renderer, &appointments, &columns)?;

    msg_print!(Message::ClientAppointmentsHeader(client.name.unwrap_or_default()), true);
    View::schedule(&columns, &rows);
    Ok(())
}
