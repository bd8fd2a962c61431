use super::Session;
use crate::{
    libs::{error::ScheduleError, messages::Message, view::View},
    msg_error, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ColumnArgs {
    #[command(subcommand)]
    command: Option<ColumnCommand>,
}

#[derive(Debug, Subcommand)]
enum ColumnCommand {
    List,
    /// Append a hidden column after the last visible one
    Show {
        column: String,
    },
    Hide {
        column: String,
    },
    /// Retitle one of the optional columns
    Rename {
        column: String,
        title: String,
    },
    /// Restore the default layout
    Reset,
}

pub async fn cmd(args: ColumnArgs) -> Result<()> {
    let session = Session::open()?;
    match args.command {
        Some(ColumnCommand::Show { column }) => handle_show(&session, column).await,
        Some(ColumnCommand::Hide { column }) => handle_hide(&session, column).await,
        Some(ColumnCommand::Rename { column, title }) => handle_rename(&session, column, title).await,
        Some(ColumnCommand::Reset) => handle_reset(&session),
        Some(ColumnCommand::List) | None => handle_list(&session).await,
    }
}

async fn handle_list(session: &Session) -> Result<()> {
    let view_model = session.view_model()?;
    let mut visible = view_model.visible_columns();
    let mut hidden = view_model.hidden_columns();

    msg_print!(Message::VisibleColumnsHeader, true);
    if let Some(columns) = visible.next().await {
        View::columns(&columns?);
    }

    match hidden.next().await {
        Some(columns) => {
            let columns = columns?;
            if columns.is_empty() {
                msg_info!(Message::NoHiddenColumns);
            } else {
                msg_print!(Message::HiddenColumnsHeader, true);
                View::columns(&columns);
            }
        }
        None => msg_info!(Message::NoHiddenColumns),
    }
    Ok(())
}

async fn handle_show(session: &Session, column: String) -> Result<()> {
    match session.view_model()?.show_column(&column).await {
        Ok(config) => msg_success!(Message::ColumnShown(config.user_title)),
        Err(ScheduleError::NotFound { .. }) => msg_error!(Message::ColumnNotFound(column)),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

async fn handle_hide(session: &Session, column: String) -> Result<()> {
    match session.view_model()?.hide_column(&column).await {
        Ok(config) => msg_success!(Message::ColumnHidden(config.user_title)),
        Err(ScheduleError::NotFound { .. }) => msg_error!(Message::ColumnNotFound(column)),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

async fn handle_rename(session: &Session, column: String, title: String) -> Result<()> {
    if title.trim().is_empty() {
        msg_error!(Message::EmptyColumnTitle);
        return Ok(());
    }

    let view_model = session.view_model()?;
    let old_title = match view_model.registry().get(&column) {
        Ok(config) => config.user_title,
        Err(ScheduleError::NotFound { .. }) => {
            msg_error!(Message::ColumnNotFound(column));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    match view_model.rename_optional_column(&column, &title).await {
        Ok(config) => msg_success!(Message::ColumnRenamed(old_title, config.user_title)),
        Err(ScheduleError::Validation(_)) => msg_error!(Message::ColumnRenameRejected(column)),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn handle_reset(session: &Session) -> Result<()> {
    session.view_model()?.registry().reset()?;
    msg_success!(Message::ColumnsReset);
    Ok(())
}
