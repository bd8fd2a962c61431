use crate::{
    libs::{config::Config, messages::Message},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Only print where the database lives
    #[arg(short, long)]
    show: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.show {
        let config = Config::read()?;
        msg_info!(Message::DatabaseLocation(config.db_path()?.display().to_string()));
        return Ok(());
    }

    let config = Config::init()?;
    config.save()?;
    msg_success!(Message::ConfigSaved);

    // Creates the file and seeds the schedule columns on first run
    config.open_db()?;
    msg_info!(Message::DatabaseLocation(config.db_path()?.display().to_string()));
    Ok(())
}
