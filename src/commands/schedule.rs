use super::Session;
use crate::{
    libs::{
        appointment::AppointmentFilter,
        export::{ExportFormat, Exporter},
        messages::Message,
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ScheduleArgs {
    /// Remembered for later runs
    #[arg(short, long)]
    year: Option<i32>,
    /// 1-12, remembered for later runs
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,
    /// Ignore the month filter for this run
    #[arg(short, long)]
    all: bool,
    /// 1-based page number
    #[arg(short, long, default_value_t = 1)]
    page: usize,
    #[arg(short, long, value_enum)]
    export: Option<ExportFormat>,
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn cmd(args: ScheduleArgs) -> Result<()> {
    let session = Session::open()?;
    let mut view_model = session.view_model()?;

    if args.year.is_some() || args.month.is_some() {
        let year = args.year.unwrap_or(view_model.selected_year());
        let month = args.month.unwrap_or(view_model.selected_month());
        view_model.set_filter(year, month)?;
        msg_info!(Message::FilterSet(year, month));
    }
    if args.all {
        view_model.show_all();
    }

    let (header, stem) = match view_model.filter() {
        AppointmentFilter::All => (Message::ScheduleAllTime, "schedule".to_string()),
        AppointmentFilter::Month { year, month } => (
            Message::ScheduleHeader(format!("{:02}.{}", month, year)),
            format!("schedule_{}-{:02}", year, month),
        ),
    };

    if let Some(format) = args.export {
        let exporter = Exporter::new(format, args.output, &stem);
        exporter.export_schedule(&view_model.columns()?, &view_model.all_rows()?)?;
        msg_success!(Message::ScheduleExported(exporter.output_path().display().to_string()));
        return Ok(());
    }

    let page = view_model.page(args.page.saturating_sub(1))?;
    if page.items.is_empty() {
        msg_info!(Message::NoAppointments);
        return Ok(());
    }

    msg_print!(header, true);
    View::schedule(&view_model.columns()?, &page.items);
    msg_print!(Message::PageFooter(page.index + 1, page.has_more));
    Ok(())
}
