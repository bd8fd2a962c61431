use super::client::Client;
use super::column::ColumnConfiguration;
use super::render::format_cost;
use super::schedule::ScheduleRow;
use super::service::Service;
use prettytable::{row, Cell, Row, Table};

pub struct View {}

impl View {
    pub fn clients(clients: &[Client]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "PHONE", "CONTACTS", "NOTES"]);
        for client in clients {
            table.add_row(row![
                client.id.unwrap_or(0),
                client.name.as_deref().unwrap_or(""),
                client.phone.as_deref().unwrap_or(""),
                client.contacts().join(", "),
                client.notes.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();
    }

    pub fn services(services: &[Service]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "COST", "DURATION"]);
        for service in services {
            table.add_row(row![
                service.id.unwrap_or(0),
                service.name,
                format_cost(service.cost, service.currency_code.as_deref()),
                service.default_duration_minutes.map(|minutes| format!("{minutes} min")).unwrap_or_default()
            ]);
        }
        table.printstd();
    }

    pub fn columns(columns: &[ColumnConfiguration]) {
        let mut table = Table::new();

        table.add_row(row!["ORDER", "ID", "TITLE", "VISIBLE"]);
        for column in columns {
            table.add_row(row![
                column.display_order,
                column.column_id,
                column.user_title,
                if column.is_visible { "yes" } else { "no" }
            ]);
        }
        table.printstd();
    }

    /// Schedule table; headers are the user titles of `columns`.
    pub fn schedule(columns: &[ColumnConfiguration], rows: &[ScheduleRow]) {
        let mut table = Table::new();

        let mut header = vec![Cell::new("ID")];
        header.extend(columns.iter().map(|column| Cell::new(&column.user_title.to_uppercase())));
        table.add_row(Row::new(header));

        for row in rows {
            let mut cells = vec![Cell::new(&row.appointment_id.unwrap_or(0).to_string())];
            cells.extend(row.cells.iter().map(|cell| Cell::new(cell)));
            table.add_row(Row::new(cells));
        }
        table.printstd();
    }
}
