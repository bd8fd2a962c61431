//! Export of the rendered schedule to CSV or JSON.
//!
//! Cells are written exactly as the table shows them. CSV headers are the
//! user titles of the visible columns; JSON records are keyed by column id.

use crate::libs::column::ColumnConfiguration;
use crate::libs::schedule::ScheduleRow;
use anyhow::Result;
use serde_json::{Map, Value};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Without an explicit path the file is `<stem>.<ext>` in the working
    /// directory.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>, stem: &str) -> Self {
        let output_path = output_path.unwrap_or_else(|| PathBuf::from(format!("{stem}.{}", format.extension())));
        Exporter { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export_schedule(&self, columns: &[ColumnConfiguration], rows: &[ScheduleRow]) -> Result<()> {
        match self.format {
            ExportFormat::Csv => self.export_csv(columns, rows),
            ExportFormat::Json => self.export_json(columns, rows),
        }
    }

    fn export_csv(&self, columns: &[ColumnConfiguration], rows: &[ScheduleRow]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;

        let mut header = vec!["ID".to_string()];
        header.extend(columns.iter().map(|column| column.user_title.clone()));
        wtr.write_record(&header)?;

        for row in rows {
            let mut record = vec![row.appointment_id.map(|id| id.to_string()).unwrap_or_default()];
            record.extend(row.cells.iter().cloned());
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn export_json(&self, columns: &[ColumnConfiguration], rows: &[ScheduleRow]) -> Result<()> {
        let records: Vec<Value> = rows
            .iter()
            .map(|row| {
                let mut record = Map::new();
                record.insert("id".to_string(), row.appointment_id.map(Value::from).unwrap_or(Value::Null));
                for (column, cell) in columns.iter().zip(&row.cells) {
                    record.insert(column.column_id.clone(), Value::String(cell.clone()));
                }
                Value::Object(record)
            })
            .collect();

        let file = File::create(&self.output_path)?;
        serde_json::to_writer_pretty(file, &records)?;
        Ok(())
    }
}
