#[cfg(test)]
mod tests {
    use salonbook::libs::column::{initial_schedule_config, ColumnConfiguration};
    use salonbook::libs::export::{ExportFormat, Exporter};
    use salonbook::libs::schedule::ScheduleRow;
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportTestContext {
        temp_dir: TempDir,
        columns: Vec<ColumnConfiguration>,
        rows: Vec<ScheduleRow>,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let mut columns: Vec<_> = initial_schedule_config().into_iter().filter(|c| c.is_visible).take(3).collect();
            columns[1].user_title = "Guest".to_string();

            ExportTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
                columns,
                rows: vec![
                    ScheduleRow {
                        appointment_id: Some(7),
                        cells: vec!["05.03.2024".into(), "Anna".into(), "10:00".into()],
                    },
                    ScheduleRow {
                        appointment_id: Some(3),
                        cells: vec!["01.03.2024".into(), "-".into(), "09:30".into()],
                    },
                ],
            }
        }
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_csv_uses_user_titles(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("schedule.csv");
        Exporter::new(ExportFormat::Csv, Some(path.clone()), "schedule")
            .export_schedule(&ctx.columns, &ctx.rows)
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines, vec!["ID,Date,Guest,Time", "7,05.03.2024,Anna,10:00", "3,01.03.2024,-,09:30"]);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_json_is_keyed_by_column_id(ctx: &mut ExportTestContext) {
        let path = ctx.temp_dir.path().join("schedule.json");
        Exporter::new(ExportFormat::Json, Some(path.clone()), "schedule")
            .export_schedule(&ctx.columns, &ctx.rows)
            .unwrap();

        let records: Vec<Value> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["id"], 7);
        assert_eq!(records[0]["client"], "Anna");
        assert_eq!(records[1]["time"], "09:30");
        assert!(records[0].get("Guest").is_none());
    }

    #[test]
    fn test_default_output_name() {
        let exporter = Exporter::new(ExportFormat::Json, None, "schedule_2024-03");
        assert_eq!(exporter.output_path().to_str(), Some("schedule_2024-03.json"));
    }
}
