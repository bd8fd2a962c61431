#[cfg(test)]
mod tests {
    use chrono::{Datelike, Local, NaiveDate};
    use salonbook::db::db::Db;
    use salonbook::libs::appointment::{Appointment, AppointmentFilter, DEFAULT_STATUS};
    use salonbook::libs::client::Client;
    use salonbook::libs::error::ScheduleError;
    use salonbook::libs::paging::PagingConfig;
    use salonbook::libs::render::RenderOptions;
    use salonbook::libs::repository::{ScheduleRepository, SqliteScheduleRepository};
    use salonbook::libs::schedule::ScheduleViewModel;
    use salonbook::libs::service::Service;
    use salonbook::libs::state::StateStore;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    struct ViewModelTestContext {
        temp_dir: TempDir,
        repository: Arc<SqliteScheduleRepository>,
    }

    impl ViewModelTestContext {
        fn state_path(&self) -> PathBuf {
            self.temp_dir.path().join("state.json")
        }

        fn view_model(&self) -> ScheduleViewModel {
            self.view_model_with(PagingConfig::default())
        }

        fn view_model_with(&self, paging: PagingConfig) -> ScheduleViewModel {
            ScheduleViewModel::new(self.repository.clone(), StateStore::at(self.state_path()), paging, RenderOptions::default()).unwrap()
        }
    }

    impl AsyncTestContext for ViewModelTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("salonbook.db")).unwrap();
            ViewModelTestContext {
                repository: Arc::new(SqliteScheduleRepository::new(&db)),
                temp_dir,
            }
        }

        async fn teardown(self) {}
    }

    fn march(day: u32, hour: u32) -> Appointment {
        let start = NaiveDate::from_ymd_opt(2024, 3, day).unwrap().and_hms_opt(hour, 0, 0).unwrap();
        Appointment::new(start, 60)
    }

    #[test_context(ViewModelTestContext)]
    #[tokio::test]
    async fn test_defaults_to_current_month(ctx: &mut ViewModelTestContext) {
        let view_model = ctx.view_model();
        let today = Local::now().date_naive();

        assert_eq!(view_model.selected_year(), today.year());
        assert_eq!(view_model.selected_month(), today.month());
        assert_eq!(view_model.generation(), 0);
    }

    #[test_context(ViewModelTestContext)]
    #[tokio::test]
    async fn test_filter_survives_restart(ctx: &mut ViewModelTestContext) {
        let mut view_model = ctx.view_model();
        view_model.set_filter(2023, 11).unwrap();
        assert_eq!(view_model.generation(), 1);
        drop(view_model);

        let restored = ctx.view_model();
        assert_eq!(restored.filter(), AppointmentFilter::Month { year: 2023, month: 11 });
    }

    #[test_context(ViewModelTestContext)]
    #[tokio::test]
    async fn test_invalid_month_keeps_state(ctx: &mut ViewModelTestContext) {
        let mut view_model = ctx.view_model();
        view_model.set_filter(2024, 5).unwrap();

        assert!(matches!(view_model.set_filter(2024, 13), Err(ScheduleError::Validation(_))));
        assert!(matches!(view_model.set_filter(2024, 0), Err(ScheduleError::Validation(_))));
        assert_eq!(view_model.selected_month(), 5);
        assert_eq!(ctx.view_model().selected_month(), 5);
    }

    #[test_context(ViewModelTestContext)]
    #[tokio::test]
    async fn test_show_all_is_not_persisted(ctx: &mut ViewModelTestContext) {
        ctx.repository.insert_appointment(&march(3, 10)).unwrap();
        let start = NaiveDate::from_ymd_opt(2022, 7, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
        ctx.repository.insert_appointment(&Appointment::new(start, 30)).unwrap();

        let mut view_model = ctx.view_model();
        view_model.set_filter(2024, 3).unwrap();
        assert_eq!(view_model.all_rows().unwrap().len(), 1);

        view_model.show_all();
        assert_eq!(view_model.filter(), AppointmentFilter::All);
        assert_eq!(view_model.all_rows().unwrap().len(), 2);

        assert_eq!(ctx.view_model().filter(), AppointmentFilter::Month { year: 2024, month: 3 });
    }

    #[test_context(ViewModelTestContext)]
    #[tokio::test]
    async fn test_next_page_restarts_on_change(ctx: &mut ViewModelTestContext) {
        for day in 1..=3 {
            ctx.repository.insert_appointment(&march(day, 10)).unwrap();
        }
        let mut view_model = ctx.view_model_with(PagingConfig { page_size: 2 });
        view_model.set_filter(2024, 3).unwrap();
        let generation = view_model.generation();

        let first = view_model.next_page().unwrap().unwrap();
        assert_eq!((first.index, first.items.len(), first.has_more), (0, 2, true));

        ctx.repository.insert_appointment(&march(4, 10)).unwrap();

        let restarted = view_model.next_page().unwrap().unwrap();
        assert_eq!(restarted.index, 0);
        assert_eq!(view_model.generation(), generation + 1);
        assert_eq!(view_model.next_page().unwrap().unwrap().items.len(), 2);
        assert!(view_model.next_page().unwrap().is_none());
    }

    #[test_context(ViewModelTestContext)]
    #[tokio::test]
    async fn test_rows_render_related_entities(ctx: &mut ViewModelTestContext) {
        let client_id = ctx.repository.insert_client(&Client::new("Anna").with_phone("+375291112233")).unwrap();
        let service_id = ctx.repository.insert_service(&Service::new("Manicure", Some(3000), Some("BYN"), Some(60))).unwrap();
        let appointment = march(5, 10).with_client(client_id).with_service(service_id).with_cost(3000, "BYN");

        let mut view_model = ctx.view_model();
        view_model.set_filter(2024, 3).unwrap();
        let id = view_model.add_appointment(appointment).await.unwrap();

        let rows = view_model.page(0).unwrap().items;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].appointment_id, Some(id));
        assert_eq!(
            rows[0].cells,
            vec!["05.03.2024", "Anna", "10:00", "60 min", "Manicure", "", "+375291112233", "30.00 BYN", "Scheduled"]
        );

        ctx.repository.delete_client(client_id).unwrap();
        let rows = view_model.page(0).unwrap().items;
        assert_eq!(rows[0].cells[1], "-");
        assert_eq!(rows[0].cells[6], "-");
    }

    #[test_context(ViewModelTestContext)]
    #[tokio::test]
    async fn test_add_forces_default_status(ctx: &mut ViewModelTestContext) {
        let view_model = ctx.view_model();
        let mut appointment = march(7, 12);
        appointment.id = Some(42);
        appointment.status = "Done".to_string();

        let id = view_model.add_appointment(appointment).await.unwrap();
        let stored = ctx.repository.get_appointment(id).unwrap().unwrap();
        assert_eq!(stored.status, DEFAULT_STATUS);
    }

    #[test_context(ViewModelTestContext)]
    #[tokio::test]
    async fn test_column_writes(ctx: &mut ViewModelTestContext) {
        let view_model = ctx.view_model();

        let shown = view_model.show_column("optional_1").await.unwrap();
        assert_eq!(shown.display_order, 9);
        let renamed = view_model.rename_optional_column("optional_1", "Room").await.unwrap();
        assert_eq!(renamed.user_title, "Room");
        assert!(matches!(view_model.rename_optional_column("date", "Day").await, Err(ScheduleError::Validation(_))));

        let columns = view_model.columns().unwrap();
        assert_eq!(columns.last().map(|c| c.user_title.as_str()), Some("Room"));

        let hidden = view_model.hide_column("optional_1").await.unwrap();
        assert!(!hidden.is_visible);
    }

    #[test_context(ViewModelTestContext)]
    #[tokio::test]
    async fn test_optional_value_writes(ctx: &mut ViewModelTestContext) {
        let view_model = ctx.view_model();
        let id = view_model.add_appointment(march(8, 9)).await.unwrap();

        view_model.set_optional_value(id, "optional_1", Some("window seat".to_string())).await.unwrap();
        let stored = ctx.repository.get_appointment(id).unwrap().unwrap();
        assert_eq!(stored.optional_field1_value.as_deref(), Some("window seat"));

        assert!(matches!(
            view_model.set_optional_value(id, "status", Some("Done".to_string())).await,
            Err(ScheduleError::Validation(_))
        ));
    }

    #[test_context(ViewModelTestContext)]
    #[tokio::test]
    async fn test_detached_write_completes(ctx: &mut ViewModelTestContext) {
        let view_model = ctx.view_model();
        view_model.add_appointment(march(9, 15)).detach();

        let mut stored = 0;
        for _ in 0..100 {
            stored = ctx.repository.appointments_pager(AppointmentFilter::All, PagingConfig::default()).page(0).unwrap().items.len();
            if stored == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(stored, 1);
    }

    #[test_context(ViewModelTestContext)]
    #[tokio::test]
    async fn test_page_beyond_the_end_is_empty(ctx: &mut ViewModelTestContext) {
        ctx.repository.insert_appointment(&march(3, 10)).unwrap();
        let mut view_model = ctx.view_model();
        view_model.set_filter(2024, 3).unwrap();

        assert!(view_model.page(5).unwrap().items.is_empty());

        let far = view_model.page(usize::MAX / 10).unwrap();
        assert!(far.items.is_empty());
        assert!(!far.has_more);
    }

    #[test_context(ViewModelTestContext)]
    #[tokio::test]
    async fn test_huge_page_size_still_lists_rows(ctx: &mut ViewModelTestContext) {
        for day in 1..=3 {
            ctx.repository.insert_appointment(&march(day, 10)).unwrap();
        }
        let mut view_model = ctx.view_model_with(PagingConfig { page_size: usize::MAX });
        view_model.set_filter(2024, 3).unwrap();

        assert_eq!(view_model.all_rows().unwrap().len(), 3);
        let page = view_model.next_page().unwrap().unwrap();
        assert_eq!(page.items.len(), 3);
        assert!(!page.has_more);
    }
}
