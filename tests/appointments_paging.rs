#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use salonbook::db::appointments::Appointments;
    use salonbook::db::db::Db;
    use salonbook::libs::appointment::{day_index, Appointment, AppointmentFilter};
    use salonbook::libs::column::ColumnKind;
    use salonbook::libs::error::ScheduleError;
    use salonbook::libs::paging::PagingConfig;
    use salonbook::libs::repository::{ScheduleRepository, SqliteScheduleRepository};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    const JANUARY: AppointmentFilter = AppointmentFilter::Month { year: 2024, month: 1 };

    struct PagingTestContext {
        _temp_dir: TempDir,
        db: Db,
        repository: SqliteScheduleRepository,
    }

    impl TestContext for PagingTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("salonbook.db")).unwrap();
            PagingTestContext {
                repository: SqliteScheduleRepository::new(&db),
                db,
                _temp_dir: temp_dir,
            }
        }
    }

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn insert_at(repository: &SqliteScheduleRepository, start: NaiveDateTime) -> i64 {
        repository.insert_appointment(&Appointment::new(start, 45)).unwrap()
    }

    #[test_context(PagingTestContext)]
    #[test]
    fn test_month_pages_in_twenties(ctx: &mut PagingTestContext) {
        for i in 0..45u32 {
            insert_at(&ctx.repository, at(2024, 1, 1 + i % 28, 9 + i % 8, 0));
        }

        let mut pager = ctx.repository.appointments_pager(JANUARY, PagingConfig::default());
        let sizes: Vec<(usize, bool)> = std::iter::from_fn(|| pager.load_next().unwrap())
            .map(|page| (page.items.len(), page.has_more))
            .collect();

        assert_eq!(sizes, vec![(20, true), (20, true), (5, false)]);
        assert!(pager.load_next().unwrap().is_none());
    }

    #[test_context(PagingTestContext)]
    #[test]
    fn test_month_boundaries(ctx: &mut PagingTestContext) {
        insert_at(&ctx.repository, at(2023, 12, 31, 23, 59));
        let first = insert_at(&ctx.repository, at(2024, 1, 1, 0, 0));
        let last = insert_at(&ctx.repository, at(2024, 1, 31, 23, 59));
        insert_at(&ctx.repository, at(2024, 2, 1, 0, 0));

        let page = ctx.repository.appointments_pager(JANUARY, PagingConfig::default()).page(0).unwrap();
        let ids: Vec<_> = page.items.iter().filter_map(|a| a.id).collect();

        assert_eq!(ids, vec![last, first]);
        assert!(!page.has_more);
    }

    #[test_context(PagingTestContext)]
    #[test]
    fn test_newest_first(ctx: &mut PagingTestContext) {
        let morning = insert_at(&ctx.repository, at(2024, 1, 10, 9, 0));
        let next_day = insert_at(&ctx.repository, at(2024, 1, 11, 8, 0));
        let evening = insert_at(&ctx.repository, at(2024, 1, 10, 18, 0));

        let page = ctx.repository.appointments_pager(AppointmentFilter::All, PagingConfig::default()).page(0).unwrap();
        let ids: Vec<_> = page.items.iter().filter_map(|a| a.id).collect();

        assert_eq!(ids, vec![next_day, evening, morning]);
        assert_eq!(page.items[0].date, day_index(NaiveDate::from_ymd_opt(2024, 1, 11).unwrap()));
    }

    #[test_context(PagingTestContext)]
    #[test]
    fn test_count_follows_filter(ctx: &mut PagingTestContext) {
        insert_at(&ctx.repository, at(2024, 1, 5, 10, 0));
        insert_at(&ctx.repository, at(2024, 1, 6, 10, 0));
        insert_at(&ctx.repository, at(2024, 3, 1, 10, 0));

        let appointments = Appointments::new(&ctx.db);
        assert_eq!(appointments.count(JANUARY).unwrap(), 2);
        assert_eq!(appointments.count(AppointmentFilter::All).unwrap(), 3);
        assert!(matches!(
            appointments.count(AppointmentFilter::Month { year: 2024, month: 13 }),
            Err(ScheduleError::Validation(_))
        ));
    }

    #[test_context(PagingTestContext)]
    #[test]
    fn test_pager_restarts_after_insert(ctx: &mut PagingTestContext) {
        insert_at(&ctx.repository, at(2024, 1, 5, 10, 0));
        let mut pager = ctx.repository.appointments_pager(JANUARY, PagingConfig { page_size: 1 });

        assert!(pager.load_next().unwrap().is_some());
        assert!(!pager.refresh_if_changed());

        insert_at(&ctx.repository, at(2024, 1, 6, 10, 0));
        assert!(pager.refresh_if_changed());
        assert_eq!(pager.generation(), 1);

        let page = pager.load_next().unwrap().unwrap();
        assert_eq!(page.index, 0);
        assert!(page.has_more);
    }

    #[test_context(PagingTestContext)]
    #[test]
    fn test_optional_values(ctx: &mut PagingTestContext) {
        let id = insert_at(&ctx.repository, at(2024, 1, 5, 10, 0));

        ctx.repository.set_optional_value(id, ColumnKind::Optional2, Some("room 3")).unwrap();
        let stored = ctx.repository.get_appointment(id).unwrap().unwrap();
        assert_eq!(stored.optional_field2_value.as_deref(), Some("room 3"));
        assert_eq!(stored.optional_field1_value, None);

        assert!(matches!(
            ctx.repository.set_optional_value(id, ColumnKind::Status, Some("Done")),
            Err(ScheduleError::Validation(_))
        ));
        assert!(matches!(
            ctx.repository.set_optional_value(999, ColumnKind::Optional1, None),
            Err(ScheduleError::NotFound { .. })
        ));
    }

    #[test_context(PagingTestContext)]
    #[test]
    fn test_unknown_client_is_rejected(ctx: &mut PagingTestContext) {
        let appointment = Appointment::new(at(2024, 1, 5, 10, 0), 30).with_client(999);

        assert!(matches!(ctx.repository.insert_appointment(&appointment), Err(ScheduleError::Storage(_))));
    }

    #[test_context(PagingTestContext)]
    #[test]
    fn test_update_and_delete(ctx: &mut PagingTestContext) {
        let id = insert_at(&ctx.repository, at(2024, 1, 5, 10, 0));

        let mut appointment = ctx.repository.get_appointment(id).unwrap().unwrap();
        appointment.status = "Done".to_string();
        appointment.notes = Some("gel polish".to_string());
        ctx.repository.update_appointment(&appointment).unwrap();
        assert_eq!(ctx.repository.get_appointment(id).unwrap().unwrap(), appointment);

        ctx.repository.delete_appointment(id).unwrap();
        assert!(ctx.repository.get_appointment(id).unwrap().is_none());
        assert!(matches!(ctx.repository.delete_appointment(id), Err(ScheduleError::NotFound { .. })));
    }
}
