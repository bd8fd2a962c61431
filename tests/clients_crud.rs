#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use salonbook::db::db::Db;
    use salonbook::libs::appointment::Appointment;
    use salonbook::libs::client::Client;
    use salonbook::libs::error::ScheduleError;
    use salonbook::libs::repository::{ScheduleRepository, SqliteScheduleRepository};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ClientTestContext {
        _temp_dir: TempDir,
        repository: SqliteScheduleRepository,
    }

    impl TestContext for ClientTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("salonbook.db")).unwrap();
            ClientTestContext {
                repository: SqliteScheduleRepository::new(&db),
                _temp_dir: temp_dir,
            }
        }
    }

    fn appointment() -> Appointment {
        let start = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap().and_hms_opt(10, 0, 0).unwrap();
        Appointment::new(start, 60)
    }

    #[test_context(ClientTestContext)]
    #[test]
    fn test_client_insert_and_get(ctx: &mut ClientTestContext) {
        let mut client = Client::new("Anna").with_phone("+375 29 111 22 33");
        client.telegram = Some("@anna".to_string());

        let id = ctx.repository.insert_client(&client).unwrap();
        let stored = ctx.repository.get_client_by_id(id).unwrap().unwrap();

        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.name.as_deref(), Some("Anna"));
        assert_eq!(stored.contacts(), vec!["+375 29 111 22 33", "@anna"]);
    }

    #[test_context(ClientTestContext)]
    #[test]
    fn test_client_update(ctx: &mut ClientTestContext) {
        let id = ctx.repository.insert_client(&Client::new("Olga")).unwrap();

        let mut client = ctx.repository.get_client_by_id(id).unwrap().unwrap();
        client.name = Some("Olga K.".to_string());
        client.notes = Some("prefers mornings".to_string());
        ctx.repository.update_client(&client).unwrap();

        let updated = ctx.repository.get_client_by_id(id).unwrap().unwrap();
        assert_eq!(updated.name.as_deref(), Some("Olga K."));
        assert_eq!(updated.notes.as_deref(), Some("prefers mornings"));
    }

    #[test_context(ClientTestContext)]
    #[test]
    fn test_missing_client_errors(ctx: &mut ClientTestContext) {
        let mut ghost = Client::new("Ghost");
        ghost.id = Some(404);

        assert!(matches!(ctx.repository.update_client(&ghost), Err(ScheduleError::NotFound { .. })));
        assert!(matches!(ctx.repository.delete_client(404), Err(ScheduleError::NotFound { .. })));
        assert!(ctx.repository.get_client_by_id(404).unwrap().is_none());
    }

    #[test_context(ClientTestContext)]
    #[test]
    fn test_list_and_search(ctx: &mut ClientTestContext) {
        for name in ["Vera", "Anna", "Marianna"] {
            ctx.repository.insert_client(&Client::new(name)).unwrap();
        }

        let names = |clients: Vec<Client>| clients.into_iter().filter_map(|c| c.name).collect::<Vec<_>>();
        assert_eq!(names(ctx.repository.clients().current().unwrap()), vec!["Anna", "Marianna", "Vera"]);
        assert_eq!(names(ctx.repository.search_clients("anna").unwrap()), vec!["Anna", "Marianna"]);
        assert!(ctx.repository.search_clients("zzz").unwrap().is_empty());
    }

    #[test_context(ClientTestContext)]
    #[test]
    fn test_delete_keeps_appointments(ctx: &mut ClientTestContext) {
        let client_id = ctx.repository.insert_client(&Client::new("Irina")).unwrap();
        let appointment_id = ctx.repository.insert_appointment(&appointment().with_client(client_id)).unwrap();

        ctx.repository.delete_client(client_id).unwrap();

        let appointment = ctx.repository.get_appointment(appointment_id).unwrap().unwrap();
        assert_eq!(appointment.client_id, None);
    }

    #[test_context(ClientTestContext)]
    #[test]
    fn test_client_appointments(ctx: &mut ClientTestContext) {
        let anna = ctx.repository.insert_client(&Client::new("Anna")).unwrap();
        let vera = ctx.repository.insert_client(&Client::new("Vera")).unwrap();
        ctx.repository.insert_appointment(&appointment().with_client(anna)).unwrap();
        ctx.repository.insert_appointment(&appointment().with_client(anna)).unwrap();
        ctx.repository.insert_appointment(&appointment().with_client(vera)).unwrap();

        let appointments = ctx.repository.appointments_for_client(anna).current().unwrap();
        assert_eq!(appointments.len(), 2);
        assert!(appointments.iter().all(|a| a.client_id == Some(anna)));
    }
}
