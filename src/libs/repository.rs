//! Repository facade over the four data-access objects.
//!
//! Presentation code talks to [`ScheduleRepository`] only; the SQLite
//! implementation wires the accessors to one shared [`Db`] handle, which is
//! passed in by whoever owns the application lifetime.

use crate::db::appointments::Appointments;
use crate::db::clients::Clients;
use crate::db::columns::ColumnConfigurations;
use crate::db::db::{Db, Table};
use crate::db::services::Services;
use crate::libs::appointment::{Appointment, AppointmentFilter};
use crate::libs::client::Client;
use crate::libs::column::{initial_schedule_config, ColumnConfiguration, ColumnKind};
use crate::libs::error::Result;
use crate::libs::live::LiveQuery;
use crate::libs::paging::{Pager, PagingConfig};
use crate::libs::service::Service;

pub trait ScheduleRepository: Send + Sync {
    /// Windowed feed of appointments matching `filter`, newest first. The
    /// pager restarts when the appointments table changes.
    fn appointments_pager(&self, filter: AppointmentFilter, config: PagingConfig) -> Pager<Appointment>;
    fn appointments_for_client(&self, client_id: i64) -> LiveQuery<Vec<Appointment>>;
    fn get_appointment(&self, id: i64) -> Result<Option<Appointment>>;
    fn insert_appointment(&self, appointment: &Appointment) -> Result<i64>;
    fn update_appointment(&self, appointment: &Appointment) -> Result<()>;
    fn delete_appointment(&self, id: i64) -> Result<()>;
    fn set_optional_value(&self, appointment_id: i64, kind: ColumnKind, value: Option<&str>) -> Result<()>;

    fn visible_columns(&self, screen_name: &str) -> LiveQuery<Vec<ColumnConfiguration>>;
    fn hidden_columns(&self, screen_name: &str) -> LiveQuery<Vec<ColumnConfiguration>>;
    fn all_columns(&self, screen_name: &str) -> Result<Vec<ColumnConfiguration>>;
    fn column(&self, column_id: &str, screen_name: &str) -> Result<Option<ColumnConfiguration>>;
    fn max_visible_order(&self, screen_name: &str) -> Result<Option<i32>>;
    fn update_column_configuration(&self, config: &ColumnConfiguration) -> Result<()>;
    fn update_column_configurations(&self, configs: &[ColumnConfiguration]) -> Result<()>;
    fn seed_schedule_columns(&self) -> Result<()>;

    fn get_client_by_id(&self, id: i64) -> Result<Option<Client>>;
    fn insert_client(&self, client: &Client) -> Result<i64>;
    fn update_client(&self, client: &Client) -> Result<()>;
    fn delete_client(&self, id: i64) -> Result<()>;
    fn clients(&self) -> LiveQuery<Vec<Client>>;
    fn search_clients(&self, query: &str) -> Result<Vec<Client>>;

    fn get_service_by_id(&self, id: i64) -> Result<Option<Service>>;
    fn insert_service(&self, service: &Service) -> Result<i64>;
    fn update_service(&self, service: &Service) -> Result<()>;
    fn delete_service(&self, id: i64) -> Result<()>;
    fn delete_services(&self, ids: &[i64]) -> Result<usize>;
    fn services(&self) -> LiveQuery<Vec<Service>>;
    fn search_services(&self, query: &str) -> Result<Vec<Service>>;
}

#[derive(Clone)]
pub struct SqliteScheduleRepository {
    db: Db,
    appointments: Appointments,
    columns: ColumnConfigurations,
    clients: Clients,
    services: Services,
}

impl SqliteScheduleRepository {
    pub fn new(db: &Db) -> Self {
        SqliteScheduleRepository {
            db: db.clone(),
            appointments: Appointments::new(db),
            columns: ColumnConfigurations::new(db),
            clients: Clients::new(db),
            services: Services::new(db),
        }
    }
}

impl ScheduleRepository for SqliteScheduleRepository {
    fn appointments_pager(&self, filter: AppointmentFilter, config: PagingConfig) -> Pager<Appointment> {
        let appointments = self.appointments.clone();
        Pager::new(config, move |limit, offset| appointments.page(filter, limit, offset)).watching(&self.db, &[Table::Appointments])
    }

    fn appointments_for_client(&self, client_id: i64) -> LiveQuery<Vec<Appointment>> {
        self.appointments.watch_for_client(client_id)
    }

    fn get_appointment(&self, id: i64) -> Result<Option<Appointment>> {
        self.appointments.get_by_id(id)
    }

    fn insert_appointment(&self, appointment: &Appointment) -> Result<i64> {
        self.appointments.insert(appointment)
    }

    fn update_appointment(&self, appointment: &Appointment) -> Result<()> {
        self.appointments.update(appointment)
    }

    fn delete_appointment(&self, id: i64) -> Result<()> {
        self.appointments.delete(id)
    }

    fn set_optional_value(&self, appointment_id: i64, kind: ColumnKind, value: Option<&str>) -> Result<()> {
        self.appointments.set_optional_value(appointment_id, kind, value)
    }

    fn visible_columns(&self, screen_name: &str) -> LiveQuery<Vec<ColumnConfiguration>> {
        self.columns.watch_visibility(screen_name, true)
    }

    fn hidden_columns(&self, screen_name: &str) -> LiveQuery<Vec<ColumnConfiguration>> {
        self.columns.watch_visibility(screen_name, false)
    }

    fn all_columns(&self, screen_name: &str) -> Result<Vec<ColumnConfiguration>> {
        self.columns.for_screen(screen_name)
    }

    fn column(&self, column_id: &str, screen_name: &str) -> Result<Option<ColumnConfiguration>> {
        self.columns.get(column_id, screen_name)
    }

    fn max_visible_order(&self, screen_name: &str) -> Result<Option<i32>> {
        self.columns.max_visible_order(screen_name)
    }

    fn update_column_configuration(&self, config: &ColumnConfiguration) -> Result<()> {
        self.columns.update(config)
    }

    fn update_column_configurations(&self, configs: &[ColumnConfiguration]) -> Result<()> {
        self.columns.update_all(configs)
    }

    fn seed_schedule_columns(&self) -> Result<()> {
        self.columns.insert_or_update_all(&initial_schedule_config())
    }

    fn get_client_by_id(&self, id: i64) -> Result<Option<Client>> {
        self.clients.get_by_id(id)
    }

    fn insert_client(&self, client: &Client) -> Result<i64> {
        self.clients.insert(client)
    }

    fn update_client(&self, client: &Client) -> Result<()> {
        self.clients.update(client)
    }

    fn delete_client(&self, id: i64) -> Result<()> {
        self.clients.delete(id)
    }

    fn clients(&self) -> LiveQuery<Vec<Client>> {
        self.clients.watch_all()
    }

    fn search_clients(&self, query: &str) -> Result<Vec<Client>> {
        self.clients.search(query)
    }

    fn get_service_by_id(&self, id: i64) -> Result<Option<Service>> {
        self.services.get_by_id(id)
    }

    fn insert_service(&self, service: &Service) -> Result<i64> {
        self.services.insert(service)
    }

    fn update_service(&self, service: &Service) -> Result<()> {
        self.services.update(service)
    }

    fn delete_service(&self, id: i64) -> Result<()> {
        self.services.delete(id)
    }

    fn delete_services(&self, ids: &[i64]) -> Result<usize> {
        self.services.delete_many(ids)
    }

    fn services(&self) -> LiveQuery<Vec<Service>> {
        self.services.watch_all()
    }

    fn search_services(&self, query: &str) -> Result<Vec<Service>> {
        self.services.search(query)
    }
}
