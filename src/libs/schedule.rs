//! Presentation state of the schedule screen.
//!
//! [`ScheduleViewModel`] owns the month filter (persisted through
//! [`StateStore`] so it survives restarts), the paged appointment feed for
//! that filter and the column registry of the screen. Reads are synchronous;
//! writes run on tokio's blocking pool and hand back a [`WriteHandle`].
//! A started write always runs to completion, even if its handle is dropped.

use crate::libs::appointment::{month_day_range, Appointment, AppointmentFilter, DEFAULT_STATUS};
use crate::libs::client::Client;
use crate::libs::column::{ColumnConfiguration, ColumnKind};
use crate::libs::error::{Result, ScheduleError};
use crate::libs::live::LiveQuery;
use crate::libs::paging::{Page, Pager, PagingConfig};
use crate::libs::registry::ColumnRegistry;
use crate::libs::render::{RenderOptions, RowContext, RowRenderer};
use crate::libs::repository::ScheduleRepository;
use crate::libs::service::Service;
use crate::libs::state::{SavedState, StateStore};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::task::JoinHandle;
use tracing::debug;

/// Pending result of a background write. Await it for the outcome, or
/// [`detach`](Self::detach) it to let the write finish unobserved.
#[must_use = "await the handle or call detach()"]
pub struct WriteHandle<T> {
    inner: JoinHandle<Result<T>>,
}

impl<T: Send + 'static> WriteHandle<T> {
    fn spawn(write: impl FnOnce() -> Result<T> + Send + 'static) -> Self {
        WriteHandle {
            inner: tokio::task::spawn_blocking(write),
        }
    }
}

impl<T> WriteHandle<T> {
    pub fn detach(self) {}
}

impl<T> Future for WriteHandle<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.inner)
            .poll(cx)
            .map(|joined| joined.map_err(ScheduleError::from).and_then(|result| result))
    }
}

/// One rendered line of the schedule table, cells in visible-column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub appointment_id: Option<i64>,
    pub cells: Vec<String>,
}

pub struct ScheduleViewModel {
    repository: Arc<dyn ScheduleRepository>,
    registry: ColumnRegistry,
    store: StateStore,
    state: SavedState,
    filter: AppointmentFilter,
    paging: PagingConfig,
    renderer: RowRenderer,
    pager: Pager<Appointment>,
    generation: u64,
}

impl ScheduleViewModel {
    /// Restores the saved month filter, or starts at the current month.
    pub fn new(repository: Arc<dyn ScheduleRepository>, store: StateStore, paging: PagingConfig, options: RenderOptions) -> Result<Self> {
        let state = store.load().map_err(|e| ScheduleError::State(e.to_string()))?;
        let filter = AppointmentFilter::Month {
            year: state.filter_year,
            month: state.filter_month,
        };
        let pager = repository.appointments_pager(filter, paging);

        Ok(ScheduleViewModel {
            registry: ColumnRegistry::schedule(repository.clone()),
            repository,
            store,
            state,
            filter,
            paging,
            renderer: RowRenderer::new(options),
            pager,
            generation: 0,
        })
    }

    pub fn selected_year(&self) -> i32 {
        self.state.filter_year
    }

    pub fn selected_month(&self) -> u32 {
        self.state.filter_month
    }

    pub fn filter(&self) -> AppointmentFilter {
        self.filter
    }

    /// Bumped whenever the feed restarts; rows from an older generation are
    /// stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    /// Switches the feed to `month` of `year` and remembers the choice.
    pub fn set_filter(&mut self, year: i32, month: u32) -> Result<()> {
        month_day_range(year, month)?;

        let state = SavedState {
            filter_year: year,
            filter_month: month,
        };
        self.store.save(&state).map_err(|e| ScheduleError::State(e.to_string()))?;
        self.state = state;
        self.restart(AppointmentFilter::Month { year, month });
        debug!(year, month, "schedule filter changed");
        Ok(())
    }

    /// Drops the month restriction for this session only.
    pub fn show_all(&mut self) {
        self.restart(AppointmentFilter::All);
    }

    fn restart(&mut self, filter: AppointmentFilter) {
        self.filter = filter;
        self.pager = self.repository.appointments_pager(filter, self.paging);
        self.generation += 1;
    }

    /// Next page of rendered rows. A data change since the previous call
    /// starts over from the first page.
    pub fn next_page(&mut self) -> Result<Option<Page<ScheduleRow>>> {
        if self.pager.refresh_if_changed() {
            self.generation += 1;
        }
        let columns = self.columns()?;
        match self.pager.load_next()? {
            Some(page) => Ok(Some(self.render_page(page, &columns)?)),
            None => Ok(None),
        }
    }

    pub fn page(&self, index: usize) -> Result<Page<ScheduleRow>> {
        let columns = self.columns()?;
        self.render_page(self.pager.page(index)?, &columns)
    }

    /// Every row matching the current filter, for export.
    pub fn all_rows(&self) -> Result<Vec<ScheduleRow>> {
        let columns = self.columns()?;
        let appointments = self.repository.appointments_pager(self.filter, self.paging).load_all()?;
        self.render_rows(&appointments, &columns)
    }

    /// Visible columns in display order.
    pub fn columns(&self) -> Result<Vec<ColumnConfiguration>> {
        self.registry.visible().current()
    }

    pub fn visible_columns(&self) -> LiveQuery<Vec<ColumnConfiguration>> {
        self.registry.visible()
    }

    pub fn hidden_columns(&self) -> LiveQuery<Vec<ColumnConfiguration>> {
        self.registry.hidden()
    }

    fn render_page(&self, page: Page<Appointment>, columns: &[ColumnConfiguration]) -> Result<Page<ScheduleRow>> {
        Ok(Page {
            index: page.index,
            items: self.render_rows(&page.items, columns)?,
            has_more: page.has_more,
        })
    }

    pub fn render_rows(&self, appointments: &[Appointment], columns: &[ColumnConfiguration]) -> Result<Vec<ScheduleRow>> {
        render_rows(self.repository.as_ref(), &self.renderer, appointments, columns)
    }

    /// Stores a new appointment with the default status and returns its id.
    pub fn add_appointment(&self, mut appointment: Appointment) -> WriteHandle<i64> {
        appointment.id = None;
        appointment.status = DEFAULT_STATUS.to_string();
        let repository = self.repository.clone();
        WriteHandle::spawn(move || repository.insert_appointment(&appointment))
    }

    pub fn update_appointment(&self, appointment: Appointment) -> WriteHandle<()> {
        let repository = self.repository.clone();
        WriteHandle::spawn(move || repository.update_appointment(&appointment))
    }

    pub fn delete_appointment(&self, id: i64) -> WriteHandle<()> {
        let repository = self.repository.clone();
        WriteHandle::spawn(move || repository.delete_appointment(id))
    }

    /// Writes the cell of an optional column; any other column is refused.
    pub fn set_optional_value(&self, appointment_id: i64, column_id: &str, value: Option<String>) -> WriteHandle<()> {
        let repository = self.repository.clone();
        let column_id = column_id.to_string();
        WriteHandle::spawn(move || {
            let kind = ColumnKind::from_id(&column_id)
                .filter(ColumnKind::is_optional)
                .ok_or_else(|| ScheduleError::validation(format!("column '{column_id}' does not hold free text")))?;
            repository.set_optional_value(appointment_id, kind, value.as_deref())
        })
    }

    pub fn show_column(&self, column_id: &str) -> WriteHandle<ColumnConfiguration> {
        let registry = self.registry.clone();
        let column_id = column_id.to_string();
        WriteHandle::spawn(move || registry.show(&column_id))
    }

    pub fn hide_column(&self, column_id: &str) -> WriteHandle<ColumnConfiguration> {
        let registry = self.registry.clone();
        let column_id = column_id.to_string();
        WriteHandle::spawn(move || registry.hide(&column_id))
    }

    pub fn rename_optional_column(&self, column_id: &str, title: &str) -> WriteHandle<ColumnConfiguration> {
        let registry = self.registry.clone();
        let column_id = column_id.to_string();
        let title = title.to_string();
        WriteHandle::spawn(move || registry.rename(&column_id, &title))
    }
}

/// Renders `appointments` against `columns`, fetching each referenced client
/// and service once.
pub fn render_rows(
    repository: &dyn ScheduleRepository,
    renderer: &RowRenderer,
    appointments: &[Appointment],
    columns: &[ColumnConfiguration],
) -> Result<Vec<ScheduleRow>> {
    let mut clients: HashMap<i64, Option<Client>> = HashMap::new();
    let mut services: HashMap<i64, Option<Service>> = HashMap::new();

    for appointment in appointments {
        if let Some(id) = appointment.client_id {
            if !clients.contains_key(&id) {
                clients.insert(id, repository.get_client_by_id(id)?);
            }
        }
        if let Some(id) = appointment.service_id {
            if !services.contains_key(&id) {
                services.insert(id, repository.get_service_by_id(id)?);
            }
        }
    }

    Ok(appointments
        .iter()
        .map(|appointment| {
            let row = RowContext {
                appointment,
                client: appointment.client_id.and_then(|id| clients.get(&id)).and_then(Option::as_ref),
                service: appointment.service_id.and_then(|id| services.get(&id)).and_then(Option::as_ref),
            };
            ScheduleRow {
                appointment_id: appointment.id,
                cells: renderer.render_row(columns, &row),
            }
        })
        .collect())
}
