/// Every user-facing text the CLI prints. The wording lives in
/// [`display`](super::display); callers only pick the variant.
#[derive(Debug, Clone)]
pub enum Message {
    // === CLIENT MESSAGES ===
    ClientCreated(i64),
    ClientUpdated(i64),
    ClientDeleted(i64),
    ClientNotFound(i64),
    ClientsHeader,
    ClientAppointmentsHeader(String), // client name
    NoClientsFound,
    ConfirmDeleteClient(String), // client name

    // === SERVICE MESSAGES ===
    ServiceCreated(i64),
    ServiceUpdated(i64),
    ServiceNotFound(i64),
    ServicesDeletedCount(usize),
    ServicesHeader,
    NoServicesFound,
    NoServiceIdsProvided,
    ConfirmDeleteServices(usize),

    // === APPOINTMENT MESSAGES ===
    AppointmentCreated(i64),
    AppointmentUpdated(i64),
    AppointmentDeleted(i64),
    AppointmentNotFound(i64),
    OptionalValueSet(i64, String), // appointment id, column title
    ConfirmDeleteAppointment(i64),
    DurationRequired,
    InvalidCost(String),
    InvalidDate(String),
    InvalidTime(String),

    // === COLUMN MESSAGES ===
    ColumnShown(String),
    ColumnHidden(String),
    ColumnRenamed(String, String), // old title, new title
    ColumnRenameRejected(String),  // column id
    ColumnNotEditable(String),     // column title
    EmptyColumnTitle,
    ColumnNotFound(String),
    ColumnsReset,
    VisibleColumnsHeader,
    HiddenColumnsHeader,
    NoHiddenColumns,

    // === SCHEDULE MESSAGES ===
    ScheduleHeader(String), // period
    ScheduleAllTime,
    NoAppointments,
    PageFooter(usize, bool), // page number, more pages follow
    FilterSet(i32, u32),
    ScheduleExported(String), // path

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleDatabase,
    ConfigModuleDisplay,
    ConfigModulePaging,
    PromptDatabasePath,
    PromptUtcOffset,
    PromptPageSize,
    DatabaseLocation(String),

    // === MIGRATION MESSAGES ===
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),
    MigrationFailed(u32, String), // version, error
    DatabaseUpToDate,

    // === GENERAL MESSAGES ===
    OperationCancelled,
}
