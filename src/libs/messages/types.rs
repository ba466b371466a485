#[derive(Debug, Clone)]
pub enum Message {
    // === TASK API MESSAGES ===
    TaskCreated,
    TaskUpdated,
    TaskDeleted,
    TaskStatusChanged,
    TaskNotFound,
    InvalidData,
    TaskListFailed,
    TaskFetchFailed,
    TaskCreateFailed,
    TaskUpdateFailed,
    TaskDeleteFailed,
    TaskToggleFailed,
    StatisticsFailed,
    SearchFailed,
    ApiHealthy,

    // === VALIDATION MESSAGES ===
    TitleRequired,
    TitleMustBeString,
    TitleTooLong,
    DescriptionMustBeString,
    DescriptionTooLong,
    PriorityMustBeInteger,
    PriorityTooLow,
    PriorityTooHigh,
    CompletedMustBeBoolean,
    DueDateInvalid,
    DueDateNotFuture,
    OrderByInvalid(String),   // field
    DirectionInvalid(String), // direction

    // === CLIENT STATUS MESSAGES ===
    TaskAddedWithTitle(String), // title
    TaskMarkedCompleted,
    TaskMarkedPending,
    TaskRemoved,
    TasksLoaded(usize), // count
    TaskAddFailed,
    TaskRemoveFailed,
    TasksLoadFailed,
    LoadingTasks,
    NoTasks,
    TaskNotInList(i64), // id
    FormTitleRequired,
    FormTitleTooLong(usize), // max length
    FormTitleTooShort(usize), // min length
    PromptTaskTitle,

    // === GATEWAY MESSAGES ===
    ApiErrorLogged(String), // normalized error

    // === STATISTICS MESSAGES ===
    StatisticsHeader,
    StatisticsTotal,
    StatisticsCompleted,
    StatisticsPending,
    StatisticsOverdue,
    StatisticsPercent,
    SearchResultsHeader(String), // term

    // === SERVER MESSAGES ===
    ServerStarting(String),        // address
    ServerStopped,
    ShutdownSignalReceived,
    ServerBindFailed(String, String), // address, error
    ServerConfigLoaded(String, u16, bool), // host, port, debug
    AvailableEndpoints,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleServer,
    ConfigModuleClient,
    InvalidEnvValue(String, String), // variable, value
    PromptSelectModules,
    PromptServerHost,
    PromptServerPort,
    PromptServerDebug,
    PromptAllowedOrigins,
    PromptDatabasePath,
    PromptApiUrl,

    // === SEED MESSAGES ===
    TasksSeeded(usize), // count

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
    MigrationHistoryEntry(u32, String, String), // version, name, applied_at
}
