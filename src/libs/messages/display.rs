//! Display implementation for tarefas application messages.
//!
//! Every user-facing string lives here, in one `match`, so the API envelopes,
//! the validation error map and the terminal client all speak with the same
//! words. Texts that travel over the wire (envelope messages, validation
//! errors, client status lines) are Portuguese, matching the language of the
//! API paths; operational console output is English.
//!
//! ## Usage Integration
//!
//! ```rust
//! use tarefas::libs::messages::Message;
//! use tarefas::{msg_info, msg_success};
//!
//! msg_success!(Message::TaskCreated);
//! msg_info!(Message::TasksLoaded(3));
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK API MESSAGES ===
            Message::TaskCreated => "Tarefa criada com sucesso".to_string(),
            Message::TaskUpdated => "Tarefa atualizada com sucesso".to_string(),
            Message::TaskDeleted => "Tarefa deletada com sucesso".to_string(),
            Message::TaskStatusChanged => "Status da tarefa alterado com sucesso".to_string(),
            Message::TaskNotFound => "Tarefa não encontrada".to_string(),
            Message::InvalidData => "Dados inválidos".to_string(),
            Message::TaskListFailed => "Erro ao listar tarefas".to_string(),
            Message::TaskFetchFailed => "Erro ao buscar tarefa".to_string(),
            Message::TaskCreateFailed => "Erro ao criar tarefa".to_string(),
            Message::TaskUpdateFailed => "Erro ao atualizar tarefa".to_string(),
            Message::TaskDeleteFailed => "Erro ao deletar tarefa".to_string(),
            Message::TaskToggleFailed => "Erro ao alterar status da tarefa".to_string(),
            Message::StatisticsFailed => "Erro ao obter estatísticas".to_string(),
            Message::SearchFailed => "Erro ao buscar tarefas".to_string(),
            Message::ApiHealthy => "API funcionando corretamente".to_string(),

            // === VALIDATION MESSAGES ===
            Message::TitleRequired => "O título da tarefa é obrigatório".to_string(),
            Message::TitleMustBeString => "O título deve ser um texto".to_string(),
            Message::TitleTooLong => "O título não pode ter mais de 255 caracteres".to_string(),
            Message::DescriptionMustBeString => "A descrição deve ser um texto".to_string(),
            Message::DescriptionTooLong => "A descrição não pode ter mais de 1000 caracteres".to_string(),
            Message::PriorityMustBeInteger => "A prioridade deve ser um número inteiro".to_string(),
            Message::PriorityTooLow => "A prioridade deve ser no mínimo 1".to_string(),
            Message::PriorityTooHigh => "A prioridade deve ser no máximo 5".to_string(),
            Message::CompletedMustBeBoolean => "O campo concluída deve ser verdadeiro ou falso".to_string(),
            Message::DueDateInvalid => "A data de vencimento deve ser uma data válida".to_string(),
            Message::DueDateNotFuture => "A data de vencimento deve ser futura".to_string(),
            Message::OrderByInvalid(field) => format!("Campo de ordenação inválido: {}", field),
            Message::DirectionInvalid(direction) => format!("Direção de ordenação inválida: {}", direction),

            // === CLIENT STATUS MESSAGES ===
            Message::TaskAddedWithTitle(title) => format!("Tarefa \"{}\" adicionada com sucesso", title),
            Message::TaskMarkedCompleted => "Tarefa concluída".to_string(),
            Message::TaskMarkedPending => "Tarefa marcada como não concluída".to_string(),
            Message::TaskRemoved => "Tarefa removida com sucesso".to_string(),
            Message::TasksLoaded(count) => format!("Carregadas {} tarefas", count),
            Message::TaskAddFailed => "Erro ao adicionar tarefa".to_string(),
            Message::TaskRemoveFailed => "Erro ao remover tarefa".to_string(),
            Message::TasksLoadFailed => "Erro ao carregar tarefas".to_string(),
            Message::LoadingTasks => "Carregando tarefas...".to_string(),
            Message::NoTasks => "Nenhuma tarefa encontrada".to_string(),
            Message::TaskNotInList(id) => format!("Tarefa {} não está na lista", id),
            Message::FormTitleRequired => "O título é obrigatório".to_string(),
            Message::FormTitleTooLong(max) => format!("O título deve ter no máximo {} caracteres", max),
            Message::FormTitleTooShort(min) => format!("O título deve ter pelo menos {} caracteres", min),
            Message::PromptTaskTitle => "Título da tarefa".to_string(),

            // === GATEWAY MESSAGES ===
            Message::ApiErrorLogged(message) => format!("Erro na API: {}", message),

            // === STATISTICS MESSAGES ===
            Message::StatisticsHeader => "Estatísticas".to_string(),
            Message::StatisticsTotal => "Total".to_string(),
            Message::StatisticsCompleted => "Concluídas".to_string(),
            Message::StatisticsPending => "Pendentes".to_string(),
            Message::StatisticsOverdue => "Atrasadas".to_string(),
            Message::StatisticsPercent => "Concluído (%)".to_string(),
            Message::SearchResultsHeader(term) => format!("Resultados para \"{}\"", term),

            // === SERVER MESSAGES ===
            Message::ServerStarting(address) => format!("Tarefas API started on http://{}", address),
            Message::ServerStopped => "Tarefas API stopped".to_string(),
            Message::ShutdownSignalReceived => "Shutdown signal received".to_string(),
            Message::ServerBindFailed(address, error) => format!("Failed to bind {}: {}", address, error),
            Message::ServerConfigLoaded(host, port, debug) => {
                format!("Configuration loaded: host={}, port={}, debug={}", host, port, debug)
            }
            Message::AvailableEndpoints => "Available endpoints:".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleServer => "Server settings".to_string(),
            Message::ConfigModuleClient => "Client settings".to_string(),
            Message::InvalidEnvValue(variable, value) => format!("Ignoring invalid value for {}: {}", variable, value),
            Message::PromptSelectModules => "Select sections to configure".to_string(),
            Message::PromptServerHost => "Enter the host to listen on".to_string(),
            Message::PromptServerPort => "Enter the port to listen on".to_string(),
            Message::PromptServerDebug => "Include error details in API responses? (debug mode)".to_string(),
            Message::PromptAllowedOrigins => "Enter allowed CORS origins (comma separated)".to_string(),
            Message::PromptDatabasePath => "Enter the database file path (empty for default)".to_string(),
            Message::PromptApiUrl => "Enter the API base URL used by the client".to_string(),

            // === SEED MESSAGES ===
            Message::TasksSeeded(count) => format!("Tarefas iniciais criadas com sucesso! ({})", count),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("✓ Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseVersion(version) => format!("Current database version: {}", version),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database schema needs to be updated".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::MigrationHistoryEntry(version, name, applied_at) => format!("  v{}: {} ({})", version, name, applied_at),
        };

        write!(f, "{}", text)
    }
}
