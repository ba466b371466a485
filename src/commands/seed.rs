use crate::db::db::Db;
use crate::libs::messages::Message;
use crate::libs::service::TaskService;
use crate::libs::task::NewTask;
use crate::msg_success;
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};

/// `(title, description, priority, completed, due date offset in days)`
const DEMO_TASKS: [(&str, &str, i32, bool, i64); 8] = [
    (
        "Configurar ambiente de desenvolvimento",
        "Instalar e configurar todas as ferramentas necessárias para o desenvolvimento",
        5,
        true,
        -2,
    ),
    (
        "Criar estrutura do banco de dados",
        "Desenvolver as migrations e seeders para o projeto",
        4,
        true,
        -1,
    ),
    (
        "Implementar autenticação de usuários",
        "Criar sistema de login e registro de usuários",
        3,
        false,
        3,
    ),
    (
        "Desenvolver testes unitários",
        "Criar testes para todos os handlers e serviços",
        4,
        false,
        5,
    ),
    (
        "Implementar validação de dados",
        "Adicionar validação robusta para todas as entradas da API",
        3,
        true,
        0,
    ),
    (
        "Configurar CORS adequadamente",
        "Implementar configuração segura de CORS para comunicação com frontend",
        2,
        false,
        1,
    ),
    (
        "Documentar API",
        "Criar documentação completa da API com exemplos de uso",
        2,
        false,
        7,
    ),
    (
        "Implementar logging e monitoramento",
        "Adicionar sistema de logs e monitoramento para produção",
        1,
        false,
        10,
    ),
];

pub fn demo_tasks(now: DateTime<Utc>) -> Vec<NewTask> {
    DEMO_TASKS
        .iter()
        .map(|&(title, description, priority, completed, days)| NewTask {
            title: title.to_string(),
            description: Some(description.to_string()),
            completed,
            priority,
            due_date: Some(now + Duration::days(days)),
        })
        .collect()
}

pub fn cmd() -> Result<()> {
    let db = Db::new()?;
    let service = TaskService::new(db.conn);
    let created = service.seed(&demo_tasks(Utc::now()))?;

    msg_success!(Message::TasksSeeded(created.len()));
    Ok(())
}
