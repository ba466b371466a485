use tarefas::commands::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tarefas=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    Cli::menu().await
}
