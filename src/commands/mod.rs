pub mod add;
pub mod delete;
pub mod init;
pub mod list;
pub mod migrations;
pub mod search;
pub mod seed;
pub mod serve;
pub mod stats;
pub mod toggle;

use crate::api::Gateway;
use crate::libs::cache::TaskCache;
use crate::libs::config::Config;
use crate::ui::App;
use crate::{msg_error_anyhow, msg_success};
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Run the HTTP API server")]
    Serve(serve::ServeArgs),
    #[command(about = "Configuration initialization")]
    Init,
    #[command(about = "Insert the demo tasks into the database")]
    Seed,
    #[command(about = "Show database schema version and migration history")]
    Migrations(migrations::MigrationsArgs),
    #[command(about = "List tasks")]
    List,
    #[command(about = "Create task")]
    Add(add::AddArgs),
    #[command(about = "Flip a task between pending and completed")]
    Toggle(toggle::ToggleArgs),
    #[command(about = "Delete task")]
    Delete(delete::DeleteArgs),
    #[command(about = "Show task statistics")]
    Stats,
    #[command(about = "Search tasks by title and description")]
    Search(search::SearchArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Serve(args) => serve::cmd(args).await,
            Commands::Init => init::cmd(),
            Commands::Seed => seed::cmd(),
            Commands::Migrations(args) => migrations::cmd(args),
            Commands::List => list::cmd().await,
            Commands::Add(args) => add::cmd(args).await,
            Commands::Toggle(args) => toggle::cmd(args).await,
            Commands::Delete(args) => delete::cmd(args).await,
            Commands::Stats => stats::cmd().await,
            Commands::Search(args) => search::cmd(args).await,
        }
    }
}

/// Gateway for the configured API base URL.
pub(crate) fn client_gateway() -> Result<Gateway> {
    Ok(Gateway::from_config(&Config::load()?.client()))
}

pub(crate) fn client_app() -> Result<App> {
    Ok(App::new(TaskCache::new(client_gateway()?)))
}

/// Prints the app's status message, turning a failed action into an error.
pub(crate) fn report_status(app: &mut App, succeeded: bool) -> Result<()> {
    let status = app.take_status().unwrap_or_default();
    if succeeded {
        msg_success!(status);
        Ok(())
    } else {
        Err(msg_error_anyhow!(status))
    }
}
