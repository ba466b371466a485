use crate::{
    db::{
        db::Db,
        migrations::{get_db_version, needs_migration, MigrationManager},
    },
    libs::messages::Message,
    msg_info, msg_print,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct MigrationsArgs {
    #[command(subcommand)]
    command: Option<MigrationsCommand>,
}

#[derive(Debug, Subcommand)]
enum MigrationsCommand {
    #[command(about = "Show the schema version (default)")]
    Status,
    #[command(about = "List applied migrations")]
    History,
}

pub fn cmd(args: MigrationsArgs) -> Result<()> {
    let db = Db::new_without_migrations()?;

    match args.command.unwrap_or(MigrationsCommand::Status) {
        MigrationsCommand::Status => {
            msg_print!(Message::DatabaseVersion(get_db_version(&db.conn)?));
            if needs_migration(&db.conn)? {
                msg_info!(Message::DatabaseNeedsUpdate);
            } else {
                msg_info!(Message::DatabaseUpToDate);
            }
        }
        MigrationsCommand::History => {
            let history = MigrationManager::new().get_migration_history(&db.conn)?;

            msg_print!(Message::MigrationHistory, true);
            for (version, name, applied_at) in history {
                msg_print!(Message::MigrationHistoryEntry(version, name, applied_at));
            }
        }
    }

    Ok(())
}
