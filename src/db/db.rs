use crate::db::migrations::init_with_migrations;
use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub const DB_FILE_NAME: &str = "tarefas.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the configured database (or the default file in the data
    /// directory) and brings its schema up to date.
    pub fn new() -> Result<Db> {
        let path = Self::default_path()?;
        Self::open(path)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        let mut conn = Connection::open(path)?;
        init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }

    pub fn in_memory() -> Result<Db> {
        let mut conn = Connection::open_in_memory()?;
        init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }

    /// Opens the default database without touching the schema.
    pub fn new_without_migrations() -> Result<Db> {
        let conn = Connection::open(Self::default_path()?)?;
        Ok(Db { conn })
    }

    pub fn default_path() -> Result<PathBuf> {
        match Config::load()?.server().db_path {
            Some(path) => Ok(path),
            None => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }
}
