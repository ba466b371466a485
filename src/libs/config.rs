//! Application configuration.
//!
//! Settings live in `config.json` inside the data directory (see
//! [`DataStorage`]). On top of the file, [`Config::load`] reads a `.env` file
//! and applies `TAREFAS_*` environment overrides, so the server can be
//! configured without running the wizard.
//!
//! | Variable | Setting | Default |
//! |---|---|---|
//! | `TAREFAS_HOST` | `server.host` | `127.0.0.1` |
//! | `TAREFAS_PORT` | `server.port` | `8001` |
//! | `TAREFAS_DEBUG` | `server.debug` | `false` |
//! | `TAREFAS_ALLOWED_ORIGINS` | `server.allowed_origins` (comma separated) | `http://localhost:4200` |
//! | `TAREFAS_DB_PATH` | `server.db_path` | `tarefas.db` in the data directory |
//! | `TAREFAS_API_URL` | `client.api_url` | `http://localhost:8001` |
//!
//! ```rust,no_run
//! use tarefas::libs::config::Config;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! println!("listening on {}:{}", config.server().host, config.server().port);
//! # Ok(())
//! # }
//! ```

use super::data_storage::DataStorage;
use super::validation::is_truthy;
use crate::libs::messages::Message;
use crate::{msg_print, msg_warning};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8001;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:4200";
pub const DEFAULT_API_URL: &str = "http://localhost:8001";

/// A section offered by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Adds the underlying error text to 500 responses.
    #[serde(default)]
    pub debug: bool,
    pub allowed_origins: Vec<String>,
    /// `None` selects `tarefas.db` in the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            debug: false,
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
            db_path: None,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "server".to_string(),
            name: Message::ConfigModuleServer.to_string(),
        }
    }

    pub fn init(current: &Option<ServerConfig>) -> Result<ServerConfig> {
        let default = current.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleServer);

        let host: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptServerHost.to_string())
            .default(default.host)
            .interact_text()?;
        let port: u16 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptServerPort.to_string())
            .default(default.port)
            .interact_text()?;
        let debug = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptServerDebug.to_string())
            .default(default.debug)
            .interact()?;
        let origins: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptAllowedOrigins.to_string())
            .default(default.allowed_origins.join(","))
            .interact_text()?;
        let db_path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDatabasePath.to_string())
            .default(default.db_path.map(|p| p.display().to_string()).unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;

        Ok(ServerConfig {
            host,
            port,
            debug,
            allowed_origins: split_origins(&origins),
            db_path: Some(db_path.trim()).filter(|p| !p.is_empty()).map(PathBuf::from),
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Base URL prefixed to relative request paths.
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "client".to_string(),
            name: Message::ConfigModuleClient.to_string(),
        }
    }

    pub fn init(current: &Option<ClientConfig>) -> Result<ClientConfig> {
        let default = current.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleClient);

        Ok(ClientConfig {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptApiUrl.to_string())
                .default(default.api_url)
                .interact_text()?,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientConfig>,
}

impl Config {
    /// Reads `config.json`, or the defaults when the file does not exist.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// The file configuration with `.env` and `TAREFAS_*` overrides applied.
    pub fn load() -> Result<Config> {
        dotenv::dotenv().ok();
        let mut config = Self::read()?;
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        let server = self.server.get_or_insert_with(ServerConfig::default);

        if let Ok(host) = env::var("TAREFAS_HOST") {
            server.host = host;
        }
        if let Ok(port) = env::var("TAREFAS_PORT") {
            match port.trim().parse() {
                Ok(port) => server.port = port,
                Err(_) => msg_warning!(Message::InvalidEnvValue("TAREFAS_PORT".to_string(), port)),
            }
        }
        if let Ok(debug) = env::var("TAREFAS_DEBUG") {
            server.debug = is_truthy(&debug);
        }
        if let Ok(origins) = env::var("TAREFAS_ALLOWED_ORIGINS") {
            server.allowed_origins = split_origins(&origins);
        }
        if let Ok(path) = env::var("TAREFAS_DB_PATH") {
            if !path.trim().is_empty() {
                server.db_path = Some(PathBuf::from(path));
            }
        }

        if let Ok(api_url) = env::var("TAREFAS_API_URL") {
            self.client.get_or_insert_with(ClientConfig::default).api_url = api_url;
        }
    }

    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    pub fn client(&self) -> ClientConfig {
        self.client.clone().unwrap_or_default()
    }

    /// Interactive wizard over the sections the user selects.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = [ServerConfig::module(), ClientConfig::module()];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "server" => config.server = Some(ServerConfig::init(&config.server)?),
                "client" => config.client = Some(ClientConfig::init(&config.client)?),
                _ => {}
            }
        }

        Ok(config)
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|origin| !origin.is_empty()).map(String::from).collect()
}
