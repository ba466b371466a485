#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use tarefas::libs::config::{ClientConfig, Config, ServerConfig};
    use parking_lot::{const_mutex, Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Serializes the tests that mutate process environment variables.
    static ENV_LOCK: Mutex<()> = const_mutex(());

    /// Points the data directory at a fresh temporary directory.
    struct ConfigTestContext {
        _temp_dir: TempDir,
        _env: MutexGuard<'static, ()>,
        host: String,
        port: u16,
        api_url: String,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let env = ENV_LOCK.lock();
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            std::env::set_var("TAREFAS_DATA_DIR", temp_dir.path());
            ConfigTestContext {
                _temp_dir: temp_dir,
                _env: env,
                host: "0.0.0.0".to_string(),
                port: 9090,
                api_url: "http://tarefas.example.com".to_string(),
            }
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.server.is_none());
        assert!(config.client.is_none());
        assert_eq!(config.server(), ServerConfig::default());
        assert_eq!(config.client(), ClientConfig::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let config = Config {
            server: Some(ServerConfig {
                host: ctx.host.clone(),
                port: ctx.port,
                debug: true,
                allowed_origins: vec!["http://localhost:3000".to_string()],
                db_path: Some(PathBuf::from("/tmp/tarefas-test.db")),
            }),
            client: Some(ClientConfig {
                api_url: ctx.api_url.clone(),
            }),
        };
        config.save().unwrap();

        let read_config = Config::read().unwrap();
        assert_eq!(read_config, config);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_environment_overrides(_ctx: &mut ConfigTestContext) {
        std::env::set_var("TAREFAS_PORT", "9191");
        std::env::set_var("TAREFAS_ALLOWED_ORIGINS", "http://a.test, http://b.test");
        std::env::set_var("TAREFAS_API_URL", "http://api.test");

        let config = Config::load().unwrap();

        std::env::remove_var("TAREFAS_PORT");
        std::env::remove_var("TAREFAS_ALLOWED_ORIGINS");
        std::env::remove_var("TAREFAS_API_URL");

        let server = config.server();
        assert_eq!(server.port, 9191);
        assert_eq!(server.allowed_origins, vec!["http://a.test".to_string(), "http://b.test".to_string()]);
        assert_eq!(config.client().api_url, "http://api.test");
    }
}
