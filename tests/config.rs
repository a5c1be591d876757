#[cfg(test)]
mod tests {
    use parking_lot::{Mutex, MutexGuard};
    use std::fs;
    use tabmon::libs::config::{Config, MonitorConfig, CONFIG_FILE_NAME, DEFAULT_IDLE_THRESHOLD};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Tests in this file share the process environment.
    static HOME_LOCK: Mutex<()> = Mutex::new(());

    /// Points the data directory at a fresh temporary home.
    struct ConfigTestContext {
        temp_dir: TempDir,
        _guard: MutexGuard<'static, ()>,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let guard = HOME_LOCK.lock();
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { temp_dir, _guard: guard }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_default_config(_ctx: &mut ConfigTestContext) {
        let config = Config::default();
        assert!(config.monitor.is_none());
        assert_eq!(MonitorConfig::default().idle_threshold, DEFAULT_IDLE_THRESHOLD);
        assert_eq!(DEFAULT_IDLE_THRESHOLD, 60);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();
        assert_eq!(config.monitor, None);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let config = Config {
            monitor: Some(MonitorConfig { idle_threshold: 90 }),
        };
        config.save().unwrap();

        let path = Config::path().unwrap();
        assert!(path.starts_with(ctx.temp_dir.path()));
        assert!(path.ends_with(CONFIG_FILE_NAME));

        let loaded = Config::read().unwrap();
        assert_eq!(loaded.monitor, Some(MonitorConfig { idle_threshold: 90 }));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_empty_monitor_section_is_omitted(_ctx: &mut ConfigTestContext) {
        Config::default().save().unwrap();
        let raw = fs::read_to_string(Config::path().unwrap()).unwrap();
        assert!(!raw.contains("monitor"));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_delete_config(_ctx: &mut ConfigTestContext) {
        assert!(!Config::delete().unwrap());

        Config::default().save().unwrap();
        assert!(Config::path().unwrap().exists());
        assert!(Config::delete().unwrap());
        assert!(!Config::path().unwrap().exists());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_zero_threshold_rejected(_ctx: &mut ConfigTestContext) {
        assert!(MonitorConfig { idle_threshold: 0 }.validate().is_err());
        assert!(MonitorConfig { idle_threshold: 1 }.validate().is_ok());

        fs::write(Config::path().unwrap(), r#"{"monitor":{"idle_threshold":0}}"#).unwrap();
        assert!(Config::read().is_err());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_config_is_an_error(_ctx: &mut ConfigTestContext) {
        fs::write(Config::path().unwrap(), "not json").unwrap();
        assert!(Config::read().is_err());
    }
}
