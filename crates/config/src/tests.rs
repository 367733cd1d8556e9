use figment::Jail;

use crate::{AppConfig, StorageBackend};

#[test]
fn test_defaults_without_files() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        let config: AppConfig = AppConfig::figment("missing-dir").extract()?;
        assert_eq!(config.app_name, "tank-inventory");
        assert_eq!(config.storage.backend, StorageBackend::Json);
        assert_eq!(config.storage.data_dir.to_str(), Some("data"));
        assert!(config.audit.enabled);
        assert_eq!(config.projection.horizon_days, 30);
        Ok(())
    });
}

#[test]
fn test_file_then_env_override() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.create_dir("config")?;
        jail.create_file(
            "config/default.toml",
            r#"
                app_name = "cbo-tanks"
                app_env = "development"

                [storage]
                backend = "memory"
                data_dir = "/var/lib/tanks"

                [audit]
                enabled = false
            "#,
        )?;
        jail.set_env("TANKFARM_TELEMETRY__LOG_LEVEL", "debug");
        jail.set_env("TANKFARM_PROJECTION__HORIZON_DAYS", "14");

        let config: AppConfig = AppConfig::figment("config").extract()?;
        assert_eq!(config.app_name, "cbo-tanks");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(!config.audit.enabled);
        assert_eq!(config.telemetry.log_level, "debug");
        assert_eq!(config.projection.horizon_days, 14);
        assert!(!config.json_logs());
        Ok(())
    });
}

#[test]
fn test_environment_specific_file() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.create_dir("config")?;
        jail.create_file("config/default.toml", r#"app_env = "production""#)?;
        jail.create_file(
            "config/production.toml",
            r#"
                [telemetry]
                metrics_enabled = true
            "#,
        )?;
        jail.set_env("APP_ENV", "production");

        let config: AppConfig = AppConfig::figment("config").extract()?;
        assert!(config.is_production());
        assert!(config.telemetry.metrics_enabled);
        assert!(config.json_logs());
        Ok(())
    });
}
