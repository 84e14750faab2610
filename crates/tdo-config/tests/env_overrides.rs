use figment::Jail;
use pretty_assertions::assert_eq;
use tdo_config::{ConfigError, DEFAULT_REST_BASE_URL, TdoConfig};

#[test]
fn token_variable_fills_api_token() {
    Jail::expect_with(|jail| {
        jail.set_env("TODOIST_API_TOKEN", "tok_from_env");

        let config = TdoConfig::load().expect("config loads");
        assert_eq!(config.api.token, "tok_from_env");
        assert_eq!(config.api.rest_base_url, DEFAULT_REST_BASE_URL);
        Ok(())
    });
}

#[test]
fn token_variable_beats_prefixed_variable() {
    Jail::expect_with(|jail| {
        jail.set_env("TDO_API__TOKEN", "tok_prefixed");
        jail.set_env("TODOIST_API_TOKEN", "tok_conventional");

        let config = TdoConfig::load().expect("config loads");
        assert_eq!(config.api.token, "tok_conventional");
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tdo")?;
        jail.create_file(
            ".tdo/config.toml",
            r#"
            [api]
            token = "tok_from_file"
            timeout_secs = 5

            [general]
            default_format = "json"
            "#,
        )?;
        jail.set_env("TDO_API__TIMEOUT_SECS", "12");

        let config = TdoConfig::load().expect("config loads");
        assert_eq!(config.api.token, "tok_from_file");
        assert_eq!(config.api.timeout_secs, 12);
        assert_eq!(config.general.default_format, "json");
        Ok(())
    });
}

#[test]
fn missing_token_is_a_precondition_failure() {
    Jail::expect_with(|jail| {
        jail.set_env("TODOIST_API_TOKEN", "");

        let config = TdoConfig::load().expect("config loads");
        assert!(matches!(
            config.settings(),
            Err(ConfigError::MissingCredential)
        ));
        Ok(())
    });
}

#[test]
fn malformed_project_file_is_reported() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tdo")?;
        jail.create_file(".tdo/config.toml", "[api]\ntimeout_secs = \"soon\"\n")?;

        let err = TdoConfig::load().expect_err("should fail");
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
