use tdo_config::{TOKEN_ENV_VAR, TdoConfig};

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &TdoConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &TdoConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.api.is_configured() {
        let near_misses: Vec<&str> = env_keys
            .iter()
            .map(String::as_str)
            .filter(|key| {
                (key.starts_with("TDO_API_") && !key.starts_with("TDO_API__"))
                    || (key.starts_with("TODOIST_") && key.ends_with("TOKEN") && *key != TOKEN_ENV_VAR)
            })
            .collect();
        if !near_misses.is_empty() {
            warnings.push(format!(
                "API token is not configured while {} is set. Use {TOKEN_ENV_VAR} or double underscores (example: TDO_API__TOKEN).",
                near_misses.join(", ")
            ));
        }
    }

    if has_single_underscore(&env_keys, "TDO_GENERAL") {
        warnings.push(
            "TDO_GENERAL_* env vars are ignored. Use double underscores (example: TDO_GENERAL__DEFAULT_LIMIT)."
                .to_string(),
        );
    }

    warnings
}

fn has_single_underscore(keys: &[String], prefix: &str) -> bool {
    let nested = format!("{prefix}__");
    keys.iter()
        .any(|key| key.starts_with(prefix) && !key.starts_with(&nested))
}
