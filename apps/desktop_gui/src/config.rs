//! Desktop client settings, layered lowest to highest: built-in defaults,
//! `catalog.toml`, environment variables, then command-line flags (applied in
//! `main`).

use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_url: String,
    pub request_timeout_seconds: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            request_timeout_seconds: 30,
            log_filter: "info".into(),
        }
    }
}

/// Reads an explicitly named settings file (an error when missing), or
/// `catalog.toml` in the working directory (silently skipped when missing).
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let raw = match config_path {
        Some(path) => Some(fs::read_to_string(path).with_context(|| {
            format!("failed to read settings file '{}'", path.display())
        })?),
        None => fs::read_to_string("catalog.toml").ok(),
    };

    let mut settings = Settings::default();
    if let Some(raw) = raw {
        apply_file_settings(&mut settings, &raw);
    }
    apply_env_settings(&mut settings);
    Ok(settings)
}

fn apply_file_settings(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
        return;
    };
    if let Some(v) = file_cfg.get("server_url") {
        settings.server_url = v.clone();
    }
    if let Some(v) = file_cfg.get("request_timeout_seconds") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_seconds = parsed;
        }
    }
    if let Some(v) = file_cfg.get("log_filter") {
        settings.log_filter = v.clone();
    }
}

fn apply_env_settings(settings: &mut Settings) {
    if let Ok(v) = std::env::var("CATALOG_SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Ok(v) = std::env::var("APP__REQUEST_TIMEOUT_SECONDS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_seconds = parsed;
        }
    }
    if let Ok(v) = std::env::var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_backend() {
        let settings = Settings::default();
        assert_eq!(settings.server_url, "http://127.0.0.1:5000");
        assert_eq!(settings.request_timeout_seconds, 30);
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn file_values_override_defaults() {
        let mut settings = Settings::default();
        apply_file_settings(
            &mut settings,
            r#"
server_url = "http://catalog.internal:8080"
request_timeout_seconds = "10"
log_filter = "debug"
"#,
        );
        assert_eq!(settings.server_url, "http://catalog.internal:8080");
        assert_eq!(settings.request_timeout_seconds, 10);
        assert_eq!(settings.log_filter, "debug");
    }

    #[test]
    fn malformed_file_keeps_defaults() {
        let mut settings = Settings::default();
        apply_file_settings(&mut settings, "this is not toml [");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn non_numeric_timeout_is_ignored() {
        let mut settings = Settings::default();
        apply_file_settings(&mut settings, r#"request_timeout_seconds = "soon""#);
        assert_eq!(settings.request_timeout_seconds, 30);
    }

    #[test]
    fn explicit_missing_settings_file_is_an_error() {
        let err = load_settings(Some(Path::new("/definitely/not/here/catalog.toml")))
            .expect_err("missing explicit file should fail");
        assert!(err.to_string().contains("failed to read settings file"));
    }
}
