//! Settings loading for casegen.
//!
//! Precedence, lowest to highest: built-in defaults, `config.toml` under
//! the platform config directory, environment variables, CLI flags.
//! A missing config file is not an error.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use casegen_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "casegen";

pub const ENV_API_BASE: &str = "CASEGEN_API_BASE";
pub const ENV_GOOGLE_CLIENT_ID: &str = "CASEGEN_GOOGLE_CLIENT_ID";

const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the generation backend.
    pub api_base: String,
    /// Google OAuth client id. Empty means the sign-in provider is not
    /// configured and the app renders the Unconfigured notice only.
    pub google_client_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            google_client_id: String::new(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File format
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    api: ApiSection,
    #[serde(default)]
    google: GoogleSection,
}

#[derive(Debug, Default, Deserialize)]
struct ApiSection {
    base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GoogleSection {
    client_id: Option<String>,
}

/// Default config file path: `<config_dir>/casegen/config.toml`.
pub fn default_config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(APP_DIR).join(CONFIG_FILENAME)
}

/// Load settings with the documented precedence.
///
/// `cli_api_base` comes from the `--api-base` flag; `config_path`
/// overrides the default config file location.
pub fn load_settings(cli_api_base: Option<&str>, config_path: Option<&Path>) -> Settings {
    let mut settings = Settings::default();

    // Config file layer
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);
    match std::fs::read_to_string(&path) {
        Ok(raw) => match toml::from_str::<FileConfig>(&raw) {
            Ok(file) => {
                if let Some(base) = file.api.base_url {
                    settings.api_base = base;
                }
                if let Some(id) = file.google.client_id {
                    settings.google_client_id = id;
                }
            }
            Err(e) => {
                warn!("ignoring unparseable config at {}: {e}", path.display());
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("no config file at {}", path.display());
        }
        Err(e) => {
            warn!("unable to read config at {}: {e}", path.display());
        }
    }

    // Environment layer
    if let Ok(base) = std::env::var(ENV_API_BASE) {
        if !base.is_empty() {
            settings.api_base = base;
        }
    }
    if let Ok(id) = std::env::var(ENV_GOOGLE_CLIENT_ID) {
        if !id.is_empty() {
            settings.google_client_id = id;
        }
    }

    // CLI layer
    if let Some(base) = cli_api_base {
        settings.api_base = base.to_string();
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn clear_env() {
        std::env::remove_var(ENV_API_BASE);
        std::env::remove_var(ENV_GOOGLE_CLIENT_ID);
    }

    #[test]
    #[serial]
    fn test_defaults_when_nothing_configured() {
        clear_env();
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.toml");
        let settings = load_settings(None, Some(missing.as_path()));
        assert_eq!(settings.api_base, DEFAULT_API_BASE);
        assert!(settings.google_client_id.is_empty());
    }

    #[test]
    #[serial]
    fn test_config_file_layer() {
        clear_env();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://backend:9000\"\n[google]\nclient_id = \"abc.apps\"\n",
        )
        .unwrap();

        let settings = load_settings(None, Some(path.as_path()));
        assert_eq!(settings.api_base, "http://backend:9000");
        assert_eq!(settings.google_client_id, "abc.apps");
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"http://from-file\"\n").unwrap();

        std::env::set_var(ENV_API_BASE, "http://from-env");
        let settings = load_settings(None, Some(path.as_path()));
        clear_env();

        assert_eq!(settings.api_base, "http://from-env");
    }

    #[test]
    #[serial]
    fn test_cli_overrides_env() {
        clear_env();
        std::env::set_var(ENV_API_BASE, "http://from-env");
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.toml");
        let settings = load_settings(Some("http://from-cli"), Some(missing.as_path()));
        clear_env();

        assert_eq!(settings.api_base, "http://from-cli");
    }

    #[test]
    #[serial]
    fn test_unparseable_file_falls_back_to_defaults() {
        clear_env();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "this is { not toml").unwrap();

        let settings = load_settings(None, Some(path.as_path()));
        assert_eq!(settings.api_base, DEFAULT_API_BASE);
    }
}
