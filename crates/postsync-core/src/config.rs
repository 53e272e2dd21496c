//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/postsync/config.toml)
//! 3. Environment variables (POSTSYNC_* prefix)
//!
//! Environment variables take precedence over config file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::DEFAULT_USER_ID;

/// Environment variable prefix
const ENV_PREFIX: &str = "POSTSYNC";

/// Remote collection used when none is configured
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Number of fetched posts kept in the store
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote posts collection endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// How many fetched posts are shown
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,

    /// User id attached to new posts
    #[serde(default = "default_user_id")]
    pub default_user_id: u64,

    /// TUI log file (defaults to the data directory)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            list_limit: DEFAULT_LIST_LIMIT,
            default_user_id: DEFAULT_USER_ID,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (POSTSYNC_API_URL, POSTSYNC_LIST_LIMIT, POSTSYNC_USER_ID)
    /// 2. Config file (~/.config/postsync/config.toml or POSTSYNC_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // POSTSYNC_API_URL
        if let Ok(val) = std::env::var(format!("{}_API_URL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.api_url = val;
            }
        }

        // POSTSYNC_LIST_LIMIT (ignored unless a valid number)
        if let Ok(val) = std::env::var(format!("{}_LIST_LIMIT", ENV_PREFIX)) {
            if let Ok(limit) = val.parse() {
                self.list_limit = limit;
            }
        }

        // POSTSYNC_USER_ID
        if let Ok(val) = std::env::var(format!("{}_USER_ID", ENV_PREFIX)) {
            if let Ok(user_id) = val.parse() {
                self.default_user_id = user_id;
            }
        }
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with POSTSYNC_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("postsync")
            .join("config.toml")
    }

    /// Get the path of the TUI log file
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| default_data_dir().join("debug.log"))
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_list_limit() -> usize {
    DEFAULT_LIST_LIMIT
}

fn default_user_id() -> u64 {
    DEFAULT_USER_ID
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("postsync")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "POSTSYNC_API_URL",
        "POSTSYNC_LIST_LIMIT",
        "POSTSYNC_USER_ID",
        "POSTSYNC_CONFIG",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_url, "https://jsonplaceholder.typicode.com/posts");
        assert_eq!(config.list_limit, 10);
        assert_eq!(config.default_user_id, 1);
        assert!(config.log_file.is_none());
        assert!(config.log_path().ends_with("debug.log"));
    }

    #[test]
    fn test_env_override_api_url() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("POSTSYNC_API_URL", "http://localhost:3000/posts");
        config.apply_env_overrides();
        assert_eq!(config.api_url, "http://localhost:3000/posts");

        // Empty string keeps the current value
        env::set_var("POSTSYNC_API_URL", "");
        config.apply_env_overrides();
        assert_eq!(config.api_url, "http://localhost:3000/posts");
    }

    #[test]
    fn test_env_override_numbers() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("POSTSYNC_LIST_LIMIT", "25");
        env::set_var("POSTSYNC_USER_ID", "7");
        config.apply_env_overrides();
        assert_eq!(config.list_limit, 25);
        assert_eq!(config.default_user_id, 7);

        env::set_var("POSTSYNC_LIST_LIMIT", "lots");
        config.apply_env_overrides();
        assert_eq!(config.list_limit, 25);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            api_url = "http://example.com/posts"
            list_limit = 5
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.api_url, "http://example.com/posts");
        assert_eq!(config.list_limit, 5);
        assert_eq!(config.default_user_id, 1);
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.list_limit, DEFAULT_LIST_LIMIT);
    }

    #[test]
    fn test_env_overrides_file() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "api_url = \"http://file/posts\"\n").unwrap();

        env::set_var("POSTSYNC_API_URL", "http://env/posts");
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.api_url, "http://env/posts");
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            api_url: "http://example.com/posts".to_string(),
            list_limit: 3,
            default_user_id: 2,
            log_file: Some(PathBuf::from("/tmp/postsync.log")),
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.api_url, config.api_url);
        assert_eq!(loaded.list_limit, 3);
        assert_eq!(loaded.default_user_id, 2);
        assert_eq!(loaded.log_path(), PathBuf::from("/tmp/postsync.log"));
    }

    #[test]
    fn test_config_file_path_override() {
        let _guard = EnvGuard::new(ENV_VARS);

        env::set_var("POSTSYNC_CONFIG", "/custom/postsync.toml");
        assert_eq!(
            Config::config_file_path(),
            PathBuf::from("/custom/postsync.toml")
        );
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let _guard = EnvGuard::new(ENV_VARS);
        assert!(Config::load_from_str("list_limit = \"ten\"").is_err());
    }
}
