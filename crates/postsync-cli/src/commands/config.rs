//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use postsync_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "api_url": config.api_url,
                    "list_limit": config.list_limit,
                    "default_user_id": config.default_user_id,
                    "log_file": config.log_path()
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.api_url);
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  api_url:         {}", config.api_url);
            println!("  list_limit:      {}", config.list_limit);
            println!("  default_user_id: {}", config.default_user_id);
            println!("  log_file:        {}", config.log_path().display());
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

/// Apply a single key/value pair to a configuration
fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "api_url" => {
            if value.is_empty() {
                bail!("api_url cannot be empty");
            }
            config.api_url = value.to_string();
        }
        "list_limit" => {
            config.list_limit = value
                .parse()
                .context("Invalid value for list_limit. Use a whole number.")?;
        }
        "default_user_id" => {
            config.default_user_id = value
                .parse()
                .context("Invalid value for default_user_id. Use a whole number.")?;
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: api_url, list_limit, default_user_id, log_file",
                key
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();

        apply(&mut config, "api_url", "http://localhost/posts").unwrap();
        apply(&mut config, "list_limit", "20").unwrap();
        apply(&mut config, "default_user_id", "3").unwrap();
        apply(&mut config, "log_file", "/tmp/p.log").unwrap();

        assert_eq!(config.api_url, "http://localhost/posts");
        assert_eq!(config.list_limit, 20);
        assert_eq!(config.default_user_id, 3);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/p.log")));

        apply(&mut config, "log_file", "none").unwrap();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut config = Config::default();
        assert!(apply(&mut config, "list_limit", "many").is_err());
        assert!(apply(&mut config, "api_url", "").is_err());
        assert!(apply(&mut config, "colour", "blue").is_err());
        assert_eq!(config.list_limit, 10);
    }

    #[test]
    fn test_set_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let output = Output::new(OutputFormat::Quiet);

        set("list_limit".to_string(), "4".to_string(), Some(&path), &output).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("list_limit = 4"));
    }
}
