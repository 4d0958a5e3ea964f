use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use hooks_domain::{InventoryConfig, StoreConfig};

use crate::config::validation::{validate_http_url, validate_identifier};

pub const CONFIG_PATH_ENV: &str = "DEVICE_HOOKS_CONFIG";
const ENV_PREFIX: &str = "DEVICE_HOOKS_";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub jamf_url: String,
    pub jamf_username: Option<String>,
    pub jamf_password: Option<String>,
    pub request_timeout_seconds: u64,
    pub clickhouse_url: String,
    pub clickhouse_database: String,
    pub clickhouse_user: Option<String>,
    pub clickhouse_password: Option<String>,
    pub ensure_schema: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            jamf_url: String::new(),
            jamf_username: None,
            jamf_password: None,
            request_timeout_seconds: 15,
            clickhouse_url: "http://127.0.0.1:8123".to_string(),
            clickhouse_database: "protect".to_string(),
            clickhouse_user: None,
            clickhouse_password: None,
            ensure_schema: true,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            Self::from_toml(&content)?
        } else {
            warn!(path = %path, "config file not found, using defaults");
            AppConfig::default()
        };
        config.apply_overrides(|key| env::var(key).ok());
        config.normalize();
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| anyhow!("invalid config file: {}", err))
    }

    pub fn normalize(&mut self) {
        self.jamf_url = self.jamf_url.trim().trim_end_matches('/').to_string();
        self.clickhouse_url = self.clickhouse_url.trim().to_string();
        self.clickhouse_database = self.clickhouse_database.trim().to_string();
        blank_to_none(&mut self.jamf_username);
        blank_to_none(&mut self.jamf_password);
        blank_to_none(&mut self.clickhouse_user);
        blank_to_none(&mut self.clickhouse_password);
    }

    pub fn validate_inventory(&self) -> Result<()> {
        validate_http_url("jamf_url", &self.jamf_url)?;
        if self.jamf_username.is_none() {
            return Err(anyhow!("jamf_username must be set"));
        }
        if self.jamf_password.is_none() {
            return Err(anyhow!("jamf_password must be set"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    pub fn validate_store(&self) -> Result<()> {
        validate_http_url("clickhouse_url", &self.clickhouse_url)?;
        validate_identifier("clickhouse_database", &self.clickhouse_database)?;
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_inventory_config(&self) -> Result<InventoryConfig> {
        self.validate_inventory()?;
        Ok(InventoryConfig {
            base_url: self.jamf_url.clone(),
            username: self.jamf_username.clone().unwrap_or_default(),
            password: self.jamf_password.clone().unwrap_or_default(),
            request_timeout_seconds: self.request_timeout_seconds,
        })
    }

    pub fn to_store_config(&self) -> Result<StoreConfig> {
        self.validate_store()?;
        Ok(StoreConfig {
            clickhouse_url: self.clickhouse_url.clone(),
            clickhouse_database: self.clickhouse_database.clone(),
            clickhouse_user: self.clickhouse_user.clone(),
            clickhouse_password: self.clickhouse_password.clone(),
            ensure_schema: self.ensure_schema,
            request_timeout_seconds: self.request_timeout_seconds,
        })
    }

    /// Applies `DEVICE_HOOKS_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(value) = var("JAMF_URL") {
            self.jamf_url = value;
        }
        if let Some(value) = var("JAMF_USERNAME") {
            self.jamf_username = Some(value);
        }
        if let Some(value) = var("JAMF_PASSWORD") {
            self.jamf_password = Some(value);
        }
        if let Some(value) = var("REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Some(value) = var("CLICKHOUSE_URL") {
            self.clickhouse_url = value;
        }
        if let Some(value) = var("CLICKHOUSE_DATABASE") {
            self.clickhouse_database = value;
        }
        if let Some(value) = var("CLICKHOUSE_USER") {
            self.clickhouse_user = Some(value);
        }
        if let Some(value) = var("CLICKHOUSE_PASSWORD") {
            self.clickhouse_password = Some(value);
        }
        if let Some(value) = var("ENSURE_SCHEMA") {
            self.ensure_schema = value.parse().unwrap_or(self.ensure_schema);
        }
    }
}

fn blank_to_none(value: &mut Option<String>) {
    if value.as_deref().map(str::trim).is_some_and(str::is_empty) {
        *value = None;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_target_protect_database() {
        let config = AppConfig::default();
        assert_eq!(config.clickhouse_database, "protect");
        assert_eq!(config.request_timeout_seconds, 15);
        assert!(config.ensure_schema);
        assert!(config.validate_store().is_ok());
        assert!(config.validate_inventory().is_err());
    }

    #[test]
    fn toml_file_is_partial() {
        let config = AppConfig::from_toml(
            r#"
jamf_url = "https://school.jamfcloud.com/"
jamf_username = "api-renamer"
jamf_password = "hunter2"
"#,
        )
        .expect("parse");
        assert_eq!(config.clickhouse_url, "http://127.0.0.1:8123");
        assert_eq!(config.jamf_username.as_deref(), Some("api-renamer"));
    }

    #[test]
    fn normalize_strips_trailing_slash_and_blanks() {
        let mut config = AppConfig {
            jamf_url: " https://school.jamfcloud.com/ ".to_string(),
            jamf_username: Some("  ".to_string()),
            clickhouse_password: Some(String::new()),
            ..AppConfig::default()
        };
        config.normalize();
        assert_eq!(config.jamf_url, "https://school.jamfcloud.com");
        assert!(config.jamf_username.is_none());
        assert!(config.clickhouse_password.is_none());
    }

    #[test]
    fn env_overrides_win_over_file_values() {
        let mut config = AppConfig::from_toml(r#"jamf_url = "https://file.example""#).unwrap();
        config.apply_overrides(lookup(&[
            ("DEVICE_HOOKS_JAMF_URL", "https://env.example"),
            ("DEVICE_HOOKS_JAMF_USERNAME", "svc"),
            ("DEVICE_HOOKS_JAMF_PASSWORD", "pw"),
            ("DEVICE_HOOKS_REQUEST_TIMEOUT_SECONDS", "7"),
            ("DEVICE_HOOKS_ENSURE_SCHEMA", "false"),
            ("DEVICE_HOOKS_CLICKHOUSE_DATABASE", "audit"),
        ]));
        config.normalize();

        let inventory = config.to_inventory_config().expect("inventory config");
        assert_eq!(inventory.base_url, "https://env.example");
        assert_eq!(inventory.username, "svc");
        assert_eq!(inventory.request_timeout_seconds, 7);

        let store = config.to_store_config().expect("store config");
        assert_eq!(store.clickhouse_database, "audit");
        assert!(!store.ensure_schema);
    }

    #[test]
    fn unparseable_numeric_override_keeps_previous_value() {
        let mut config = AppConfig::default();
        config.apply_overrides(lookup(&[("DEVICE_HOOKS_REQUEST_TIMEOUT_SECONDS", "soon")]));
        assert_eq!(config.request_timeout_seconds, 15);
    }

    #[test]
    fn inventory_requires_credentials() {
        let mut config = AppConfig {
            jamf_url: "https://school.jamfcloud.com".to_string(),
            jamf_username: Some("svc".to_string()),
            ..AppConfig::default()
        };
        let err = config.validate_inventory().expect_err("missing password");
        assert!(err.to_string().contains("jamf_password"));

        config.jamf_password = Some("pw".to_string());
        config.request_timeout_seconds = 0;
        assert!(config.validate_inventory().is_err());
    }

    #[test]
    fn store_rejects_unsafe_database_name() {
        let config = AppConfig {
            clickhouse_database: "protect; DROP TABLE x".to_string(),
            ..AppConfig::default()
        };
        assert!(config.to_store_config().is_err());
    }
}
