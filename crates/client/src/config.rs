//! Portal configuration.
//!
//! Supports loading configuration from:
//! 1. Config file (TOML, JSON, or YAML)
//! 2. Environment variables
//!
//! Environment variables take precedence over config file values.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main portal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Accounts service configuration
    pub accounts: AccountsConfig,
    /// Content gate configuration
    pub gate: GateConfig,
}

/// Accounts service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountsConfig {
    /// Accounts service base URL (default: "http://localhost:8080")
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

/// Content gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Path members without an entitlement are sent to (default: "/upgrade")
    pub upsell_path: String,
    /// Path unauthenticated visitors are sent to (default: "/login")
    pub login_path: String,
}

// Default implementations

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            accounts: AccountsConfig::default(),
            gate: GateConfig::default(),
        }
    }
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            upsell_path: "/upgrade".to_string(),
            login_path: "/login".to_string(),
        }
    }
}

impl PortalConfig {
    /// Load configuration from file and environment variables.
    /// Environment variables override file values.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(config_path) = std::env::var("GUILDHALL_CONFIG") {
            config = Self::from_file(&config_path)?;
            tracing::info!("Loaded configuration from: {}", config_path);
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load configuration from a file (supports TOML, JSON, YAML)
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let config: PortalConfig = match extension {
            "toml" => toml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            _ => {
                // Try to detect format
                if content.trim().starts_with('{') {
                    serde_json::from_str(&content)?
                } else if content.contains("---") || content.contains(": ") {
                    serde_yaml::from_str(&content)?
                } else {
                    toml::from_str(&content)?
                }
            }
        };

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ACCOUNTS_BASE_URL") {
            self.accounts.base_url = val;
        }
        if let Ok(val) = std::env::var("ACCOUNTS_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.accounts.timeout_secs = secs;
            }
        }
        if let Ok(val) = std::env::var("GATE_UPSELL_PATH") {
            self.gate.upsell_path = val;
        }
        if let Ok(val) = std::env::var("GATE_LOGIN_PATH") {
            self.gate.login_path = val;
        }
    }
}
