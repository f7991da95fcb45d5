//
//  atlassian-api
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Connection settings for the three products, stored as TOML. Each product
//! has its own optional section holding a [`HostConfig`].
//!
//! ## Configuration File Location
//!
//! The `ATLASSIAN_API_CONFIG` environment variable wins when set. Otherwise
//! the file lives in the platform configuration directory:
//!
//! - **Linux**: `~/.config/atlassian-api/config.toml`
//! - **macOS**: `~/Library/Application Support/atlassian-api/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\atlassian-api\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [jira]
//! url = "https://jira.company.com"
//! username = "your_username"
//! password = "your_password"
//!
//! [bitbucket]
//! url = "https://bitbucket.company.com"
//! token = "your_token"
//! timeout = 30
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use atlassian_api::api::bitbucket::Bitbucket;
//! use atlassian_api::config::Config;
//!
//! let config = Config::load()?;
//! if let Some(host) = &config.bitbucket {
//!     let bitbucket = Bitbucket::from_host_config(host)?;
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::auth::AuthCredential;

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV: &str = "ATLASSIAN_API_CONFIG";

/// Request timeout applied when none is configured, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for every product.
///
/// # Fields
///
/// * `jira` - Jira connection, if configured
/// * `bitbucket` - Bitbucket Server/Data Center connection, if configured
/// * `confluence` - Confluence connection, if configured
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Jira connection settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira: Option<HostConfig>,

    /// Bitbucket connection settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitbucket: Option<HostConfig>,

    /// Confluence connection settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confluence: Option<HostConfig>,
}

/// Connection settings for a single Atlassian instance.
///
/// # Credential Precedence
///
/// | username + password | token | Credential |
/// |---------------------|-------|------------|
/// | set | any | Basic |
/// | missing | set | Bearer |
/// | missing | missing | none |
///
/// # Examples
///
/// ```rust
/// use atlassian_api::auth::AuthCredential;
/// use atlassian_api::config::HostConfig;
///
/// let host = HostConfig {
///     token: Some("pat".to_string()),
///     ..HostConfig::new("https://bitbucket.example.com")
/// };
/// assert_eq!(host.credential(), Some(AuthCredential::bearer("pat")));
/// assert_eq!(host.timeout, 60);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostConfig {
    /// Base URL of the instance, e.g. `https://jira.company.com`.
    pub url: String,

    /// Username for Basic authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password for Basic authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Personal Access Token for Bearer authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl HostConfig {
    /// Creates settings for `url` with no credentials and the default timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
            token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Returns the credential these settings describe.
    ///
    /// Username and password take precedence over a token.
    pub fn credential(&self) -> Option<AuthCredential> {
        match (&self.username, &self.password, &self.token) {
            (Some(username), Some(password), _) if !username.is_empty() && !password.is_empty() => {
                Some(AuthCredential::basic(username, password))
            }
            (_, _, Some(token)) => Some(AuthCredential::bearer(token)),
            _ => None,
        }
    }
}

impl Config {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined,
    /// or the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads the configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Writes the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Returns the path of the configuration file.
    ///
    /// Honours [`CONFIG_ENV`] before falling back to the platform directory.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", "atlassian-api")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}
