//! Configuration management for acctctl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Default account API host
pub const DEFAULT_API_HOST: &str = "https://api.example.com";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API host, without the `/api/v1` suffix
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// Bearer access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Session cookie (`name=value`) sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Whether API responses are cached locally
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
}

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

fn default_cache_enabled() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            cache_enabled: default_cache_enabled(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_host: default_api_host(),
            access_token: None,
            session_cookie: None,
            preferences: Preferences::default(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".acctctl").join("config.yaml"))
    }

    /// Resolve an optional override to a concrete config path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the resolved path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(&path, contents)?;

        // Tokens and cookies live here, keep it private
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Apply command-line and environment overrides
    pub fn with_overrides(mut self, api_host: Option<&str>, token: Option<&str>) -> Self {
        if let Some(host) = api_host {
            self.api_host = host.to_string();
        }
        if let Some(token) = token {
            self.access_token = Some(token.to_string());
        }
        self
    }

    /// Base URL for versioned API calls
    pub fn api_base_url(&self) -> String {
        format!("{}/api/v1", self.api_host.trim_end_matches('/'))
    }

    /// Response cache scope for the session these settings sign in as
    pub fn cache_scope(&self) -> String {
        crate::cache::session_scope(
            &self.api_host,
            self.access_token.as_deref(),
            self.session_cookie.as_deref(),
        )
    }

    /// Check host scheme and cookie shape
    pub fn validate(&self) -> Result<()> {
        if !(self.api_host.starts_with("http://") || self.api_host.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api_host must start with http:// or https://, got {}",
                self.api_host
            ))
            .into());
        }
        if let Some(ref cookie) = self.session_cookie
            && !cookie.contains('=')
        {
            return Err(
                ConfigError::Invalid("session_cookie must look like name=value".to_string())
                    .into(),
            );
        }
        Ok(())
    }
}
