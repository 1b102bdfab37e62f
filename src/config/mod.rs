use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::client::{ClientConfig, DEFAULT_BASE_URL};
use crate::api::reference::{ReferenceOptions, MAX_REFERENCE_PAGE_SIZE};
use crate::api::search::{SearchOptions, MAX_SEARCH_PAGE_SIZE};
use crate::error::{GleifError, Result};

const CONFIG_DIR_NAME: &str = ".gleif";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api: ApiSettings,
    pub search: SearchSettings,
    pub reference: ReferenceSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiSettings {
    /// GLEIF API base URL
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        let client = ClientConfig::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: client.timeout,
            user_agent: client.user_agent,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    pub page_size: u32,
    pub max_pages: Option<u32>,
    pub instrument_request_budget: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        let options = SearchOptions::default();
        Self {
            page_size: options.page_size,
            max_pages: options.max_pages,
            instrument_request_budget: options.instrument_request_budget,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReferenceSettings {
    pub page_size: u32,
    pub max_pages: Option<u32>,
}

impl Default for ReferenceSettings {
    fn default() -> Self {
        let options = ReferenceOptions::default();
        Self {
            page_size: options.page_size,
            max_pages: options.max_pages,
        }
    }
}

impl Config {
    /// Get the configuration directory path
    pub fn config_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| GleifError::Config("Could not determine home directory".to_string()))?;

        Ok(home_dir.join(CONFIG_DIR_NAME))
    }

    /// Get the configuration file full path
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_path()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default file is read when
    /// present and built-in defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let default_path = match Self::config_file_path() {
                    Ok(path) => path,
                    Err(e) => {
                        debug!("{}; using built-in defaults", e);
                        return Ok(Self::default());
                    }
                };
                if default_path.exists() {
                    Self::load_from(&default_path)
                } else {
                    debug!(
                        "No configuration file at {}; using built-in defaults",
                        default_path.display()
                    );
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            GleifError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Self = if contents.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&contents).map_err(|e| {
                GleifError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
            })?
        };

        debug!("Loaded configuration from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line and environment overrides
    pub fn with_overrides(mut self, base_url: Option<&str>, timeout_secs: Option<u64>) -> Result<Self> {
        if let Some(base_url) = base_url {
            self.api.base_url = base_url.to_string();
        }
        if let Some(timeout) = timeout_secs {
            self.api.timeout_secs = timeout;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(GleifError::Config("api.base_url cannot be empty".to_string()));
        }
        if self.api.timeout_secs == 0 {
            return Err(GleifError::Config(
                "api.timeout_secs must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_SEARCH_PAGE_SIZE).contains(&self.search.page_size) {
            return Err(GleifError::Config(format!(
                "search.page_size must be between 1 and {}",
                MAX_SEARCH_PAGE_SIZE
            )));
        }
        if !(1..=MAX_REFERENCE_PAGE_SIZE).contains(&self.reference.page_size) {
            return Err(GleifError::Config(format!(
                "reference.page_size must be between 1 and {}",
                MAX_REFERENCE_PAGE_SIZE
            )));
        }
        if self.search.max_pages == Some(0) || self.reference.max_pages == Some(0) {
            return Err(GleifError::Config(
                "max_pages must be at least 1 (omit it for no ceiling)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api.base_url.trim_end_matches('/').to_string(),
            timeout: self.api.timeout_secs,
            user_agent: self.api.user_agent.clone(),
        }
    }

    pub fn search_options(&self, include_instruments: bool, budget: Option<u32>) -> SearchOptions {
        SearchOptions {
            page_size: self.search.page_size,
            max_pages: self.search.max_pages,
            include_instruments,
            instrument_request_budget: budget.unwrap_or(self.search.instrument_request_budget),
        }
    }

    pub fn reference_options(&self) -> ReferenceOptions {
        ReferenceOptions {
            page_size: self.reference.page_size,
            max_pages: self.reference.max_pages,
        }
    }
}
