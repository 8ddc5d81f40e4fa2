//! Top-level Libris configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{defaults, PaginationConfig, SearchConfig, ServerConfig, StorageConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`LIBRIS_*`)
/// 3. Explicit `--config` file, or `libris.toml` in the working directory
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LibrisConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub search: SearchConfig,
    pub pagination: PaginationConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_addr: Option<String>,
    pub db_path: Option<String>,
}

impl LibrisConfig {
    /// Load configuration with layered resolution.
    ///
    /// An explicit `config_path` must exist. Without one, `libris.toml` in the
    /// current directory is used when present.
    pub fn load(
        config_path: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match config_path {
            Some(path) => Self::merge_toml_file(&mut config, path)?,
            None => {
                let local = PathBuf::from(defaults::DEFAULT_CONFIG_FILENAME);
                if local.exists() {
                    Self::merge_toml_file(&mut config, &local)?;
                }
            }
        }

        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `LIBRIS_*` variables through `lookup` (usually `std::env::var`).
    pub fn apply_env_overrides<F>(config: &mut LibrisConfig, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("LIBRIS_DB_PATH") {
            config.storage.db_path = Some(path);
        }
        if let Some(addr) = lookup("LIBRIS_BIND_ADDR") {
            config.server.bind_addr = Some(addr);
        }
        if let Some(ttl) = lookup("LIBRIS_SESSION_TTL_SECS") {
            let parsed = ttl.trim().parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                field: "LIBRIS_SESSION_TTL_SECS".to_string(),
                message: e.to_string(),
            })?;
            config.server.session_ttl_secs = Some(parsed);
        }
        Ok(())
    }

    /// Apply CLI flag overrides (highest priority).
    pub fn apply_cli_overrides(config: &mut LibrisConfig, cli: &CliOverrides) {
        if let Some(ref addr) = cli.bind_addr {
            config.server.bind_addr = Some(addr.clone());
        }
        if let Some(ref path) = cli.db_path {
            config.storage.db_path = Some(path.clone());
        }
    }

    /// Validate the configuration values.
    pub fn validate(config: &LibrisConfig) -> Result<(), ConfigError> {
        if let Some(cutoff) = config.search.cutoff {
            if !(0.0..=1.0).contains(&cutoff) {
                return Err(ConfigError::ValidationFailed {
                    field: "search.cutoff".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if config.search.candidate_limit == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "search.candidate_limit".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.search.max_suggestions == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "search.max_suggestions".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.pagination.books_per_page == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "pagination.books_per_page".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.pagination.reviews_per_page == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "pagination.reviews_per_page".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.server.session_ttl_secs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "server.session_ttl_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut LibrisConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: LibrisConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut LibrisConfig, other: &LibrisConfig) {
        // Server
        if other.server.bind_addr.is_some() {
            base.server.bind_addr = other.server.bind_addr.clone();
        }
        if other.server.session_ttl_secs.is_some() {
            base.server.session_ttl_secs = other.server.session_ttl_secs;
        }
        if other.server.secure_cookies.is_some() {
            base.server.secure_cookies = other.server.secure_cookies;
        }

        // Storage
        if other.storage.db_path.is_some() {
            base.storage.db_path = other.storage.db_path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }
        if other.storage.busy_timeout_ms.is_some() {
            base.storage.busy_timeout_ms = other.storage.busy_timeout_ms;
        }

        // Search
        if other.search.candidate_limit.is_some() {
            base.search.candidate_limit = other.search.candidate_limit;
        }
        if other.search.max_suggestions.is_some() {
            base.search.max_suggestions = other.search.max_suggestions;
        }
        if other.search.cutoff.is_some() {
            base.search.cutoff = other.search.cutoff;
        }

        // Pagination
        if other.pagination.books_per_page.is_some() {
            base.pagination.books_per_page = other.pagination.books_per_page;
        }
        if other.pagination.reviews_per_page.is_some() {
            base.pagination.reviews_per_page = other.pagination.reviews_per_page;
        }
    }
}
