//! Runtime configuration for the CLI and the server.
//!
//! Precedence, lowest first: built-in defaults, the YAML config file,
//! `FCS_*` environment variables, command-line flags.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fcs_schema::{CalculationDefaults, SizingInputs, validate_inputs};
use fcs_store::{FileStore, MemoryStore, Storage};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const ENV_BIND: &str = "FCS_BIND";
pub const ENV_DATA_DIR: &str = "FCS_DATA_DIR";

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    #[default]
    Memory,
    File {
        data_dir: PathBuf,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub bind: String,
    pub storage: StorageConfig,
    /// Insert the built-in catalog when the store has no fuel cells.
    pub seed_catalog: bool,
    pub defaults: CalculationDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            storage: StorageConfig::default(),
            seed_catalog: true,
            defaults: CalculationDefaults::default(),
        }
    }
}

impl AppConfig {
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        let config: AppConfig =
            serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load `path` when given, otherwise start from defaults.
    pub fn load_or_default(path: Option<&Path>) -> AppResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(ENV_BIND).filter(|v| !v.trim().is_empty()) {
            self.bind = bind;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            self.storage = StorageConfig::File {
                data_dir: PathBuf::from(dir),
            };
        }
    }

    pub fn apply_process_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    pub fn validate(&self) -> AppResult<()> {
        self.bind_addr()?;
        let probe = SizingInputs::with_defaults(0.0, 0.0, &self.defaults);
        validate_inputs(&probe).map_err(|e| AppError::Config(format!("defaults: {e}")))?;
        Ok(())
    }

    pub fn bind_addr(&self) -> AppResult<SocketAddr> {
        self.bind
            .parse()
            .map_err(|_| AppError::Config(format!("bind address '{}' is not host:port", self.bind)))
    }

    pub fn open_store(&self) -> AppResult<Arc<dyn Storage>> {
        let store: Arc<dyn Storage> = match &self.storage {
            StorageConfig::Memory => Arc::new(MemoryStore::new()),
            StorageConfig::File { data_dir } => Arc::new(FileStore::new(data_dir.clone())?),
        };
        Ok(store)
    }
}
