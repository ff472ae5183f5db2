//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::core::list_view::DEFAULT_CURRENCY;
use crate::core::Project;
use crate::yaml::DocumentSyntaxError;

/// Where records are kept
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// One YAML document per record under `.parts/<database>/<collection>/`
    #[default]
    Yaml,
    /// A single SQLite file `.parts/<database>.db`
    Sqlite,
    /// Nothing persisted; records vanish when the process exits
    Memory,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Yaml => write!(f, "yaml"),
            StoreBackend::Sqlite => write!(f, "sqlite"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" => Ok(StoreBackend::Yaml),
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!(
                "Invalid backend: {}. Use yaml, sqlite, or memory",
                s
            )),
        }
    }
}

/// Inventory configuration with layered hierarchy
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Storage backend
    pub backend: Option<StoreBackend>,

    /// Database name (directory or file stem under `.parts/`)
    pub database: Option<String>,

    /// Collection holding the spare part documents
    pub collection: Option<String>,

    /// Currency prefix shown in front of prices
    pub currency: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(project: Option<&Project>) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (accessors below)

        // 2. Global user config (~/.config/parts/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Project config (.parts/config.yaml)
        if let Some(project) = project {
            if let Some(local) = Self::read_file(&project.config_path()) {
                config.merge(local);
            }
        }

        // 4. Environment variables
        if let Ok(backend) = std::env::var("PARTS_BACKEND") {
            match backend.parse() {
                Ok(b) => config.backend = Some(b),
                Err(e) => tracing::warn!("ignoring PARTS_BACKEND: {}", e),
            }
        }
        if let Ok(database) = std::env::var("PARTS_DATABASE") {
            config.database = Some(database);
        }
        if let Ok(collection) = std::env::var("PARTS_COLLECTION") {
            config.collection = Some(collection);
        }
        if let Ok(currency) = std::env::var("PARTS_CURRENCY") {
            config.currency = Some(currency);
        }

        config
    }

    fn read_file(path: &std::path::Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match Self::parse(&contents, &path.display().to_string()) {
            Ok(config) => Some(config),
            Err(e) => {
                let help = miette::Diagnostic::help(&e)
                    .map(|h| h.to_string())
                    .unwrap_or_default();
                tracing::warn!(
                    path = %path.display(),
                    %help,
                    "ignoring unreadable config: {}",
                    e
                );
                None
            }
        }
    }

    /// Parse config text, pointing at the broken line on failure
    pub fn parse(contents: &str, filename: &str) -> Result<Config, DocumentSyntaxError> {
        serde_yml::from_str::<Option<Config>>(contents)
            // A file with only comments parses as null
            .map(Option::unwrap_or_default)
            .map_err(|e| DocumentSyntaxError::from_serde_error(&e, contents, filename))
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "parts")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.backend.is_some() {
            self.backend = other.backend;
        }
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.collection.is_some() {
            self.collection = other.collection;
        }
        if other.currency.is_some() {
            self.currency = other.currency;
        }
    }

    pub fn backend(&self) -> StoreBackend {
        self.backend.unwrap_or_default()
    }

    pub fn database(&self) -> String {
        self.database
            .clone()
            .unwrap_or_else(|| "car_database".to_string())
    }

    pub fn collection(&self) -> String {
        self.collection
            .clone()
            .unwrap_or_else(|| "spare_parts".to_string())
    }

    pub fn currency(&self) -> String {
        self.currency
            .clone()
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
    }

    /// The configuration with every default filled in
    pub fn effective(&self) -> Config {
        Config {
            backend: Some(self.backend()),
            database: Some(self.database()),
            collection: Some(self.collection()),
            currency: Some(self.currency()),
        }
    }
}
