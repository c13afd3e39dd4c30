//! Runtime settings.
//!
//! Settings come from a TOML file when one is given (or named by
//! `SERVICECART_CONFIG`), otherwise from defaults. `SERVICECART_CATALOG`
//! overrides the catalog path either way.

use crate::analytics::DisplayStats;
use crate::catalog::CatalogIndex;
use crate::selection::RemovalPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "SERVICECART_CONFIG";
pub const CATALOG_ENV: &str = "SERVICECART_CATALOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Catalog file to load instead of the compiled-in catalog.
    pub catalog_path: Option<PathBuf>,
    pub removal_policy: RemovalPolicy,
    /// Directory holding the site's static assets.
    pub public_root: PathBuf,
    pub stats: DisplayStats,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    pub verbose: bool,
    pub json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_path: None,
            removal_policy: RemovalPolicy::default(),
            public_root: PathBuf::from("public"),
            stats: DisplayStats::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Settings {
    /// Resolve settings from `path`, then `SERVICECART_CONFIG`, then defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let from_env = env::var_os(CONFIG_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let mut settings = match path.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        if let Some(catalog) = env::var_os(CATALOG_ENV).filter(|value| !value.is_empty()) {
            settings.catalog_path = Some(PathBuf::from(catalog));
        }
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&data).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_toml(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }

    /// The configured catalog, or the compiled-in one.
    pub fn open_catalog(&self) -> Result<CatalogIndex> {
        match &self.catalog_path {
            Some(path) => CatalogIndex::load(path),
            None => CatalogIndex::builtin(),
        }
    }
}
