//! Deserializable representation of `catalog/services.json`.
//!
//! The types mirror the catalog schema so the index, selection rules and
//! analytics can reason about services without ad-hoc JSON handling. Use
//! `CatalogIndex` for validation and id lookup; use these structs directly only
//! when the raw file surface is required.

use crate::catalog::identity::{CatalogKey, ServiceCategory, ServiceId, SubCategory};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
/// Full service catalog as stored on disk.
pub struct ServiceCatalog {
    #[serde(rename = "schema_version")]
    pub key: CatalogKey,
    pub title: String,
    /// Retired ids mapped to the service that replaced them.
    #[serde(default)]
    pub aliases: BTreeMap<String, ServiceId>,
    pub services: Vec<ServiceDefinition>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// One purchasable offering.
pub struct ServiceDefinition {
    pub id: ServiceId,
    pub name: String,
    pub description: String,
    /// Whole euros.
    pub price: u32,
    pub category: ServiceCategory,
    pub sub_category: SubCategory,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default)]
    pub popular: bool,
    /// Base services of which at least one must be selected first. Empty for
    /// base services.
    #[serde(default)]
    pub dependencies: Vec<ServiceId>,
}

impl ServiceDefinition {
    pub fn is_base(&self) -> bool {
        self.category == ServiceCategory::Base
    }

    pub fn is_addon(&self) -> bool {
        self.category == ServiceCategory::Addon
    }

    pub fn depends_on(&self, id: &str) -> bool {
        self.dependencies.iter().any(|dep| dep.as_str() == id)
    }
}

/// Read and parse a service catalog from disk without additional validation.
pub fn load_catalog_from_path(path: &Path) -> Result<ServiceCatalog> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_catalog(&data).with_context(|| format!("parsing {}", path.display()))
}

/// Parse a service catalog from its JSON text without additional validation.
pub fn parse_catalog(data: &str) -> Result<ServiceCatalog> {
    let catalog: ServiceCatalog = serde_json::from_str(data)?;
    Ok(catalog)
}
