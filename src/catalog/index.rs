//! Indexed view of a service catalog.
//!
//! The index validates a catalog against the schema and against the
//! dependency rules the selection engine relies on, then provides lookup by id
//! while preserving catalog order for every listing. Malformed data is rejected
//! here, at load time, so the selection and analytics code can treat the
//! catalog as well-formed.

use crate::catalog::builtin::{BUILTIN_CATALOG_JSON, builtin_schema};
use crate::catalog::filter::ServiceFilter;
use crate::catalog::identity::{CatalogKey, ServiceCategory, ServiceId, SubCategory};
use crate::catalog::model::{ServiceCatalog, ServiceDefinition};
use crate::schema_loader::{
    CompiledSchema, SchemaLoadOptions, is_valid_version_token, load_json_schema,
    validate_instance,
};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

#[derive(Debug)]
/// Service catalog plus a derived index keyed by service id.
pub struct CatalogIndex {
    catalog: ServiceCatalog,
    by_id: BTreeMap<ServiceId, usize>,
}

/// Outcome of an alias-aware lookup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolved<'a> {
    Canonical(&'a ServiceDefinition),
    /// `from` is a retired id; callers redirect to `to.id`.
    Alias {
        from: &'a str,
        to: &'a ServiceDefinition,
    },
}

impl<'a> Resolved<'a> {
    pub fn service(&self) -> &'a ServiceDefinition {
        match self {
            Resolved::Canonical(service) => service,
            Resolved::Alias { to, .. } => to,
        }
    }
}

impl CatalogIndex {
    /// The catalog compiled into the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CATALOG_JSON, "built-in catalog")
    }

    /// Load and validate a catalog file against the built-in schema.
    pub fn load(path: &Path) -> Result<Self> {
        let data =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_json_str(&data, &path.display().to_string())
    }

    /// Load a catalog file, validating it against an external schema file.
    ///
    /// The schema's `schema_version` const is aligned to the catalog's own
    /// version so older schema copies can still check structure.
    pub fn load_with_schema(path: &Path, schema_path: &Path) -> Result<Self> {
        let data =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let value: Value = serde_json::from_str(&data)
            .with_context(|| format!("parsing catalog {}", path.display()))?;
        let version = value
            .get("schema_version")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let schema = load_json_schema(
            schema_path,
            SchemaLoadOptions {
                expected_version: Some(&version),
                patch_schema_version_const: true,
                ..Default::default()
            },
        )
        .with_context(|| format!("loading catalog schema {}", schema_path.display()))?;
        Self::from_value(value, &schema, &path.display().to_string())
    }

    /// Parse, schema-check and index catalog JSON.
    pub fn from_json_str(data: &str, label: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(data).with_context(|| format!("parsing catalog {label}"))?;
        let schema = builtin_schema()?;
        Self::from_value(value, &schema, label)
    }

    fn from_value(value: Value, schema: &CompiledSchema, label: &str) -> Result<Self> {
        validate_instance(schema, &value, &format!("service catalog {label}"))?;
        let catalog: ServiceCatalog = serde_json::from_value(value)
            .with_context(|| format!("decoding catalog {label}"))?;
        let index = Self::from_catalog(catalog).with_context(|| format!("indexing {label}"))?;
        tracing::info!(
            catalog = %index.key().0,
            schema_version = %schema.schema_version,
            services = index.len(),
            source = label,
            "loaded service catalog"
        );
        Ok(index)
    }

    /// Index an already-decoded catalog, enforcing the dependency rules.
    pub fn from_catalog(catalog: ServiceCatalog) -> Result<Self> {
        validate_catalog_key(&catalog.key)?;
        if catalog.title.trim().is_empty() {
            bail!("catalog.title must not be empty");
        }
        let by_id = build_index(&catalog)?;
        validate_dependencies(&catalog, &by_id)?;
        validate_aliases(&catalog, &by_id)?;
        Ok(Self { catalog, by_id })
    }

    /// The catalog key declared in the loaded file.
    pub fn key(&self) -> &CatalogKey {
        &self.catalog.key
    }

    pub fn title(&self) -> &str {
        &self.catalog.title
    }

    /// All services in catalog order.
    pub fn services(&self) -> &[ServiceDefinition] {
        &self.catalog.services
    }

    pub fn len(&self) -> usize {
        self.catalog.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.services.is_empty()
    }

    /// Resolve a service by canonical id.
    ///
    /// Returns `None` instead of erroring; callers decide whether a miss is a
    /// not-found page or a skipped entry.
    pub fn find_by_id(&self, id: &str) -> Option<&ServiceDefinition> {
        self.by_id.get(id).map(|&pos| &self.catalog.services[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Resolve a canonical id or a retired alias.
    pub fn resolve<'a>(&'a self, id: &'a str) -> Option<Resolved<'a>> {
        if let Some(service) = self.find_by_id(id) {
            return Some(Resolved::Canonical(service));
        }
        let (from, target) = self.catalog.aliases.get_key_value(id)?;
        let to = self.find_by_id(target.as_str())?;
        Some(Resolved::Alias {
            from: from.as_str(),
            to,
        })
    }

    pub fn aliases(&self) -> &BTreeMap<String, ServiceId> {
        &self.catalog.aliases
    }

    pub fn filter_by_category(&self, category: ServiceCategory) -> Vec<&ServiceDefinition> {
        self.list(&ServiceFilter::new().category(category))
    }

    pub fn filter_by_sub_category(&self, sub_category: &SubCategory) -> Vec<&ServiceDefinition> {
        self.list(&ServiceFilter::new().sub_category(sub_category.clone()))
    }

    /// Services matching `filter`, in catalog order.
    pub fn list(&self, filter: &ServiceFilter) -> Vec<&ServiceDefinition> {
        self.catalog
            .services
            .iter()
            .filter(|service| filter.matches(service))
            .collect()
    }

    /// Services whose dependency list names `id`, in catalog order.
    pub fn dependents_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a ServiceDefinition> {
        self.catalog
            .services
            .iter()
            .filter(move |service| service.depends_on(id))
    }

    /// Distinct subcategories in order of first appearance.
    pub fn sub_categories(&self) -> Vec<&SubCategory> {
        let mut seen = BTreeSet::new();
        self.catalog
            .services
            .iter()
            .map(|service| &service.sub_category)
            .filter(|sub| seen.insert(*sub))
            .collect()
    }
}

fn validate_catalog_key(key: &CatalogKey) -> Result<()> {
    if !is_valid_version_token(&key.0) {
        bail!("catalog key must match ^[A-Za-z0-9_.-]+$, got '{}'", key.0);
    }
    Ok(())
}

fn build_index(catalog: &ServiceCatalog) -> Result<BTreeMap<ServiceId, usize>> {
    if catalog.services.is_empty() {
        bail!("catalog contains no services");
    }

    let mut map = BTreeMap::new();
    for (pos, service) in catalog.services.iter().enumerate() {
        if service.id.0.trim().is_empty() {
            bail!("encountered service with no id");
        }
        if service.name.trim().is_empty() {
            bail!("service {} has an empty name", service.id);
        }
        if map.insert(service.id.clone(), pos).is_some() {
            bail!("duplicate service id {}", service.id);
        }
    }
    Ok(map)
}

fn validate_dependencies(
    catalog: &ServiceCatalog,
    by_id: &BTreeMap<ServiceId, usize>,
) -> Result<()> {
    for service in &catalog.services {
        match service.category {
            ServiceCategory::Base if !service.dependencies.is_empty() => {
                bail!(
                    "base service {} must not declare dependencies",
                    service.id
                );
            }
            ServiceCategory::Addon if service.dependencies.is_empty() => {
                bail!(
                    "add-on {} declares no base dependencies and could never be selected",
                    service.id
                );
            }
            _ => {}
        }

        for dep in &service.dependencies {
            let Some(&pos) = by_id.get(dep) else {
                bail!("service {} depends on unknown service {}", service.id, dep);
            };
            if !catalog.services[pos].is_base() {
                bail!(
                    "service {} depends on {}, which is not a base service",
                    service.id,
                    dep
                );
            }
        }
    }
    Ok(())
}

fn validate_aliases(catalog: &ServiceCatalog, by_id: &BTreeMap<ServiceId, usize>) -> Result<()> {
    for (alias, target) in &catalog.aliases {
        if by_id.contains_key(alias.as_str()) {
            bail!("alias {alias} shadows an existing service id");
        }
        if !by_id.contains_key(target) {
            bail!("alias {alias} points to unknown service {target}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn catalog_json(services: Value) -> Value {
        json!({
            "schema_version": "agency_services_v1",
            "title": "fixture",
            "aliases": {"site-web": "site-vitrine"},
            "services": services
        })
    }

    fn fixture_services() -> Value {
        json!([
            {"id": "site-vitrine", "name": "Site Vitrine", "description": "Site", "price": 1200,
             "category": "base", "sub_category": "visibilite"},
            {"id": "landing-page", "name": "Landing Page", "description": "Page", "price": 600,
             "category": "base", "sub_category": "visibilite"},
            {"id": "blog", "name": "Blog", "description": "Articles", "price": 400,
             "category": "addon", "sub_category": "growth", "dependencies": ["site-vitrine"]}
        ])
    }

    fn fixture_index() -> CatalogIndex {
        CatalogIndex::from_json_str(&catalog_json(fixture_services()).to_string(), "fixture")
            .expect("fixture catalog is valid")
    }

    #[test]
    fn lookups_preserve_catalog_order() {
        let index = fixture_index();
        assert_eq!(index.len(), 3);
        assert_eq!(index.find_by_id("blog").map(|s| s.price), Some(400));
        assert!(index.find_by_id("missing").is_none());

        let bases: Vec<&str> = index
            .filter_by_category(ServiceCategory::Base)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(bases, ["site-vitrine", "landing-page"]);

        let visibility = index.filter_by_sub_category(&SubCategory::Visibilite);
        assert_eq!(visibility.len(), 2);
        assert_eq!(index.sub_categories(), [&SubCategory::Visibilite, &SubCategory::Growth]);
    }

    #[test]
    fn resolve_follows_aliases() {
        let index = fixture_index();
        match index.resolve("site-web") {
            Some(Resolved::Alias { from, to }) => {
                assert_eq!(from, "site-web");
                assert_eq!(to.id.as_str(), "site-vitrine");
            }
            other => panic!("expected alias, got {other:?}"),
        }
        assert!(matches!(index.resolve("blog"), Some(Resolved::Canonical(_))));
        assert!(index.resolve("nope").is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut services = fixture_services();
        let dup = services[0].clone();
        services.as_array_mut().unwrap().push(dup);
        let err = CatalogIndex::from_json_str(&catalog_json(services).to_string(), "dup")
            .expect_err("duplicate should fail");
        assert!(format!("{err:#}").contains("duplicate service id site-vitrine"));
    }

    #[test]
    fn rejects_dangling_and_non_base_dependencies() {
        let mut services = fixture_services();
        services[2]["dependencies"] = json!(["site-ecommerce"]);
        let err = CatalogIndex::from_json_str(&catalog_json(services).to_string(), "dangling")
            .expect_err("unknown dependency should fail");
        assert!(format!("{err:#}").contains("unknown service site-ecommerce"));

        let mut services = fixture_services();
        services.as_array_mut().unwrap().push(json!({
            "id": "rss", "name": "RSS", "description": "", "price": 50,
            "category": "addon", "sub_category": "growth", "dependencies": ["blog"]
        }));
        let err = CatalogIndex::from_json_str(&catalog_json(services).to_string(), "chained")
            .expect_err("add-on on add-on should fail");
        assert!(format!("{err:#}").contains("not a base service"));
    }

    #[test]
    fn rejects_addon_without_dependencies_and_base_with_dependencies() {
        let mut services = fixture_services();
        services[2]["dependencies"] = json!([]);
        assert!(CatalogIndex::from_json_str(&catalog_json(services).to_string(), "x").is_err());

        let mut services = fixture_services();
        services[1]["dependencies"] = json!(["site-vitrine"]);
        assert!(CatalogIndex::from_json_str(&catalog_json(services).to_string(), "y").is_err());
    }

    #[test]
    fn rejects_bad_aliases() {
        let mut value = catalog_json(fixture_services());
        value["aliases"] = json!({"blog": "site-vitrine"});
        assert!(CatalogIndex::from_json_str(&value.to_string(), "shadow").is_err());

        value["aliases"] = json!({"old": "gone"});
        assert!(CatalogIndex::from_json_str(&value.to_string(), "dangling").is_err());
    }

    #[test]
    fn schema_rejects_unknown_fields_and_versions() {
        let mut value = catalog_json(fixture_services());
        value["services"][0]["colour"] = json!("pink");
        let err = CatalogIndex::from_json_str(&value.to_string(), "extra")
            .expect_err("unknown field should fail");
        assert!(format!("{err:#}").contains("failed schema validation"));

        let mut value = catalog_json(fixture_services());
        value["schema_version"] = json!("agency_services_v0");
        assert!(CatalogIndex::from_json_str(&value.to_string(), "old").is_err());
    }

    #[test]
    fn load_reads_catalog_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", catalog_json(fixture_services())).unwrap();
        let index = CatalogIndex::load(file.path()).expect("load fixture");
        assert_eq!(index.key(), &CatalogKey("agency_services_v1".into()));
        assert_eq!(index.title(), "fixture");
    }

    #[test]
    fn load_with_schema_aligns_version_const() {
        let mut catalog = NamedTempFile::new().unwrap();
        let mut value = catalog_json(fixture_services());
        value["schema_version"] = json!("agency_services_v2");
        write!(catalog, "{value}").unwrap();

        let mut schema = NamedTempFile::new().unwrap();
        write!(schema, "{}", crate::catalog::builtin::BUILTIN_SCHEMA_JSON).unwrap();

        let index = CatalogIndex::load_with_schema(catalog.path(), schema.path())
            .expect("external schema accepts newer version");
        assert_eq!(index.key().0, "agency_services_v2");
        assert!(CatalogIndex::load(catalog.path()).is_err());
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let index = CatalogIndex::builtin().expect("built-in catalog loads");
        assert!(!index.is_empty());
        for (alias, target) in index.aliases() {
            assert!(index.find_by_id(alias).is_none());
            assert!(index.contains(target.as_str()));
        }
    }
}
