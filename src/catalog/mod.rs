//! Service catalog wiring.
//!
//! This module wraps the JSON catalog under `catalog/services.json` so callers
//! can load a validated snapshot and look services up by id. Types here mirror
//! the schema fields; callers use `CatalogIndex` for lookups and listings.

pub mod builtin;
pub mod filter;
pub mod identity;
pub mod index;
pub mod model;
pub mod style;

pub use builtin::CATALOG_SCHEMA_VERSION;
pub use filter::ServiceFilter;
pub use identity::{CatalogKey, ServiceCategory, ServiceId, SubCategory};
pub use index::{CatalogIndex, Resolved};
pub use model::{ServiceCatalog, ServiceDefinition, load_catalog_from_path, parse_catalog};
pub use style::{CategoryIcon, DEFAULT_SERVICE_IMAGE, SubCategoryStyle};
