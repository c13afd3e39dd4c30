//! Service catalog and cart rules for the agency site.
//!
//! The crate exposes the static catalog (`catalog`), the dependency rule and
//! selection transitions (`selection`, `cart`), and per-service aggregates
//! (`analytics`). Rendering, routing and SEO formatting live with the callers;
//! they consume the types re-exported here.

pub mod analytics;
pub mod assets;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod notice;
pub mod selection;

mod schema_loader;

pub use analytics::{
    Analytics, AnalyticsCache, COMPLEMENTARY_LIMIT, DisplayStats, RELATED_LIMIT, analyze,
    average_price, sub_category_averages,
};
pub use assets::{AssetProbe, FsAssetProbe, hero_image, verified_image};
pub use cart::Cart;
pub use catalog::{
    CatalogIndex, CatalogKey, CategoryIcon, Resolved, ServiceCatalog, ServiceCategory,
    ServiceDefinition, ServiceFilter, ServiceId, SubCategory, SubCategoryStyle,
    load_catalog_from_path,
};
pub use config::Settings;
pub use error::CatalogError;
pub use notice::{Notice, NoticeLevel, Notifier, TracingNotifier};
pub use selection::{
    RemovalPolicy, SelectionChange, SelectionSet, ToggleOutcome, is_eligible, orphaned_addons,
    toggle, toggle_selection, toggle_with_policy,
};

/// List services matching `filter` (everything when `None`), in catalog order.
pub fn list_services<'a>(
    index: &'a CatalogIndex,
    filter: Option<&ServiceFilter>,
) -> Vec<&'a ServiceDefinition> {
    match filter {
        Some(filter) => index.list(filter),
        None => index.services().iter().collect(),
    }
}
