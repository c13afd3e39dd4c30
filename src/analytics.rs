//! Per-service aggregates for detail pages and structured data.
//!
//! Everything is derived from the catalog except `DisplayStats`, which are
//! configured constants. Results are pure functions of `(catalog, id)`, so
//! `AnalyticsCache` can memoize them for the lifetime of the index.

use crate::catalog::{CatalogIndex, ServiceDefinition, ServiceId, SubCategory};
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const RELATED_LIMIT: usize = 3;
pub const COMPLEMENTARY_LIMIT: usize = 4;

/// Social-proof figures shown next to every service.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayStats {
    pub total_reviews: u32,
    pub avg_rating: f32,
    pub delivered_projects: u32,
    /// Percent.
    pub satisfaction_rate: u8,
}

impl Default for DisplayStats {
    fn default() -> Self {
        Self {
            total_reviews: 127,
            avg_rating: 4.9,
            delivered_projects: 500,
            satisfaction_rate: 98,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Analytics<'a> {
    pub service: &'a ServiceDefinition,
    /// Rounded mean price of the service's subcategory, itself included.
    pub avg_price: u32,
    /// Same subcategory, excluding the service, at most `RELATED_LIMIT`.
    pub related_services: Vec<&'a ServiceDefinition>,
    /// Add-ons that list this service as a dependency, at most
    /// `COMPLEMENTARY_LIMIT`. Always empty for add-ons.
    pub complementary_services: Vec<&'a ServiceDefinition>,
    pub category_services: Vec<&'a ServiceDefinition>,
    pub stats: DisplayStats,
}

/// Compute analytics for the service with canonical id `service_id`.
pub fn analyze<'a>(
    index: &'a CatalogIndex,
    service_id: &str,
    stats: &DisplayStats,
) -> Result<Analytics<'a>, CatalogError> {
    let service = index
        .find_by_id(service_id)
        .ok_or_else(|| CatalogError::not_found(service_id))?;

    let category_services = index.filter_by_sub_category(&service.sub_category);
    let avg_price = average_price(category_services.iter().copied()).unwrap_or(service.price);

    let related_services = category_services
        .iter()
        .copied()
        .filter(|candidate| candidate.id != service.id)
        .take(RELATED_LIMIT)
        .collect();

    let complementary_services = if service.is_base() {
        index
            .dependents_of(service.id.as_str())
            .take(COMPLEMENTARY_LIMIT)
            .collect()
    } else {
        Vec::new()
    };

    Ok(Analytics {
        service,
        avg_price,
        related_services,
        complementary_services,
        category_services,
        stats: *stats,
    })
}

/// Mean price rounded half away from zero; `None` for an empty input.
pub fn average_price<'a>(services: impl IntoIterator<Item = &'a ServiceDefinition>) -> Option<u32> {
    let (sum, count) = services
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), service| {
            (sum + u64::from(service.price), count + 1)
        });
    if count == 0 {
        return None;
    }
    let rounded = (sum * 2 + count) / (count * 2);
    u32::try_from(rounded).ok()
}

/// Rounded mean price per subcategory present in the catalog.
pub fn sub_category_averages(index: &CatalogIndex) -> BTreeMap<SubCategory, u32> {
    index
        .sub_categories()
        .into_iter()
        .filter_map(|sub| {
            average_price(index.filter_by_sub_category(sub)).map(|avg| (sub.clone(), avg))
        })
        .collect()
}

/// Memoizes `analyze` per service id.
#[derive(Debug)]
pub struct AnalyticsCache<'a> {
    index: &'a CatalogIndex,
    stats: DisplayStats,
    entries: BTreeMap<ServiceId, Analytics<'a>>,
}

impl<'a> AnalyticsCache<'a> {
    pub fn new(index: &'a CatalogIndex, stats: DisplayStats) -> Self {
        Self {
            index,
            stats,
            entries: BTreeMap::new(),
        }
    }

    pub fn get(&mut self, service_id: &str) -> Result<&Analytics<'a>, CatalogError> {
        if !self.entries.contains_key(service_id) {
            tracing::debug!(service = service_id, "computing service analytics");
            let analytics = analyze(self.index, service_id, &self.stats)?;
            self.entries.insert(analytics.service.id.clone(), analytics);
        }
        self.entries
            .get(service_id)
            .ok_or_else(|| CatalogError::not_found(service_id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
