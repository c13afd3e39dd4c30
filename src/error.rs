//! Errors returned by catalog lookups and cart operations.
//!
//! Neither kind is fatal: `NotFound` maps to a missing-resource page or a
//! skipped entry, `DependencyNotSatisfied` to a notice with the selection left
//! untouched. Load-time catalog defects are reported through `anyhow` instead.

use crate::catalog::ServiceId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("service '{id}' not found in catalog")]
    NotFound { id: String },

    #[error("{name} requires one of [{}] to be selected first", join_ids(.required))]
    DependencyNotSatisfied {
        id: ServiceId,
        name: String,
        required: Vec<ServiceId>,
    },
}

impl CatalogError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

fn join_ids(ids: &[ServiceId]) -> String {
    ids.iter()
        .map(ServiceId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
