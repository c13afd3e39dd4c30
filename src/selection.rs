//! Dependency rule and selection-set transitions.
//!
//! Every operation here is a pure function from `(candidate, selection)` to a
//! new selection or a rejection. State is owned by the caller (see
//! `cart::Cart` for the single-writer store); nothing is retained between
//! calls.

use crate::catalog::{CatalogIndex, ServiceCategory, ServiceDefinition, ServiceId};
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// Set of selected service ids.
///
/// Membership is unique; insertion order is kept for display but ignored by
/// equality.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ServiceId>", into = "Vec<ServiceId>")]
pub struct SelectionSet {
    ids: Vec<ServiceId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|selected| selected.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceId> {
        self.ids.iter()
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> &[ServiceId] {
        &self.ids
    }

    fn with(&self, id: &ServiceId) -> Self {
        let mut next = self.clone();
        if !next.contains(id.as_str()) {
            next.ids.push(id.clone());
        }
        next
    }

    fn without(&self, id: &str) -> Self {
        Self {
            ids: self
                .ids
                .iter()
                .filter(|selected| selected.as_str() != id)
                .cloned()
                .collect(),
        }
    }
}

impl PartialEq for SelectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|id| other.contains(id.as_str()))
    }
}

impl Eq for SelectionSet {}

impl From<Vec<ServiceId>> for SelectionSet {
    fn from(ids: Vec<ServiceId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<SelectionSet> for Vec<ServiceId> {
    fn from(selection: SelectionSet) -> Self {
        selection.ids
    }
}

impl FromIterator<ServiceId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = ServiceId>>(iter: I) -> Self {
        let mut selection = SelectionSet::new();
        for id in iter {
            if !selection.contains(id.as_str()) {
                selection.ids.push(id);
            }
        }
        selection
    }
}

/// What happens to dependent add-ons when a base service is removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalPolicy {
    /// Leave dependent add-ons selected even when no base remains for them.
    #[default]
    Keep,
    /// Drop add-ons whose last selected dependency was just removed.
    Cascade,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionChange {
    Added(ServiceId),
    Removed {
        id: ServiceId,
        /// Add-ons removed along with `id` under `RemovalPolicy::Cascade`.
        cascaded: Vec<ServiceId>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub selection: SelectionSet,
    pub change: SelectionChange,
}

/// Base services are always eligible; an add-on needs at least one of its
/// dependencies already selected.
pub fn is_eligible(candidate: &ServiceDefinition, selection: &SelectionSet) -> bool {
    match candidate.category {
        ServiceCategory::Base => true,
        ServiceCategory::Addon => candidate
            .dependencies
            .iter()
            .any(|dep| selection.contains(dep.as_str())),
    }
}

/// Remove `candidate` if selected, otherwise add it when eligible.
///
/// Removal is always allowed and does not touch dependent add-ons. A rejected
/// add returns `DependencyNotSatisfied` and the caller keeps its selection.
pub fn toggle(
    candidate: &ServiceDefinition,
    selection: &SelectionSet,
) -> Result<SelectionSet, CatalogError> {
    if selection.contains(candidate.id.as_str()) {
        return Ok(selection.without(candidate.id.as_str()));
    }
    if is_eligible(candidate, selection) {
        Ok(selection.with(&candidate.id))
    } else {
        Err(CatalogError::DependencyNotSatisfied {
            id: candidate.id.clone(),
            name: candidate.name.clone(),
            required: candidate.dependencies.clone(),
        })
    }
}

/// `toggle` plus the removal policy and a description of what changed.
pub fn toggle_with_policy(
    index: &CatalogIndex,
    candidate: &ServiceDefinition,
    selection: &SelectionSet,
    policy: RemovalPolicy,
) -> Result<ToggleOutcome, CatalogError> {
    let next = toggle(candidate, selection)?;
    if next.contains(candidate.id.as_str()) {
        return Ok(ToggleOutcome {
            selection: next,
            change: SelectionChange::Added(candidate.id.clone()),
        });
    }

    let cascaded: Vec<ServiceId> = match policy {
        RemovalPolicy::Cascade if candidate.is_base() => orphaned_addons(index, &next)
            .into_iter()
            .filter(|service| service.depends_on(candidate.id.as_str()))
            .map(|service| service.id.clone())
            .collect(),
        _ => Vec::new(),
    };
    let selection = cascaded
        .iter()
        .fold(next, |acc, id| acc.without(id.as_str()));

    Ok(ToggleOutcome {
        selection,
        change: SelectionChange::Removed {
            id: candidate.id.clone(),
            cascaded,
        },
    })
}

/// Id-based toggle for callers holding only a service id.
pub fn toggle_selection(
    index: &CatalogIndex,
    candidate_id: &str,
    selection: &SelectionSet,
) -> Result<SelectionSet, CatalogError> {
    let candidate = index
        .find_by_id(candidate_id)
        .ok_or_else(|| CatalogError::not_found(candidate_id))?;
    toggle(candidate, selection)
}

/// Selected add-ons none of whose dependencies is selected, in selection order.
///
/// Under `RemovalPolicy::Cascade` these only come from a resumed selection;
/// ids missing from the catalog are skipped.
pub fn orphaned_addons<'a>(
    index: &'a CatalogIndex,
    selection: &SelectionSet,
) -> Vec<&'a ServiceDefinition> {
    selection
        .iter()
        .filter_map(|id| index.find_by_id(id.as_str()))
        .filter(|service| service.is_addon() && !is_eligible(service, selection))
        .collect()
}
