//! Per-session cart: the single writer of one `SelectionSet`.
//!
//! The cart borrows the catalog, threads its selection through the pure
//! functions in `selection`, and reports each change to a `Notifier`. A
//! rejected toggle leaves the selection exactly as it was.

use crate::catalog::{CatalogIndex, ServiceDefinition};
use crate::error::CatalogError;
use crate::notice::{Notice, Notifier};
use crate::selection::{
    RemovalPolicy, SelectionChange, SelectionSet, is_eligible, orphaned_addons,
    toggle_with_policy,
};

#[derive(Debug, Clone)]
pub struct Cart<'c> {
    index: &'c CatalogIndex,
    selection: SelectionSet,
    policy: RemovalPolicy,
}

impl<'c> Cart<'c> {
    pub fn new(index: &'c CatalogIndex, policy: RemovalPolicy) -> Self {
        Self::with_selection(index, SelectionSet::new(), policy)
    }

    /// Resume a cart from a previously captured selection.
    pub fn with_selection(
        index: &'c CatalogIndex,
        selection: SelectionSet,
        policy: RemovalPolicy,
    ) -> Self {
        Self {
            index,
            selection,
            policy,
        }
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn into_selection(self) -> SelectionSet {
        self.selection
    }

    pub fn policy(&self) -> RemovalPolicy {
        self.policy
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    /// Whether selecting `id` would currently succeed. Unknown ids cannot be
    /// added.
    pub fn can_add(&self, id: &str) -> bool {
        self.index
            .find_by_id(id)
            .is_some_and(|service| is_eligible(service, &self.selection))
    }

    /// Toggle `id` and notify the outcome.
    pub fn toggle(
        &mut self,
        id: &str,
        notifier: &mut dyn Notifier,
    ) -> Result<SelectionChange, CatalogError> {
        let Some(candidate) = self.index.find_by_id(id) else {
            tracing::warn!(service = id, "toggle requested for unknown service");
            return Err(CatalogError::not_found(id));
        };

        let outcome = match toggle_with_policy(self.index, candidate, &self.selection, self.policy)
        {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(service = id, "{err}");
                notifier.notify(Notice::Rejected {
                    id: candidate.id.clone(),
                    name: candidate.name.clone(),
                    required: candidate.dependencies.clone(),
                });
                return Err(err);
            }
        };

        match &outcome.change {
            SelectionChange::Added(_) => notifier.notify(Notice::Added {
                id: candidate.id.clone(),
                name: candidate.name.clone(),
            }),
            SelectionChange::Removed { cascaded, .. } => {
                notifier.notify(Notice::Removed {
                    id: candidate.id.clone(),
                    name: candidate.name.clone(),
                });
                for dropped in cascaded.iter().filter_map(|id| self.index.find_by_id(id.as_str())) {
                    tracing::info!(
                        service = %dropped.id,
                        base = id,
                        "removed add-on left without a selected base service"
                    );
                    notifier.notify(Notice::Removed {
                        id: dropped.id.clone(),
                        name: dropped.name.clone(),
                    });
                }
            }
        }

        self.selection = outcome.selection;
        Ok(outcome.change)
    }

    /// Selected services in selection order.
    pub fn selected_services(&self) -> Vec<&'c ServiceDefinition> {
        self.selection
            .iter()
            .filter_map(|id| self.index.find_by_id(id.as_str()))
            .collect()
    }

    /// Add-ons still selected although none of their base services is.
    pub fn orphaned_addons(&self) -> Vec<&'c ServiceDefinition> {
        orphaned_addons(self.index, &self.selection)
    }

    /// Sum of selected prices in whole euros.
    pub fn total_price(&self) -> u64 {
        self.selected_services()
            .iter()
            .map(|service| u64::from(service.price))
            .sum()
    }

    pub fn clear(&mut self) {
        self.selection = SelectionSet::new();
    }
}
