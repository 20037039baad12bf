//! The engine seam: the one interface with external side effects.

use std::collections::BTreeMap;

use serde::Serialize;
use sitestack_graph::StackGraph;

use crate::error::ProvisionError;

/// A provisioning engine consumes a desired-state graph and resolves its
/// deferred attributes.
///
/// This is the whole contract between graph construction and the outside
/// world: every resource and edge must be expressible to the engine, and
/// every deferred attribute must resolve to a value the engine supplies
/// post-creation. Diffing against previous state, retries, and drift
/// detection are engine concerns and are invisible to the graph.
pub trait ProvisioningEngine {
    /// Apply the graph, resolving every deferred attribute in dependency
    /// order.
    ///
    /// # Errors
    ///
    /// Returns a [`ProvisionError`] classified by
    /// [`ProvisionError::kind`](crate::ProvisionError::kind); the graph is
    /// never partially rolled back by this layer.
    fn apply(&self, graph: &StackGraph) -> Result<ResolvedOutputs, ProvisionError>;
}

/// The resolved values of a graph's named exports after a successful apply.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ResolvedOutputs {
    values: BTreeMap<String, String>,
}

impl ResolvedOutputs {
    /// Wrap a resolved export map.
    #[must_use]
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    /// The resolved value of the named export.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of exports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the graph exported anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
