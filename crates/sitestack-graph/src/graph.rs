//! The desired-state graph handed to a provisioning engine.

use std::collections::VecDeque;

use sitestack_core::{AwsRegion, Output, ResourceId};

use crate::error::GraphError;
use crate::node::ResourceNode;

/// A named value re-exported from the graph for downstream consumers.
///
/// Export values are deferred; they become readable only after the apply
/// step resolves them.
#[derive(Debug)]
pub struct StackExport {
    /// Name the value is published under.
    pub name: String,
    /// The exported value.
    pub value: Output<String>,
}

/// A complete desired-state graph: resource nodes, dependency edges, and
/// named exports.
///
/// The graph owns its nodes; there is no global registry. It is built once
/// by a [`crate::StackBuilder`] and passed explicitly to a provisioning
/// engine.
#[derive(Debug)]
pub struct StackGraph {
    pub(crate) name: String,
    pub(crate) region: AwsRegion,
    pub(crate) nodes: Vec<ResourceNode>,
    pub(crate) exports: Vec<StackExport>,
}

impl StackGraph {
    /// Name of the stack this graph describes.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Region the stack targets.
    #[must_use]
    pub fn region(&self) -> &AwsRegion {
        &self.region
    }

    /// All nodes, in declaration order.
    #[must_use]
    pub fn nodes(&self) -> &[ResourceNode] {
        &self.nodes
    }

    /// The node with the given id, if it belongs to this graph.
    #[must_use]
    pub fn get(&self, id: ResourceId) -> Option<&ResourceNode> {
        self.nodes.get(id.index())
    }

    /// Named exports, in declaration order.
    #[must_use]
    pub fn exports(&self) -> &[StackExport] {
        &self.exports
    }

    /// Nodes in an order where every dependency precedes its dependents
    /// (Kahn's algorithm, stable with respect to declaration order).
    ///
    /// # Errors
    ///
    /// - [`GraphError::UnknownDependency`] if an edge points outside the
    ///   graph.
    /// - [`GraphError::DependencyCycle`] if the edges contain a cycle.
    ///   Builder-produced graphs cannot cycle; this guards hand-assembled
    ///   ones.
    pub fn deployment_order(&self) -> Result<Vec<&ResourceNode>, GraphError> {
        let count = self.nodes.len();

        let mut indegree = vec![0_usize; count];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); count];
        for node in &self.nodes {
            for dependency in &node.depends_on {
                if dependency.index() >= count {
                    return Err(GraphError::UnknownDependency {
                        resource: node.name.to_string(),
                        dependency: *dependency,
                    });
                }
                indegree[node.id.index()] += 1;
                dependents[dependency.index()].push(node.id.index());
            }
        }

        let mut ready: VecDeque<usize> = (0..count).filter(|&i| indegree[i] == 0).collect();
        let mut order = Vec::with_capacity(count);
        while let Some(index) = ready.pop_front() {
            order.push(&self.nodes[index]);
            for &dependent in &dependents[index] {
                indegree[dependent] -= 1;
                if indegree[dependent] == 0 {
                    ready.push_back(dependent);
                }
            }
        }

        if order.len() != count {
            return Err(GraphError::DependencyCycle {
                unordered: count - order.len(),
            });
        }
        Ok(order)
    }
}
