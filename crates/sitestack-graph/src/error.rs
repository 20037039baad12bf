//! Error types for graph inspection and rendering.

use sitestack_core::ResourceId;

/// Errors surfaced while ordering or rendering a desired-state graph.
///
/// Graphs assembled through the stack builder cannot produce the structural
/// variants; they guard hand-assembled graphs and future builder changes.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The dependency edges contain a cycle.
    #[error("dependency cycle: {unordered} resource(s) could not be ordered")]
    DependencyCycle {
        /// Number of nodes left unordered after the topological pass.
        unordered: usize,
    },

    /// A node depends on an id that is not part of the graph.
    #[error("resource {resource} depends on unknown resource {dependency}")]
    UnknownDependency {
        /// Logical name of the depending node.
        resource: String,
        /// The id that did not resolve to a node.
        dependency: ResourceId,
    },

    /// A resource description could not be rendered into the plan document.
    #[error("failed to render plan document: {0}")]
    Render(#[from] serde_json::Error),
}
