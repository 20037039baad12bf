//! Desired-state resource graph and stack builder for SiteStack.
//!
//! A stack program declares resources through [`StackBuilder`] in a single
//! linear pass; every declaration returns a handle carrying the resource's
//! deferred attributes. Referencing another resource's attribute is what
//! creates a dependency edge, so the resulting [`StackGraph`] is acyclic by
//! construction. The graph is then handed, explicitly, to a provisioning
//! engine; nothing here talks to a provider or touches the filesystem.

mod builder;
mod error;
mod graph;
mod node;
mod plan;

pub use builder::{
    BucketHandle, DistributionHandle, ObjectHandle, PolicyHandle, StackBuilder,
};
pub use error::GraphError;
pub use graph::{StackExport, StackGraph};
pub use node::{ResourceKind, ResourceNode, ResourceOutputs, ResourceSpec};
pub use plan::{PlanDocument, PlanResource};
