//! Provisioning-engine seam and simulated apply for SiteStack.
//!
//! Graph construction is pure; everything with external side effects (file
//! reads, provider calls) sits behind the narrow [`ProvisioningEngine`]
//! trait. [`SimulatedEngine`] is the in-process implementation: it validates
//! the graph at plan time, applies nodes in dependency order, resolves their
//! deferred attributes deterministically, and records a state snapshot.
//! Reconciliation against a real provider (diffing, retries, drift
//! detection) belongs to an external engine consuming the same graph.

mod engine;
mod error;
mod simulated;
mod snapshot;
pub mod validate;

pub use engine::{ProvisioningEngine, ResolvedOutputs};
pub use error::{ProvisionError, ProvisionErrorKind};
pub use simulated::SimulatedEngine;
pub use snapshot::{ResourceRecord, StateSnapshot};
