//! Core types, configuration, and deferred values for SiteStack.
//!
//! This crate provides the foundational building blocks shared across the
//! SiteStack crates: logical/physical resource identity, the stack
//! configuration, and [`Output`], the promise-like deferred value that wires
//! resource declarations together before the provisioning engine resolves
//! their generated attributes.

mod config;
mod error;
mod output;
mod types;

pub use config::StackConfig;
pub use error::{SiteStackError, SiteStackResult};
pub use output::Output;
pub use types::{AwsRegion, LogicalName, ResourceId};
