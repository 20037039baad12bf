//! Common identity types shared across the SiteStack crates.

use std::fmt;

/// Logical name of a declared resource within a stack.
///
/// Logical names identify the declaration itself (`"siteBucket"`,
/// `"bucketPolicy"`); the physical identifier of the provisioned resource is
/// generated by the provisioning engine at apply time and is unrelated to
/// this name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct LogicalName(String);

impl LogicalName {
    /// Create a new logical name.
    ///
    /// No validation happens here; malformed declarations are rejected by
    /// the provisioning engine at plan time.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the logical name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LogicalName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Identifier of a resource node within a single desired-state graph.
///
/// Ids are ordinals assigned in declaration order by the stack builder; they
/// are only meaningful within the graph that issued them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct ResourceId(usize);

impl ResourceId {
    /// Create a resource id from its ordinal position in the graph.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// The ordinal position of this resource in the graph's node list.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// AWS Region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AwsRegion(String);

impl AwsRegion {
    /// Default region used when the stack does not specify one.
    pub const DEFAULT: &str = "us-east-1";

    /// Create a new region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AwsRegion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
