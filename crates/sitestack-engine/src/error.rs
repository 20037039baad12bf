//! Provisioning error taxonomy.
//!
//! Defines [`ProvisionError`], the error type the engine seam surfaces.
//! Every variant maps to one of three [`ProvisionErrorKind`]s through
//! [`ProvisionError::kind`]: configuration errors are detected at plan time,
//! precondition errors when the apply step touches local inputs, and
//! provider errors when the (simulated) provider rejects a call.

use std::path::PathBuf;

use sitestack_core::SiteStackError;
use sitestack_graph::GraphError;

/// Classification of a provisioning failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionErrorKind {
    /// Malformed resource attributes, detected at plan time.
    Configuration,
    /// A local input referenced by the graph was missing at apply time.
    Precondition,
    /// The provider rejected an apply call.
    Provider,
}

/// Error surfaced by a provisioning engine.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    // -----------------------------------------------------------------------
    // Configuration errors (plan time)
    // -----------------------------------------------------------------------
    /// Two declarations share a logical name.
    #[error("duplicate logical name in graph: {name}")]
    DuplicateLogicalName {
        /// The name declared twice.
        name: String,
    },

    /// Cache TTLs are not ordered `min <= default <= max`.
    #[error("invalid cache TTL ordering: min={min_ttl}, default={default_ttl}, max={max_ttl}")]
    InvalidCacheTtl {
        /// Minimum TTL.
        min_ttl: u64,
        /// Default TTL.
        default_ttl: u64,
        /// Maximum TTL.
        max_ttl: u64,
    },

    /// A bucket name violates the provider naming rules.
    #[error("invalid bucket name {bucket}: {reason}")]
    InvalidBucketName {
        /// The offending name.
        bucket: String,
        /// The violated rule.
        reason: String,
    },

    /// An object declares a content type that does not parse.
    #[error("invalid content type for {resource}: {content_type}")]
    InvalidContentType {
        /// Logical name of the object.
        resource: String,
        /// The unparseable content type.
        content_type: String,
    },

    /// A policy document is not syntactically valid.
    #[error("invalid policy document for {resource}: {source}")]
    InvalidPolicyDocument {
        /// Logical name of the policy resource.
        resource: String,
        /// The underlying parse error.
        source: serde_json::Error,
    },

    /// A deferred attribute was read before its resource was applied.
    ///
    /// Indicates a missing dependency edge; builder-produced graphs cannot
    /// trigger this.
    #[error("unresolved reference: {resource}.{attribute}")]
    UnresolvedReference {
        /// Logical name of the reading resource.
        resource: String,
        /// The attribute that was still pending.
        attribute: String,
    },

    /// An export was still unresolved after every node was applied.
    #[error("export {name} did not resolve during apply")]
    UnresolvedExport {
        /// Name of the export.
        name: String,
    },

    /// A distribution fronts a bucket's website endpoint, but the bucket has
    /// no website configuration.
    #[error("distribution {distribution} fronts bucket {bucket} which has no website configuration")]
    MissingWebsiteConfig {
        /// Logical name of the distribution.
        distribution: String,
        /// Logical name of the bucket.
        bucket: String,
    },

    /// A distribution fronts a bucket's website endpoint with no origin
    /// access identity, but no policy in the graph makes the bucket
    /// publicly readable.
    #[error(
        "distribution {distribution} uses the website endpoint of bucket {bucket}, \
         but the graph declares no policy for that bucket"
    )]
    WebsiteOriginWithoutPolicy {
        /// Logical name of the distribution.
        distribution: String,
        /// Logical name of the bucket.
        bucket: String,
    },

    /// The graph itself could not be ordered or rendered.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A deferred value was misused (e.g. resolved twice).
    #[error(transparent)]
    Core(#[from] SiteStackError),

    // -----------------------------------------------------------------------
    // Precondition errors (apply time, local inputs)
    // -----------------------------------------------------------------------
    /// A referenced local file was missing or unreadable at apply time.
    #[error("source file for {resource} is missing or unreadable: {}", path.display())]
    MissingSourceFile {
        /// Logical name of the object.
        resource: String,
        /// The recorded path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    // -----------------------------------------------------------------------
    // Provider errors (apply time, provider side)
    // -----------------------------------------------------------------------
    /// The requested bucket name is already owned elsewhere.
    #[error("the requested bucket name is not available: {bucket}")]
    BucketNameTaken {
        /// The colliding name.
        bucket: String,
    },

    /// An unexpected engine-side failure the declaration cannot be blamed
    /// for.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ProvisionError {
    /// The taxonomy bucket this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ProvisionErrorKind {
        match self {
            Self::DuplicateLogicalName { .. }
            | Self::InvalidCacheTtl { .. }
            | Self::InvalidBucketName { .. }
            | Self::InvalidContentType { .. }
            | Self::InvalidPolicyDocument { .. }
            | Self::UnresolvedReference { .. }
            | Self::UnresolvedExport { .. }
            | Self::MissingWebsiteConfig { .. }
            | Self::WebsiteOriginWithoutPolicy { .. }
            | Self::Graph(_)
            | Self::Core(_) => ProvisionErrorKind::Configuration,
            Self::MissingSourceFile { .. } => ProvisionErrorKind::Precondition,
            Self::BucketNameTaken { .. } | Self::Internal(_) => ProvisionErrorKind::Provider,
        }
    }
}
