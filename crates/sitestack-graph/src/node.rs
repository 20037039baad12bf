//! Resource nodes: kind-tagged descriptions plus their deferred attributes.

use std::fmt;

use serde::{Deserialize, Serialize};
use sitestack_core::{LogicalName, Output, ResourceId};
use sitestack_model::{BucketObjectSpec, BucketPolicySpec, BucketSpec, DistributionSpec};

/// The kind of a declared resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// A storage bucket.
    #[serde(rename = "aws:s3:Bucket")]
    Bucket,
    /// An object uploaded into a bucket.
    #[serde(rename = "aws:s3:BucketObject")]
    BucketObject,
    /// A policy attached to a bucket.
    #[serde(rename = "aws:s3:BucketPolicy")]
    BucketPolicy,
    /// A content-delivery distribution.
    #[serde(rename = "aws:cloudfront:Distribution")]
    Distribution,
}

impl ResourceKind {
    /// The type token used in plan documents and state snapshots.
    #[must_use]
    pub fn type_token(self) -> &'static str {
        match self {
            Self::Bucket => "aws:s3:Bucket",
            Self::BucketObject => "aws:s3:BucketObject",
            Self::BucketPolicy => "aws:s3:BucketPolicy",
            Self::Distribution => "aws:cloudfront:Distribution",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_token())
    }
}

/// A resource description, tagged by kind.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResourceSpec {
    /// Storage bucket description.
    Bucket(BucketSpec),
    /// Object upload description.
    BucketObject(BucketObjectSpec),
    /// Bucket policy description.
    BucketPolicy(BucketPolicySpec),
    /// Distribution description.
    Distribution(DistributionSpec),
}

impl ResourceSpec {
    /// The kind tag of this description.
    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Bucket(_) => ResourceKind::Bucket,
            Self::BucketObject(_) => ResourceKind::BucketObject,
            Self::BucketPolicy(_) => ResourceKind::BucketPolicy,
            Self::Distribution(_) => ResourceKind::Distribution,
        }
    }

    /// Resources this description references through deferred attributes,
    /// sorted and deduplicated.
    #[must_use]
    pub fn dependencies(&self) -> Vec<ResourceId> {
        let mut sources = match self {
            Self::Bucket(_) => Vec::new(),
            Self::BucketObject(spec) => spec.bucket.sources().to_vec(),
            Self::BucketPolicy(spec) => {
                let mut sources = spec.bucket.sources().to_vec();
                sources.extend_from_slice(spec.policy.sources());
                sources
            }
            Self::Distribution(spec) => spec.deferred_sources(),
        };
        sources.sort_unstable();
        sources.dedup();
        sources
    }
}

/// The deferred attributes a node exposes to the rest of the graph.
///
/// The engine resolves these when the node is applied; handles returned by
/// the builder are clones of the same outputs.
#[derive(Debug)]
pub enum ResourceOutputs {
    /// Attributes generated for a bucket.
    Bucket {
        /// Generated bucket name.
        bucket: Output<String>,
        /// Generated bucket ARN.
        arn: Output<String>,
        /// Generated website endpoint.
        website_endpoint: Output<String>,
    },
    /// Attributes generated for an uploaded object.
    BucketObject {
        /// Entity tag of the uploaded body.
        etag: Output<String>,
    },
    /// A policy attachment exposes no generated attributes.
    BucketPolicy,
    /// Attributes generated for a distribution.
    Distribution {
        /// Generated distribution domain name.
        domain_name: Output<String>,
    },
}

/// A node of the desired-state graph.
#[derive(Debug)]
pub struct ResourceNode {
    /// Id of this node within its graph.
    pub id: ResourceId,
    /// Logical name of the declaration.
    pub name: LogicalName,
    /// The resource description.
    pub spec: ResourceSpec,
    /// Ids of the resources this node depends on.
    pub depends_on: Vec<ResourceId>,
    /// Deferred attributes resolved when this node is applied.
    pub outputs: ResourceOutputs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_expose_type_tokens() {
        assert_eq!(ResourceKind::Bucket.type_token(), "aws:s3:Bucket");
        assert_eq!(
            ResourceKind::Distribution.to_string(),
            "aws:cloudfront:Distribution"
        );
    }

    #[test]
    fn test_should_report_no_dependencies_for_bucket() {
        let spec = ResourceSpec::Bucket(BucketSpec::website("index.html", "error.html"));
        assert_eq!(spec.kind(), ResourceKind::Bucket);
        assert!(spec.dependencies().is_empty());
    }

    #[test]
    fn test_should_dedup_policy_dependencies() {
        let bucket_id = ResourceId::new(0);
        let bucket: Output<String> = Output::pending_from([bucket_id]);
        let policy = bucket.map(|name| format!("policy for {name}"));
        let spec = ResourceSpec::BucketPolicy(BucketPolicySpec::new(bucket, policy));

        // Both attributes derive from the same bucket; one edge results.
        assert_eq!(spec.dependencies(), vec![bucket_id]);
    }
}
