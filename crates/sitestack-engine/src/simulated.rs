//! Deterministic in-process apply.
//!
//! [`SimulatedEngine`] stands in for the external reconciliation engine in
//! tests and local previews. It walks the graph in dependency order,
//! generates physical identifiers, resolves every node's deferred
//! attributes, and records a [`StateSnapshot`]. Object uploads read their
//! source files for real, so missing files surface exactly where a real
//! apply would report them.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use md5::{Digest, Md5};
use parking_lot::Mutex;
use sitestack_core::Output;
use sitestack_graph::{ResourceNode, ResourceOutputs, ResourceSpec, StackGraph};
use sitestack_model::{
    BucketObjectSpec, BucketPolicySpec, BucketSpec, DistributionSpec, PolicyDocument,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::engine::{ProvisioningEngine, ResolvedOutputs};
use crate::error::ProvisionError;
use crate::snapshot::{ResourceRecord, StateSnapshot};
use crate::validate;

/// In-process provisioning engine with simulated provider behavior.
#[derive(Debug, Default)]
pub struct SimulatedEngine {
    snapshot: Mutex<StateSnapshot>,
    taken_bucket_names: Mutex<BTreeSet<String>>,
}

impl SimulatedEngine {
    /// Create an engine with no prior state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a bucket name as owned elsewhere, so applying a bucket with
    /// that explicit name fails with a provider error.
    pub fn mark_bucket_name_taken(&self, name: impl Into<String>) {
        self.taken_bucket_names.lock().insert(name.into());
    }

    /// The state recorded so far, in apply order.
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        self.snapshot.lock().clone()
    }

    /// Random lowercase-hex suffix for generated identifiers.
    fn entropy(len: usize) -> String {
        let mut hex = Uuid::new_v4().simple().to_string();
        hex.truncate(len);
        hex
    }

    /// Derive a bucket-name-safe prefix from a logical name.
    fn sanitize_logical(name: &str) -> String {
        let mut sanitized: String = name
            .chars()
            .map(|c| {
                let c = c.to_ascii_lowercase();
                if c.is_ascii_lowercase() || c.is_ascii_digit() {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        sanitized.truncate(48);
        let trimmed = sanitized.trim_matches('-');
        if trimmed.is_empty() {
            "resource".to_owned()
        } else {
            trimmed.to_owned()
        }
    }

    fn record(
        &self,
        node: &ResourceNode,
        physical_id: String,
        attributes: BTreeMap<String, String>,
    ) {
        self.snapshot.lock().record(ResourceRecord {
            logical_name: node.name.to_string(),
            kind: node.spec.kind(),
            physical_id,
            attributes,
            created_at: Utc::now(),
        });
    }

    fn apply_node(&self, graph: &StackGraph, node: &ResourceNode) -> Result<(), ProvisionError> {
        match (&node.spec, &node.outputs) {
            (
                ResourceSpec::Bucket(spec),
                ResourceOutputs::Bucket {
                    bucket,
                    arn,
                    website_endpoint,
                },
            ) => self.apply_bucket(graph, node, spec, bucket, arn, website_endpoint),
            (ResourceSpec::BucketObject(spec), ResourceOutputs::BucketObject { etag }) => {
                self.apply_object(node, spec, etag)
            }
            (ResourceSpec::BucketPolicy(spec), ResourceOutputs::BucketPolicy) => {
                self.apply_policy(node, spec)
            }
            (ResourceSpec::Distribution(spec), ResourceOutputs::Distribution { domain_name }) => {
                self.apply_distribution(node, spec, domain_name)
            }
            _ => Err(ProvisionError::Internal(anyhow::anyhow!(
                "resource {} has mismatched spec and outputs",
                node.name
            ))),
        }
    }

    fn apply_bucket(
        &self,
        graph: &StackGraph,
        node: &ResourceNode,
        spec: &BucketSpec,
        bucket: &Output<String>,
        arn: &Output<String>,
        website_endpoint: &Output<String>,
    ) -> Result<(), ProvisionError> {
        let physical = match &spec.bucket_name {
            Some(name) => name.clone(),
            None => format!(
                "{}-{}",
                Self::sanitize_logical(node.name.as_str()),
                Self::entropy(8)
            ),
        };
        validate::validate_bucket_name(&physical)?;

        if !self.taken_bucket_names.lock().insert(physical.clone()) {
            return Err(ProvisionError::BucketNameTaken { bucket: physical });
        }

        let arn_value = format!("arn:aws:s3:::{physical}");
        let endpoint = format!("{physical}.s3-website-{}.amazonaws.com", graph.region());

        bucket.resolve(physical.clone())?;
        arn.resolve(arn_value.clone())?;
        website_endpoint.resolve(endpoint.clone())?;

        info!(bucket = %physical, website = spec.website.is_some(), "bucket created");
        self.record(
            node,
            physical,
            BTreeMap::from([
                ("arn".to_owned(), arn_value),
                ("websiteEndpoint".to_owned(), endpoint),
            ]),
        );
        Ok(())
    }

    fn apply_object(
        &self,
        node: &ResourceNode,
        spec: &BucketObjectSpec,
        etag: &Output<String>,
    ) -> Result<(), ProvisionError> {
        let bucket_name = spec
            .bucket
            .get()
            .ok_or_else(|| unresolved(node, "bucket"))?;

        let media_type: mime::Mime =
            spec.content_type
                .parse()
                .map_err(|_| ProvisionError::InvalidContentType {
                    resource: node.name.to_string(),
                    content_type: spec.content_type.clone(),
                })?;

        let body =
            std::fs::read(spec.source.path()).map_err(|source| ProvisionError::MissingSourceFile {
                resource: node.name.to_string(),
                path: spec.source.path().to_path_buf(),
                source,
            })?;

        let etag_value = hex::encode(Md5::digest(&body));
        etag.resolve(etag_value.clone())?;

        debug!(
            bucket = %bucket_name,
            key = %node.name,
            size = body.len(),
            "object uploaded"
        );
        self.record(
            node,
            format!("{bucket_name}/{}", node.name),
            BTreeMap::from([
                ("bucket".to_owned(), bucket_name),
                ("contentType".to_owned(), media_type.to_string()),
                ("etag".to_owned(), etag_value),
                ("size".to_owned(), body.len().to_string()),
            ]),
        );
        Ok(())
    }

    fn apply_policy(
        &self,
        node: &ResourceNode,
        spec: &BucketPolicySpec,
    ) -> Result<(), ProvisionError> {
        let bucket_name = spec
            .bucket
            .get()
            .ok_or_else(|| unresolved(node, "bucket"))?;
        let policy_text = spec
            .policy
            .get()
            .ok_or_else(|| unresolved(node, "policy"))?;

        PolicyDocument::parse(&policy_text).map_err(|source| {
            ProvisionError::InvalidPolicyDocument {
                resource: node.name.to_string(),
                source,
            }
        })?;

        info!(bucket = %bucket_name, "bucket policy attached");
        self.record(
            node,
            bucket_name.clone(),
            BTreeMap::from([
                ("bucket".to_owned(), bucket_name),
                ("policy".to_owned(), policy_text),
            ]),
        );
        Ok(())
    }

    fn apply_distribution(
        &self,
        node: &ResourceNode,
        spec: &DistributionSpec,
        domain_name: &Output<String>,
    ) -> Result<(), ProvisionError> {
        let mut origin_domains = Vec::with_capacity(spec.origins.len());
        for (index, origin) in spec.origins.iter().enumerate() {
            let domain = origin
                .domain_name
                .get()
                .ok_or_else(|| unresolved(node, &format!("origins[{index}].domainName")))?;
            origin_domains.push(domain);
        }

        let domain = format!("{}.cloudfront.net", Self::entropy(14));
        domain_name.resolve(domain.clone())?;

        info!(
            distribution = %domain,
            origins = origin_domains.len(),
            "distribution created"
        );
        self.record(
            node,
            domain.clone(),
            BTreeMap::from([
                ("domainName".to_owned(), domain),
                ("origins".to_owned(), origin_domains.join(",")),
                (
                    "defaultRootObject".to_owned(),
                    spec.default_root_object.clone(),
                ),
            ]),
        );
        Ok(())
    }
}

impl ProvisioningEngine for SimulatedEngine {
    fn apply(&self, graph: &StackGraph) -> Result<ResolvedOutputs, ProvisionError> {
        validate::validate_graph(graph)?;
        let order = graph.deployment_order()?;

        info!(
            stack = graph.name(),
            resources = order.len(),
            "applying stack"
        );
        for node in order {
            self.apply_node(graph, node)?;
        }

        let mut values = BTreeMap::new();
        for export in graph.exports() {
            let value = export
                .value
                .get()
                .ok_or_else(|| ProvisionError::UnresolvedExport {
                    name: export.name.clone(),
                })?;
            values.insert(export.name.clone(), value);
        }

        info!(stack = graph.name(), outputs = values.len(), "stack applied");
        Ok(ResolvedOutputs::new(values))
    }
}

fn unresolved(node: &ResourceNode, attribute: &str) -> ProvisionError {
    ProvisionError::UnresolvedReference {
        resource: node.name.to_string(),
        attribute: attribute.to_owned(),
    }
}
