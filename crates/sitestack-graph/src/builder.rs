//! Single-pass construction of desired-state graphs.

use sitestack_core::{AwsRegion, LogicalName, Output, ResourceId};
use sitestack_model::{
    BucketObjectSpec, BucketPolicySpec, BucketSpec, DistributionSpec, FileAsset,
};
use tracing::{debug, info};

use crate::graph::{StackExport, StackGraph};
use crate::node::{ResourceNode, ResourceOutputs, ResourceSpec};

/// Handle to a declared bucket, carrying its deferred generated attributes.
#[derive(Debug, Clone)]
pub struct BucketHandle {
    /// Id of the bucket node.
    pub id: ResourceId,
    /// Generated bucket name.
    pub bucket: Output<String>,
    /// Generated bucket ARN.
    pub arn: Output<String>,
    /// Generated website endpoint.
    pub website_endpoint: Output<String>,
}

/// Handle to a declared bucket object.
#[derive(Debug, Clone)]
pub struct ObjectHandle {
    /// Id of the object node.
    pub id: ResourceId,
    /// Entity tag of the uploaded body.
    pub etag: Output<String>,
}

/// Handle to a declared bucket policy.
#[derive(Debug, Clone, Copy)]
pub struct PolicyHandle {
    /// Id of the policy node.
    pub id: ResourceId,
}

/// Handle to a declared distribution.
#[derive(Debug, Clone)]
pub struct DistributionHandle {
    /// Id of the distribution node.
    pub id: ResourceId,
    /// Generated distribution domain name.
    pub domain_name: Output<String>,
}

/// Builds a [`StackGraph`] in one linear pass.
///
/// Declarations never fail at this layer; malformed configuration is the
/// provisioning engine's to reject at plan time. Dependency edges are
/// derived from the deferred attributes a description references, so sibling
/// declarations stay independent of each other.
#[derive(Debug)]
pub struct StackBuilder {
    stack_name: String,
    region: AwsRegion,
    nodes: Vec<ResourceNode>,
    exports: Vec<StackExport>,
}

impl StackBuilder {
    /// Start a new graph for the named stack.
    #[must_use]
    pub fn new(stack_name: impl Into<String>, region: AwsRegion) -> Self {
        Self {
            stack_name: stack_name.into(),
            region,
            nodes: Vec::new(),
            exports: Vec::new(),
        }
    }

    fn next_id(&self) -> ResourceId {
        ResourceId::new(self.nodes.len())
    }

    fn push(&mut self, node: ResourceNode) {
        debug!(
            resource = %node.name,
            kind = %node.spec.kind(),
            dependencies = node.depends_on.len(),
            "resource declared"
        );
        self.nodes.push(node);
    }

    /// Declare a storage bucket.
    ///
    /// The handle carries the bucket's generated name, ARN, and website
    /// endpoint as deferred values.
    pub fn declare_bucket(&mut self, name: &str, spec: BucketSpec) -> BucketHandle {
        let id = self.next_id();
        let bucket = Output::pending_from([id]).with_label(format!("{name}.bucket"));
        let arn = Output::pending_from([id]).with_label(format!("{name}.arn"));
        let website_endpoint =
            Output::pending_from([id]).with_label(format!("{name}.websiteEndpoint"));

        let spec = ResourceSpec::Bucket(spec);
        let depends_on = spec.dependencies();
        self.push(ResourceNode {
            id,
            name: LogicalName::new(name),
            spec,
            depends_on,
            outputs: ResourceOutputs::Bucket {
                bucket: bucket.clone(),
                arn: arn.clone(),
                website_endpoint: website_endpoint.clone(),
            },
        });

        BucketHandle {
            id,
            bucket,
            arn,
            website_endpoint,
        }
    }

    /// Declare an object uploaded into `bucket` from a local file.
    ///
    /// The source path is recorded as-is; whether it names a readable file
    /// is checked by the engine at apply time, not here.
    pub fn declare_bucket_object(
        &mut self,
        name: &str,
        bucket: &BucketHandle,
        source: FileAsset,
        content_type: impl Into<String>,
    ) -> ObjectHandle {
        let id = self.next_id();
        let etag = Output::pending_from([id]).with_label(format!("{name}.etag"));

        let spec = ResourceSpec::BucketObject(BucketObjectSpec::new(
            bucket.bucket.clone(),
            source,
            content_type,
        ));
        let depends_on = spec.dependencies();
        self.push(ResourceNode {
            id,
            name: LogicalName::new(name),
            spec,
            depends_on,
            outputs: ResourceOutputs::BucketObject { etag: etag.clone() },
        });

        ObjectHandle { id, etag }
    }

    /// Declare a policy attached to `bucket`.
    ///
    /// `policy_fn` receives the bucket's *generated* name and must render
    /// the policy document; it is chained onto the deferred name and runs
    /// only once the engine resolves it, never eagerly.
    pub fn declare_bucket_policy<F>(
        &mut self,
        name: &str,
        bucket: &BucketHandle,
        policy_fn: F,
    ) -> PolicyHandle
    where
        F: FnOnce(&str) -> String + Send + 'static,
    {
        let id = self.next_id();
        let policy = bucket
            .bucket
            .map(move |bucket_name| policy_fn(bucket_name))
            .with_label(format!("{name}.policy"));

        let spec =
            ResourceSpec::BucketPolicy(BucketPolicySpec::new(bucket.bucket.clone(), policy));
        let depends_on = spec.dependencies();
        self.push(ResourceNode {
            id,
            name: LogicalName::new(name),
            spec,
            depends_on,
            outputs: ResourceOutputs::BucketPolicy,
        });

        PolicyHandle { id }
    }

    /// Declare a content-delivery distribution.
    ///
    /// Dependency edges are derived from the deferred attributes referenced
    /// by the description's origins and cache behavior.
    pub fn declare_distribution(
        &mut self,
        name: &str,
        spec: DistributionSpec,
    ) -> DistributionHandle {
        let id = self.next_id();
        let domain_name = Output::pending_from([id]).with_label(format!("{name}.domainName"));

        let spec = ResourceSpec::Distribution(spec);
        let depends_on = spec.dependencies();
        self.push(ResourceNode {
            id,
            name: LogicalName::new(name),
            spec,
            depends_on,
            outputs: ResourceOutputs::Distribution {
                domain_name: domain_name.clone(),
            },
        });

        DistributionHandle { id, domain_name }
    }

    /// Record a named output, visible to downstream consumers once the
    /// apply step resolves it.
    pub fn export(&mut self, name: &str, value: Output<String>) {
        debug!(export = name, "output exported");
        self.exports.push(StackExport {
            name: name.to_owned(),
            value,
        });
    }

    /// Finish the pass and hand over the graph.
    #[must_use]
    pub fn build(self) -> StackGraph {
        info!(
            stack = %self.stack_name,
            resources = self.nodes.len(),
            exports = self.exports.len(),
            "stack graph built"
        );
        StackGraph {
            name: self.stack_name,
            region: self.region,
            nodes: self.nodes,
            exports: self.exports,
        }
    }
}

#[cfg(test)]
mod tests {
    use sitestack_model::{CacheBehavior, OriginSpec};

    use super::*;
    use crate::node::ResourceKind;

    fn builder() -> StackBuilder {
        StackBuilder::new("test-stack", AwsRegion::default())
    }

    fn declare_website_distribution(
        stack: &mut StackBuilder,
        bucket: &BucketHandle,
    ) -> DistributionHandle {
        stack.declare_distribution(
            "cdn",
            DistributionSpec::builder()
                .origins(vec![OriginSpec::bucket_website(
                    bucket.arn.clone(),
                    bucket.website_endpoint.clone(),
                )])
                .default_cache_behavior(
                    CacheBehavior::builder()
                        .target_origin_id(bucket.arn.clone())
                        .build(),
                )
                .build(),
        )
    }

    #[test]
    fn test_should_wire_object_to_bucket() {
        let mut stack = builder();
        let bucket = stack.declare_bucket("siteBucket", BucketSpec::default());
        let object = stack.declare_bucket_object(
            "index.html",
            &bucket,
            FileAsset::new("./www/index.html"),
            "text/html",
        );

        let graph = stack.build();
        let node = graph.get(object.id).expect("object node");
        assert_eq!(node.depends_on, vec![bucket.id]);
        assert_eq!(node.spec.kind(), ResourceKind::BucketObject);
    }

    #[test]
    fn test_should_chain_policy_after_bucket_name() {
        let mut stack = builder();
        let bucket = stack.declare_bucket("siteBucket", BucketSpec::default());
        let policy = stack.declare_bucket_policy("bucketPolicy", &bucket, |name| {
            format!("policy for {name}")
        });

        let graph = stack.build();
        let node = graph.get(policy.id).expect("policy node");
        assert_eq!(node.depends_on, vec![bucket.id]);

        // The policy function must not run until the bucket name resolves.
        let ResourceSpec::BucketPolicy(spec) = &node.spec else {
            panic!("expected a bucket policy spec");
        };
        assert_eq!(spec.policy.get(), None);
        bucket.bucket.resolve("my-site-bucket".to_owned()).unwrap();
        assert_eq!(
            spec.policy.get(),
            Some("policy for my-site-bucket".to_owned())
        );
    }

    #[test]
    fn test_should_derive_distribution_edges_from_attribute_references() {
        let mut stack = builder();
        let bucket = stack.declare_bucket("siteBucket", BucketSpec::default());
        let cdn = declare_website_distribution(&mut stack, &bucket);

        let graph = stack.build();
        let node = graph.get(cdn.id).expect("distribution node");
        assert_eq!(node.depends_on, vec![bucket.id]);
    }

    #[test]
    fn test_should_keep_sibling_declarations_independent() {
        // Declare the full stack, then the same stack without the objects;
        // policy and distribution nodes must come out identical in shape.
        let mut with_objects = builder();
        let bucket = with_objects.declare_bucket("siteBucket", BucketSpec::default());
        with_objects.declare_bucket_object(
            "index.html",
            &bucket,
            FileAsset::new("./www/index.html"),
            "text/html",
        );
        with_objects.declare_bucket_object(
            "error.html",
            &bucket,
            FileAsset::new("./www/error.html"),
            "text/html",
        );
        let policy_a = with_objects.declare_bucket_policy("bucketPolicy", &bucket, |name| {
            format!("policy for {name}")
        });
        let cdn_a = declare_website_distribution(&mut with_objects, &bucket);
        let graph_a = with_objects.build();

        let mut without_objects = builder();
        let bucket_b = without_objects.declare_bucket("siteBucket", BucketSpec::default());
        let policy_b = without_objects.declare_bucket_policy("bucketPolicy", &bucket_b, |name| {
            format!("policy for {name}")
        });
        let cdn_b = declare_website_distribution(&mut without_objects, &bucket_b);
        let graph_b = without_objects.build();

        let deps_of = |graph: &StackGraph, id| {
            graph
                .get(id)
                .map(|node| node.depends_on.iter().map(|d| d.index()).collect::<Vec<_>>())
                .expect("node")
        };
        assert_eq!(deps_of(&graph_a, policy_a.id), deps_of(&graph_b, policy_b.id));
        assert_eq!(deps_of(&graph_a, cdn_a.id), deps_of(&graph_b, cdn_b.id));
    }

    #[test]
    fn test_should_record_exports_with_provenance() {
        let mut stack = builder();
        let bucket = stack.declare_bucket("siteBucket", BucketSpec::default());
        let cdn = declare_website_distribution(&mut stack, &bucket);
        stack.export("bucketName", bucket.bucket.clone());
        stack.export("cloudFrontDomainName", cdn.domain_name.clone());

        let graph = stack.build();
        let exports = graph.exports();
        assert_eq!(exports.len(), 2);
        assert_eq!(exports[0].name, "bucketName");
        assert_eq!(exports[0].value.sources(), &[bucket.id]);
        assert_eq!(exports[1].name, "cloudFrontDomainName");
        assert_eq!(exports[1].value.sources(), &[cdn.id]);
    }

    #[test]
    fn test_should_build_acyclic_graph() {
        let mut stack = builder();
        let bucket = stack.declare_bucket("siteBucket", BucketSpec::default());
        stack.declare_bucket_object(
            "index.html",
            &bucket,
            FileAsset::new("./www/index.html"),
            "text/html",
        );
        declare_website_distribution(&mut stack, &bucket);

        let graph = stack.build();
        let order = graph.deployment_order().expect("builder graphs are acyclic");
        assert_eq!(order[0].id, bucket.id);
    }
}
