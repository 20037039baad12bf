//! Plan rendering: the desired-state document handed to an engine.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::GraphError;
use crate::graph::StackGraph;
use crate::node::ResourceKind;

/// One resource entry of a plan document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResource {
    /// Logical name of the declaration.
    pub name: String,
    /// Resource type token.
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    /// Logical names of the resources this one depends on.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    /// The declared properties. Deferred attributes that are still pending
    /// render as reference tokens (`"${siteBucket.bucket}"`).
    pub properties: serde_json::Value,
}

/// The rendered desired-state document for a stack.
///
/// This is the contract with the external reconciliation engine: every
/// declared resource and edge appears here, and every deferred attribute is
/// either inlined (resolved) or rendered as a reference token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDocument {
    /// Stack name.
    pub stack: String,
    /// Target region.
    pub region: String,
    /// Resources in declaration order.
    pub resources: Vec<PlanResource>,
    /// Named exports.
    pub outputs: BTreeMap<String, serde_json::Value>,
}

impl StackGraph {
    /// Render the graph as a plan document.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Render`] if a resource description cannot be
    /// serialized.
    pub fn to_plan(&self) -> Result<PlanDocument, GraphError> {
        let mut resources = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let depends_on = node
                .depends_on
                .iter()
                .filter_map(|id| self.get(*id).map(|dep| dep.name.to_string()))
                .collect();
            resources.push(PlanResource {
                name: node.name.to_string(),
                kind: node.spec.kind(),
                depends_on,
                properties: serde_json::to_value(&node.spec)?,
            });
        }

        let mut outputs = BTreeMap::new();
        for export in &self.exports {
            outputs.insert(export.name.clone(), serde_json::to_value(&export.value)?);
        }

        Ok(PlanDocument {
            stack: self.name.clone(),
            region: self.region.to_string(),
            resources,
            outputs,
        })
    }
}

#[cfg(test)]
mod tests {
    use sitestack_core::AwsRegion;
    use sitestack_model::{BucketSpec, FileAsset};

    use super::*;
    use crate::builder::StackBuilder;

    #[test]
    fn test_should_render_plan_with_reference_tokens() {
        let mut stack = StackBuilder::new("static-website", AwsRegion::default());
        let bucket = stack.declare_bucket("siteBucket", BucketSpec::website("index.html", "error.html"));
        stack.declare_bucket_object(
            "index.html",
            &bucket,
            FileAsset::new("./www/index.html"),
            "text/html",
        );
        stack.export("bucketName", bucket.bucket.clone());
        let graph = stack.build();

        let plan = graph.to_plan().expect("render plan");
        assert_eq!(plan.stack, "static-website");
        assert_eq!(plan.region, "us-east-1");
        assert_eq!(plan.resources.len(), 2);

        assert_eq!(plan.resources[0].name, "siteBucket");
        assert_eq!(plan.resources[0].kind, ResourceKind::Bucket);
        assert!(plan.resources[0].depends_on.is_empty());

        assert_eq!(plan.resources[1].name, "index.html");
        assert_eq!(plan.resources[1].depends_on, vec!["siteBucket".to_owned()]);
        assert_eq!(
            plan.resources[1].properties["bucket"],
            "${siteBucket.bucket}"
        );

        assert_eq!(plan.outputs["bucketName"], "${siteBucket.bucket}");
    }

    #[test]
    fn test_should_inline_resolved_attributes() {
        let mut stack = StackBuilder::new("static-website", AwsRegion::default());
        let bucket = stack.declare_bucket("siteBucket", BucketSpec::default());
        stack.export("bucketName", bucket.bucket.clone());
        let graph = stack.build();

        bucket
            .bucket
            .resolve("my-site-bucket".to_owned())
            .expect("first resolution");

        let plan = graph.to_plan().expect("render plan");
        assert_eq!(plan.outputs["bucketName"], "my-site-bucket");
    }

    #[test]
    fn test_should_serialize_plan_document_as_camel_case() {
        let mut stack = StackBuilder::new("static-website", AwsRegion::default());
        let bucket = stack.declare_bucket("siteBucket", BucketSpec::default());
        stack.declare_bucket_object(
            "index.html",
            &bucket,
            FileAsset::new("./www/index.html"),
            "text/html",
        );
        let graph = stack.build();

        let json = serde_json::to_value(graph.to_plan().expect("render plan"))
            .expect("test serialization");
        assert_eq!(json["resources"][1]["type"], "aws:s3:BucketObject");
        assert_eq!(
            json["resources"][1]["dependsOn"],
            serde_json::json!(["siteBucket"])
        );
        assert_eq!(json["resources"][1]["properties"]["contentType"], "text/html");
    }
}
