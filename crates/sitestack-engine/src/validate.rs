//! Plan-time validation of desired-state graphs.
//!
//! Graph construction never validates; everything here runs when an engine
//! receives the graph, before any resource is applied. Besides the local
//! checks (logical-name uniqueness, TTL ordering, bucket naming rules) this
//! enforces the website-origin coupling invariant: a distribution that
//! fronts a bucket's website endpoint without an origin access identity only
//! works if the bucket serves a website and a policy makes it publicly
//! readable, so a graph that declares one without the others is rejected.

use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::str::FromStr;

use sitestack_core::ResourceId;
use sitestack_graph::{ResourceNode, ResourceSpec, StackGraph};
use sitestack_model::DistributionSpec;
use tracing::debug;

use crate::error::ProvisionError;

/// Minimum bucket name length.
const MIN_BUCKET_NAME_LEN: usize = 3;

/// Maximum bucket name length.
const MAX_BUCKET_NAME_LEN: usize = 63;

/// Validate a whole graph at plan time.
///
/// # Errors
///
/// Returns the first configuration error found; see [`ProvisionError`] for
/// the individual checks.
pub fn validate_graph(graph: &StackGraph) -> Result<(), ProvisionError> {
    let mut seen = HashSet::new();
    for node in graph.nodes() {
        if !seen.insert(node.name.as_str()) {
            return Err(ProvisionError::DuplicateLogicalName {
                name: node.name.to_string(),
            });
        }
    }

    for node in graph.nodes() {
        match &node.spec {
            ResourceSpec::Bucket(spec) => {
                if let Some(name) = &spec.bucket_name {
                    validate_bucket_name(name)?;
                }
            }
            ResourceSpec::Distribution(spec) => validate_distribution(graph, node, spec)?,
            ResourceSpec::BucketObject(_) | ResourceSpec::BucketPolicy(_) => {}
        }
    }

    debug!(resources = graph.nodes().len(), "graph validated");
    Ok(())
}

/// Validate a bucket name against the provider naming rules.
///
/// Rules:
/// - 3-63 characters long
/// - Only lowercase letters, numbers, hyphens, and dots
/// - Must start and end with a letter or number
/// - No consecutive dots (`..`)
/// - Not formatted as an IPv4 address (e.g. `192.168.0.1`)
/// - Must not start with `xn--` or `sthree-`
/// - Must not end with `-s3alias`
///
/// # Errors
///
/// Returns [`ProvisionError::InvalidBucketName`] naming the violated rule.
pub fn validate_bucket_name(name: &str) -> Result<(), ProvisionError> {
    let invalid = |reason: &str| ProvisionError::InvalidBucketName {
        bucket: name.to_owned(),
        reason: reason.to_owned(),
    };

    if name.len() < MIN_BUCKET_NAME_LEN || name.len() > MAX_BUCKET_NAME_LEN {
        return Err(invalid("must be 3-63 characters long"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(invalid(
            "only lowercase letters, numbers, hyphens, and dots are allowed",
        ));
    }
    let starts_ok = name.starts_with(|c: char| c.is_ascii_lowercase() || c.is_ascii_digit());
    let ends_ok = name.ends_with(|c: char| c.is_ascii_lowercase() || c.is_ascii_digit());
    if !starts_ok || !ends_ok {
        return Err(invalid("must start and end with a letter or number"));
    }
    if name.contains("..") {
        return Err(invalid("must not contain consecutive dots"));
    }
    if Ipv4Addr::from_str(name).is_ok() {
        return Err(invalid("must not be formatted as an IP address"));
    }
    if name.starts_with("xn--") || name.starts_with("sthree-") {
        return Err(invalid("uses a reserved prefix"));
    }
    if name.ends_with("-s3alias") {
        return Err(invalid("uses a reserved suffix"));
    }
    Ok(())
}

fn validate_distribution(
    graph: &StackGraph,
    node: &ResourceNode,
    spec: &DistributionSpec,
) -> Result<(), ProvisionError> {
    let behavior = &spec.default_cache_behavior;
    if behavior.min_ttl > behavior.default_ttl || behavior.default_ttl > behavior.max_ttl {
        return Err(ProvisionError::InvalidCacheTtl {
            min_ttl: behavior.min_ttl,
            default_ttl: behavior.default_ttl,
            max_ttl: behavior.max_ttl,
        });
    }

    for origin in &spec.origins {
        let Some(config) = &origin.s3_origin_config else {
            continue;
        };
        if !config.is_website_origin() {
            continue;
        }

        // A website-endpoint origin relies on the bucket itself being
        // publicly readable: the bucket must serve a website and the graph
        // must carry a policy for it.
        for &source in origin.domain_name.sources() {
            let Some(bucket_node) = graph.get(source) else {
                continue;
            };
            let ResourceSpec::Bucket(bucket_spec) = &bucket_node.spec else {
                continue;
            };
            if bucket_spec.website.is_none() {
                return Err(ProvisionError::MissingWebsiteConfig {
                    distribution: node.name.to_string(),
                    bucket: bucket_node.name.to_string(),
                });
            }
            if !has_policy_for(graph, source) {
                return Err(ProvisionError::WebsiteOriginWithoutPolicy {
                    distribution: node.name.to_string(),
                    bucket: bucket_node.name.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn has_policy_for(graph: &StackGraph, bucket: ResourceId) -> bool {
    graph.nodes().iter().any(|node| match &node.spec {
        ResourceSpec::BucketPolicy(spec) => spec.bucket.sources().contains(&bucket),
        _ => false,
    })
}
