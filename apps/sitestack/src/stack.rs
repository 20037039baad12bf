//! Desired-state declaration of the static website.
//!
//! One bucket serving `index.html`/`error.html`, the two uploads backing
//! them, a public-read policy chained onto the bucket's generated name, and
//! a distribution fronting the bucket's website endpoint. Two outputs are
//! exported for downstream tooling: the bucket name and the distribution
//! domain.

use std::path::Path;

use sitestack_core::StackConfig;
use sitestack_graph::{StackBuilder, StackGraph};
use sitestack_model::{
    BucketSpec, CacheBehavior, CustomErrorResponse, DistributionSpec, FileAsset, OriginSpec,
    PolicyDocument,
};

/// Render the policy document granting public read access to every object
/// under `bucket_name`.
///
/// Pure and total: the same name always yields the same document string.
#[must_use]
pub fn public_read_policy_for_bucket(bucket_name: &str) -> String {
    PolicyDocument::public_read(bucket_name).to_string()
}

/// Build the desired-state graph for the static website.
///
/// Construction always succeeds; the website files under
/// [`StackConfig::www_dir`] do not need to exist until the apply step reads
/// them.
#[must_use]
pub fn build_site_stack(config: &StackConfig) -> StackGraph {
    let www = Path::new(&config.www_dir);
    let mut stack = StackBuilder::new(&config.stack_name, config.default_region.clone());

    // The bucket that stores the static website files.
    let site_bucket =
        stack.declare_bucket("siteBucket", BucketSpec::website("index.html", "error.html"));

    // Upload the static website files to the bucket.
    stack.declare_bucket_object(
        "index.html",
        &site_bucket,
        FileAsset::new(www.join("index.html")),
        "text/html",
    );
    stack.declare_bucket_object(
        "error.html",
        &site_bucket,
        FileAsset::new(www.join("error.html")),
        "text/html",
    );

    // Make the objects publicly readable; the document is rendered once the
    // generated bucket name resolves.
    stack.declare_bucket_policy("bucketPolicy", &site_bucket, public_read_policy_for_bucket);

    // Front the bucket's website endpoint with a distribution.
    let cdn = stack.declare_distribution(
        "cdn",
        DistributionSpec::builder()
            .origins(vec![OriginSpec::bucket_website(
                site_bucket.arn.clone(),
                site_bucket.website_endpoint.clone(),
            )])
            .default_cache_behavior(
                CacheBehavior::builder()
                    .target_origin_id(site_bucket.arn.clone())
                    .build(),
            )
            .custom_error_responses(vec![CustomErrorResponse::page_for(404, "/error.html")])
            .build(),
    );

    stack.export("bucketName", site_bucket.bucket.clone());
    stack.export("cloudFrontDomainName", cdn.domain_name.clone());

    stack.build()
}
