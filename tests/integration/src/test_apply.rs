//! Apply tests: the website stack driven through the simulated engine.

#[cfg(test)]
mod tests {
    use sitestack::stack::build_site_stack;
    use sitestack_engine::{
        ProvisionError, ProvisionErrorKind, ProvisioningEngine, SimulatedEngine,
    };
    use sitestack_graph::ResourceKind;

    use crate::{site_config, write_site_files};

    #[test]
    fn test_should_apply_website_stack_end_to_end() {
        let www = tempfile::tempdir().expect("tempdir");
        write_site_files(www.path());

        let graph = build_site_stack(&site_config(www.path()));
        let engine = SimulatedEngine::new();
        let outputs = engine.apply(&graph).expect("apply succeeds");

        assert_eq!(outputs.len(), 2);
        let bucket_name = outputs.get("bucketName").expect("bucketName exported");
        let domain = outputs
            .get("cloudFrontDomainName")
            .expect("cloudFrontDomainName exported");
        assert!(bucket_name.starts_with("sitebucket-"));
        assert!(domain.ends_with(".cloudfront.net"));
    }

    #[test]
    fn test_should_attach_policy_to_generated_bucket_name() {
        let www = tempfile::tempdir().expect("tempdir");
        write_site_files(www.path());

        let graph = build_site_stack(&site_config(www.path()));
        let engine = SimulatedEngine::new();
        let outputs = engine.apply(&graph).expect("apply succeeds");
        let bucket_name = outputs.get("bucketName").expect("bucketName exported");

        let snapshot = engine.snapshot();
        let policy = snapshot.find("bucketPolicy").expect("policy record");
        let document: serde_json::Value =
            serde_json::from_str(&policy.attributes["policy"]).expect("valid policy JSON");
        assert_eq!(
            document["Statement"][0]["Resource"],
            serde_json::json!([format!("arn:aws:s3:::{bucket_name}/*")])
        );
    }

    #[test]
    fn test_should_record_all_five_resources_in_apply_order() {
        let www = tempfile::tempdir().expect("tempdir");
        write_site_files(www.path());

        let graph = build_site_stack(&site_config(www.path()));
        let engine = SimulatedEngine::new();
        engine.apply(&graph).expect("apply succeeds");

        let snapshot = engine.snapshot();
        let kinds: Vec<ResourceKind> = snapshot
            .resources()
            .iter()
            .map(|record| record.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                ResourceKind::Bucket,
                ResourceKind::BucketObject,
                ResourceKind::BucketObject,
                ResourceKind::BucketPolicy,
                ResourceKind::Distribution,
            ]
        );

        let index = snapshot.find("index.html").expect("index record");
        assert_eq!(index.attributes["contentType"], "text/html");
    }

    #[test]
    fn test_should_report_missing_website_file_as_precondition() {
        let www = tempfile::tempdir().expect("tempdir");
        // No files written: the graph builds, the apply fails.
        let graph = build_site_stack(&site_config(www.path()));

        let engine = SimulatedEngine::new();
        let err = engine.apply(&graph).expect_err("apply must fail");
        assert_eq!(err.kind(), ProvisionErrorKind::Precondition);
        assert!(matches!(err, ProvisionError::MissingSourceFile { .. }));

        // The bucket was applied before the upload failed.
        assert!(engine.snapshot().find("siteBucket").is_some());
        assert!(engine.snapshot().find("cdn").is_none());
    }

    #[test]
    fn test_should_apply_distribution_after_both_uploads_removed() {
        // Sibling independence: a stack without the uploads still applies
        // its policy and distribution the same way.
        use sitestack_core::AwsRegion;
        use sitestack_graph::StackBuilder;
        use sitestack_model::{
            BucketSpec, CacheBehavior, CustomErrorResponse, DistributionSpec, OriginSpec,
        };

        let mut stack = StackBuilder::new("static-website", AwsRegion::default());
        let bucket =
            stack.declare_bucket("siteBucket", BucketSpec::website("index.html", "error.html"));
        stack.declare_bucket_policy(
            "bucketPolicy",
            &bucket,
            sitestack::stack::public_read_policy_for_bucket,
        );
        let cdn = stack.declare_distribution(
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
                .custom_error_responses(vec![CustomErrorResponse::page_for(404, "/error.html")])
                .build(),
        );
        stack.export("bucketName", bucket.bucket.clone());
        stack.export("cloudFrontDomainName", cdn.domain_name.clone());
        let graph = stack.build();

        let engine = SimulatedEngine::new();
        let outputs = engine.apply(&graph).expect("apply succeeds");
        assert!(outputs.get("bucketName").is_some());
        assert!(outputs.get("cloudFrontDomainName").is_some());
        assert_eq!(engine.snapshot().len(), 3);
    }
}
