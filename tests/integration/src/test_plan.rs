//! Plan-document tests for the website stack.

#[cfg(test)]
mod tests {
    use sitestack::stack::build_site_stack;

    use crate::site_config;

    #[test]
    fn test_should_render_plan_before_any_apply() {
        let www = tempfile::tempdir().expect("tempdir");
        let graph = build_site_stack(&site_config(www.path()));

        let plan = graph.to_plan().expect("render plan");
        let json = serde_json::to_value(&plan).expect("serialize plan");

        assert_eq!(json["stack"], "static-website");
        assert_eq!(json["region"], "us-east-1");

        let resources = json["resources"].as_array().expect("resources array");
        assert_eq!(resources.len(), 5);

        let names: Vec<&str> = resources
            .iter()
            .filter_map(|r| r["name"].as_str())
            .collect();
        assert_eq!(
            names,
            vec!["siteBucket", "index.html", "error.html", "bucketPolicy", "cdn"]
        );

        // Nothing is resolved yet: deferred attributes render as tokens.
        assert_eq!(json["outputs"]["bucketName"], "${siteBucket.bucket}");
        assert_eq!(json["outputs"]["cloudFrontDomainName"], "${cdn.domainName}");
    }

    #[test]
    fn test_should_render_website_origin_in_plan() {
        let www = tempfile::tempdir().expect("tempdir");
        let graph = build_site_stack(&site_config(www.path()));
        let json =
            serde_json::to_value(graph.to_plan().expect("render plan")).expect("serialize plan");

        let cdn = &json["resources"][4];
        assert_eq!(cdn["type"], "aws:cloudfront:Distribution");
        assert_eq!(cdn["dependsOn"], serde_json::json!(["siteBucket"]));

        let properties = &cdn["properties"];
        assert_eq!(properties["enabled"], true);
        assert_eq!(properties["isIpv6Enabled"], true);
        assert_eq!(properties["defaultRootObject"], "index.html");
        assert_eq!(properties["priceClass"], "PriceClass_100");
        assert_eq!(
            properties["origins"][0]["domainName"],
            "${siteBucket.websiteEndpoint}"
        );
        assert_eq!(
            properties["origins"][0]["s3OriginConfig"]["originAccessIdentity"],
            ""
        );
        assert_eq!(
            properties["customErrorResponses"][0],
            serde_json::json!({
                "errorCode": 404,
                "responseCode": 404,
                "responsePagePath": "/error.html"
            })
        );
    }

    #[test]
    fn test_should_build_graph_when_website_files_are_absent() {
        // The directory exists but holds no files; build and plan must both
        // succeed, since file existence is an apply-time concern.
        let www = tempfile::tempdir().expect("tempdir");
        let graph = build_site_stack(&site_config(www.path()));

        assert_eq!(graph.nodes().len(), 5);
        assert!(graph.to_plan().is_ok());
    }
}
