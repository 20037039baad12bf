//! Content-delivery distribution descriptions.
//!
//! Mirrors the provider's distribution configuration shape: origins, one
//! default cache behavior, custom error responses, geo restrictions, and the
//! viewer certificate. Enum values serialize to the provider's wire strings.

use serde::Serialize;
use sitestack_core::{Output, ResourceId};
use typed_builder::TypedBuilder;

/// HTTP methods a cache behavior accepts or caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET requests.
    Get,
    /// HEAD requests.
    Head,
    /// OPTIONS requests.
    Options,
}

/// How viewers reaching the distribution over plain HTTP are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewerProtocolPolicy {
    /// Serve both HTTP and HTTPS.
    AllowAll,
    /// Reject plain HTTP.
    HttpsOnly,
    /// Redirect plain HTTP to HTTPS.
    RedirectToHttps,
}

/// Cookie forwarding mode for an origin request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CookieForward {
    /// Forward no cookies.
    None,
    /// Forward all cookies.
    All,
}

/// Which request values are forwarded to the origin and used as cache keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardedValues {
    /// Cookie forwarding mode.
    pub cookies: CookiePreference,
    /// Whether query strings are forwarded.
    pub query_string: bool,
}

/// Cookie forwarding preference wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CookiePreference {
    /// Forwarding mode.
    pub forward: CookieForward,
}

impl Default for ForwardedValues {
    fn default() -> Self {
        Self {
            cookies: CookiePreference {
                forward: CookieForward::None,
            },
            query_string: false,
        }
    }
}

/// Extra configuration for an origin backed by a storage bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct S3OriginConfig {
    /// Origin access identity. Empty for a website-endpoint origin, where
    /// the bucket itself is publicly readable.
    pub origin_access_identity: String,
}

impl S3OriginConfig {
    /// Configuration for a website-endpoint origin (no access identity).
    #[must_use]
    pub fn website_origin() -> Self {
        Self {
            origin_access_identity: String::new(),
        }
    }

    /// Whether this origin relies on the bucket being publicly readable.
    #[must_use]
    pub fn is_website_origin(&self) -> bool {
        self.origin_access_identity.is_empty()
    }
}

/// An origin the distribution fetches content from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginSpec {
    /// Identifier cache behaviors use to target this origin.
    pub origin_id: Output<String>,
    /// Domain name content is fetched from.
    pub domain_name: Output<String>,
    /// Bucket-origin configuration, when the origin is a storage bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_origin_config: Option<S3OriginConfig>,
}

impl OriginSpec {
    /// Origin fetching from a bucket's website endpoint.
    #[must_use]
    pub fn bucket_website(origin_id: Output<String>, domain_name: Output<String>) -> Self {
        Self {
            origin_id,
            domain_name,
            s3_origin_config: Some(S3OriginConfig::website_origin()),
        }
    }
}

/// The default cache behavior of a distribution.
#[derive(Debug, Clone, Serialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct CacheBehavior {
    /// Origin this behavior routes to.
    pub target_origin_id: Output<String>,

    /// Viewer protocol handling.
    #[builder(default = ViewerProtocolPolicy::RedirectToHttps)]
    pub viewer_protocol_policy: ViewerProtocolPolicy,

    /// Methods the distribution forwards.
    #[builder(default = vec![HttpMethod::Get, HttpMethod::Head, HttpMethod::Options])]
    pub allowed_methods: Vec<HttpMethod>,

    /// Methods whose responses are cached.
    #[builder(default = vec![HttpMethod::Get, HttpMethod::Head])]
    pub cached_methods: Vec<HttpMethod>,

    /// Forwarded request values.
    #[builder(default)]
    pub forwarded_values: ForwardedValues,

    /// Minimum time-to-live, in seconds.
    #[builder(default = 0)]
    pub min_ttl: u64,

    /// Default time-to-live, in seconds.
    #[builder(default = 3600)]
    pub default_ttl: u64,

    /// Maximum time-to-live, in seconds.
    #[builder(default = 86_400)]
    pub max_ttl: u64,
}

/// Mapping of an origin error code to a response page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomErrorResponse {
    /// Error code returned by the origin.
    pub error_code: u16,
    /// Response code the distribution sends to the viewer.
    pub response_code: u16,
    /// Page served in place of the origin error.
    pub response_page_path: String,
}

impl CustomErrorResponse {
    /// Map an origin error code to a response page, keeping the code.
    #[must_use]
    pub fn page_for(error_code: u16, response_page_path: impl Into<String>) -> Self {
        Self {
            error_code,
            response_code: error_code,
            response_page_path: response_page_path.into(),
        }
    }
}

/// Geographic restriction mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RestrictionType {
    /// No geographic restriction.
    #[default]
    None,
    /// Serve only the listed locations.
    Whitelist,
    /// Serve everywhere except the listed locations.
    Blacklist,
}

/// Geographic restriction configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoRestriction {
    /// Restriction mode.
    pub restriction_type: RestrictionType,
}

/// Distribution-wide restrictions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Restrictions {
    /// Geographic restrictions.
    pub geo_restriction: GeoRestriction,
}

/// TLS certificate the distribution presents to viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerCertificate {
    /// Use the provider's default certificate.
    pub cloudfront_default_certificate: bool,
}

impl Default for ViewerCertificate {
    fn default() -> Self {
        Self {
            cloudfront_default_certificate: true,
        }
    }
}

/// Price class controlling which edge locations serve the distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PriceClass {
    /// North America and Europe.
    #[serde(rename = "PriceClass_100")]
    PriceClass100,
    /// North America, Europe, Asia, Middle East, and Africa.
    #[serde(rename = "PriceClass_200")]
    PriceClass200,
    /// All edge locations.
    #[serde(rename = "PriceClass_All")]
    PriceClassAll,
}

/// Description of a content-delivery distribution.
#[derive(Debug, Clone, Serialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSpec {
    /// Origins the distribution fetches from.
    pub origins: Vec<OriginSpec>,

    /// Whether the distribution accepts requests.
    #[builder(default = true)]
    pub enabled: bool,

    /// Whether IPv6 viewers are served.
    #[builder(default = true)]
    pub is_ipv6_enabled: bool,

    /// Object served for requests to the distribution root.
    #[builder(default = String::from("index.html"))]
    pub default_root_object: String,

    /// The single default cache behavior.
    pub default_cache_behavior: CacheBehavior,

    /// Edge-location price class.
    #[builder(default = PriceClass::PriceClass100)]
    pub price_class: PriceClass,

    /// Error-code to response-page mappings.
    #[builder(default)]
    pub custom_error_responses: Vec<CustomErrorResponse>,

    /// Geographic restrictions.
    #[builder(default)]
    pub restrictions: Restrictions,

    /// Viewer-facing certificate.
    #[builder(default)]
    pub viewer_certificate: ViewerCertificate,
}

impl DistributionSpec {
    /// Resources this description references through deferred attributes.
    ///
    /// Sorted and deduplicated; the stack builder turns these into
    /// dependency edges.
    #[must_use]
    pub fn deferred_sources(&self) -> Vec<ResourceId> {
        let mut sources = Vec::new();
        for origin in &self.origins {
            sources.extend_from_slice(origin.origin_id.sources());
            sources.extend_from_slice(origin.domain_name.sources());
        }
        sources.extend_from_slice(self.default_cache_behavior.target_origin_id.sources());
        sources.sort_unstable();
        sources.dedup();
        sources
    }
}
