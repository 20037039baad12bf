//! Typed resource descriptions for SiteStack desired-state graphs.
//!
//! Each type here is a *description* of a resource, evaluated once at
//! graph-build time, never a runtime object. Attributes that are only known
//! after the apply step (generated names, ARNs, endpoints) are held as
//! [`sitestack_core::Output`] references, which is also how dependency edges
//! between descriptions are derived.

mod bucket;
mod distribution;
mod policy;

pub use bucket::{BucketObjectSpec, BucketSpec, FileAsset, WebsiteConfig};
pub use distribution::{
    CacheBehavior, CookieForward, CustomErrorResponse, DistributionSpec, ForwardedValues,
    GeoRestriction, HttpMethod, OriginSpec, PriceClass, RestrictionType, Restrictions,
    S3OriginConfig, ViewerCertificate, ViewerProtocolPolicy,
};
pub use policy::{BucketPolicySpec, Effect, PolicyDocument, PolicyStatement, Principal};
