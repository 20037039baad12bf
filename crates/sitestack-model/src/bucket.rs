//! Storage bucket and object upload descriptions.

use std::path::{Path, PathBuf};

use serde::Serialize;
use sitestack_core::Output;

/// Website-serving configuration for a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteConfig {
    /// Document served for the root and directory requests.
    pub index_document: String,
    /// Document served when a requested key does not exist.
    pub error_document: String,
}

impl WebsiteConfig {
    /// Create a website configuration from the two document names.
    #[must_use]
    pub fn new(index_document: impl Into<String>, error_document: impl Into<String>) -> Self {
        Self {
            index_document: index_document.into(),
            error_document: error_document.into(),
        }
    }
}

/// Description of a storage bucket.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketSpec {
    /// Explicit physical bucket name. When `None`, the provisioning engine
    /// generates one from the logical name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,
    /// Website-serving configuration. A distribution fronting the bucket's
    /// website endpoint requires this to be set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<WebsiteConfig>,
}

impl BucketSpec {
    /// Description of a website-serving bucket with the given index and
    /// error documents.
    #[must_use]
    pub fn website(index_document: impl Into<String>, error_document: impl Into<String>) -> Self {
        Self {
            bucket_name: None,
            website: Some(WebsiteConfig::new(index_document, error_document)),
        }
    }
}

/// A local file used as an upload source.
///
/// The path is recorded as-is at build time; whether it exists is checked by
/// the provisioning engine when the upload is applied, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FileAsset {
    path: PathBuf,
}

impl FileAsset {
    /// Reference a local file by path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The recorded path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Description of an object uploaded into a bucket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketObjectSpec {
    /// Generated name of the owning bucket.
    pub bucket: Output<String>,
    /// Local file the object body is read from at apply time.
    pub source: FileAsset,
    /// Content type the object is served with.
    pub content_type: String,
}

impl BucketObjectSpec {
    /// Describe an upload of `source` into the bucket named by `bucket`.
    #[must_use]
    pub fn new(bucket: Output<String>, source: FileAsset, content_type: impl Into<String>) -> Self {
        Self {
            bucket,
            source,
            content_type: content_type.into(),
        }
    }
}
