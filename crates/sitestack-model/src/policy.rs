//! Structured permission-policy documents.
//!
//! The document model serializes with the provider's canonical key casing
//! (`Version`, `Statement`, `Effect`, ...), so a rendered document can be
//! attached to a bucket verbatim and parsed back for validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use sitestack_core::Output;

/// Policy language version understood by the provider.
pub const POLICY_VERSION: &str = "2012-10-17";

/// Whether a statement grants or denies the listed actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Grant the listed actions.
    Allow,
    /// Deny the listed actions.
    Deny,
}

/// The principal a statement applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Principal {
    /// Every principal, authenticated or not.
    #[serde(rename = "*")]
    Any,
    /// A provider service principal.
    Service(String),
    /// An account or role principal.
    #[serde(rename = "AWS")]
    Aws(String),
}

/// A single statement within a policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyStatement {
    /// Grant or deny.
    #[serde(rename = "Effect")]
    pub effect: Effect,
    /// Who the statement applies to.
    #[serde(rename = "Principal")]
    pub principal: Principal,
    /// Actions the statement covers (e.g. `s3:GetObject`).
    #[serde(rename = "Action")]
    pub actions: Vec<String>,
    /// Resource ARNs the statement covers.
    #[serde(rename = "Resource")]
    pub resources: Vec<String>,
}

/// A structured permission-policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDocument {
    /// Policy language version; always [`POLICY_VERSION`].
    #[serde(rename = "Version")]
    pub version: String,
    /// The document's statements.
    #[serde(rename = "Statement")]
    pub statement: Vec<PolicyStatement>,
}

impl PolicyDocument {
    /// Document granting read-only, unconditional, public access to every
    /// object under `bucket_name`.
    ///
    /// Pure and total: the same bucket name always yields the same document.
    #[must_use]
    pub fn public_read(bucket_name: &str) -> Self {
        Self {
            version: POLICY_VERSION.to_owned(),
            statement: vec![PolicyStatement {
                effect: Effect::Allow,
                principal: Principal::Any,
                actions: vec!["s3:GetObject".to_owned()],
                resources: vec![format!("arn:aws:s3:::{bucket_name}/*")],
            }],
        }
    }

    /// Parse a rendered document back into its structured form.
    ///
    /// # Errors
    ///
    /// Returns the underlying JSON error when the text is not a
    /// syntactically valid policy document.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Renders the document as compact JSON in declaration order (`Version`
/// first), byte-identical for identical documents.
impl fmt::Display for PolicyDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Description of a policy attached to a bucket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketPolicySpec {
    /// Generated name of the bucket the policy attaches to.
    pub bucket: Output<String>,
    /// The rendered policy document, chained after the bucket name resolves.
    pub policy: Output<String>,
}

impl BucketPolicySpec {
    /// Describe a policy attachment.
    #[must_use]
    pub fn new(bucket: Output<String>, policy: Output<String>) -> Self {
        Self { bucket, policy }
    }
}
