//! Stack configuration.
//!
//! Static configuration for a stack program: stack name, target region, and
//! the directory holding the website files. Values are loaded from
//! environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::types::AwsRegion;

/// Configuration for a SiteStack program.
///
/// # Examples
///
/// ```
/// use sitestack_core::StackConfig;
///
/// let config = StackConfig::default();
/// assert_eq!(config.stack_name, "static-website");
/// assert_eq!(config.default_region.as_str(), "us-east-1");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct StackConfig {
    /// Name of the stack; used as the top-level key of the plan document.
    #[builder(default = String::from("static-website"))]
    pub stack_name: String,

    /// Region the stack targets.
    #[builder(default)]
    pub default_region: AwsRegion,

    /// Directory containing the website files to upload.
    #[builder(default = String::from("./www"))]
    pub www_dir: String,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            stack_name: String::from("static-website"),
            default_region: AwsRegion::default(),
            www_dir: String::from("./www"),
            log_level: String::from("info"),
        }
    }
}

impl StackConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `STACK_NAME` | `static-website` |
    /// | `DEFAULT_REGION` | `us-east-1` |
    /// | `WWW_DIR` | `./www` |
    /// | `LOG_LEVEL` | `info` |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("STACK_NAME") {
            config.stack_name = v;
        }
        if let Ok(v) = std::env::var("DEFAULT_REGION") {
            config.default_region = AwsRegion::new(v);
        }
        if let Ok(v) = std::env::var("WWW_DIR") {
            config.www_dir = v;
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_create_default_config() {
        let config = StackConfig::default();
        assert_eq!(config.stack_name, "static-website");
        assert_eq!(config.default_region.as_str(), "us-east-1");
        assert_eq!(config.www_dir, "./www");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_should_build_with_typed_builder() {
        let config = StackConfig::builder()
            .stack_name("docs-site".into())
            .www_dir("./public".into())
            .log_level("debug".into())
            .build();

        assert_eq!(config.stack_name, "docs-site");
        assert_eq!(config.www_dir, "./public");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.default_region.as_str(), "us-east-1");
    }

    #[test]
    fn test_should_serialize_to_camel_case_json() {
        let config = StackConfig::default();
        let json = serde_json::to_string(&config).expect("test serialization");
        assert!(json.contains("stackName"));
        assert!(json.contains("wwwDir"));
    }
}
