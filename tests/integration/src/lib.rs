//! End-to-end tests for the SiteStack website stack.
//!
//! These tests build the full website stack declaration and drive it through
//! the in-process simulated engine; no network or provider credentials are
//! required.

use std::path::Path;
use std::sync::Once;

use sitestack_core::StackConfig;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Stack configuration pointing at a scratch website directory.
#[must_use]
pub fn site_config(www_dir: &Path) -> StackConfig {
    init_tracing();

    StackConfig::builder()
        .stack_name("static-website".into())
        .www_dir(www_dir.display().to_string())
        .build()
}

/// Write the two website files into `www_dir`.
pub fn write_site_files(www_dir: &Path) {
    std::fs::write(www_dir.join("index.html"), "<h1>Hello, world!</h1>")
        .expect("write index.html");
    std::fs::write(www_dir.join("error.html"), "<h1>404 - Page not found</h1>")
        .expect("write error.html");
}

mod test_apply;
mod test_plan;
