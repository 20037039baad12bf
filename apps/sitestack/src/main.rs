//! SiteStack - static website stack program.
//!
//! Builds the desired-state graph for the static website and either renders
//! the plan document (default) or applies it against the in-process
//! simulated engine.
//!
//! # Usage
//!
//! ```text
//! sitestack            # print the plan document
//! sitestack --apply    # apply with the simulated engine, print outputs
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `STACK_NAME` | `static-website` | Stack name in the plan document |
//! | `DEFAULT_REGION` | `us-east-1` | Region the stack targets |
//! | `WWW_DIR` | `./www` | Directory holding the website files |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use anyhow::{Context, Result};
use sitestack::stack::build_site_stack;
use sitestack_core::StackConfig;
use sitestack_engine::{ProvisioningEngine, SimulatedEngine};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// What the invocation asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Render the plan document.
    Plan,
    /// Apply with the simulated engine and print resolved outputs.
    Apply,
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Pick the mode from the command-line arguments.
fn mode_from_args(args: impl Iterator<Item = String>) -> Mode {
    let mut mode = Mode::Plan;
    for arg in args {
        if arg == "--apply" {
            mode = Mode::Apply;
        }
    }
    mode
}

fn main() -> Result<()> {
    let config = StackConfig::from_env();
    init_tracing(&config.log_level)?;

    let mode = mode_from_args(std::env::args().skip(1));

    info!(
        stack = %config.stack_name,
        region = %config.default_region,
        www_dir = %config.www_dir,
        "building stack graph"
    );
    let graph = build_site_stack(&config);

    match mode {
        Mode::Plan => {
            let plan = graph.to_plan().context("failed to render plan document")?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Mode::Apply => {
            let engine = SimulatedEngine::new();
            let outputs = engine
                .apply(&graph)
                .with_context(|| format!("failed to apply stack {}", config.stack_name))?;
            println!("{}", serde_json::to_string_pretty(&outputs)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_default_to_plan_mode() {
        let mode = mode_from_args(std::iter::empty());
        assert_eq!(mode, Mode::Plan);
    }

    #[test]
    fn test_should_pick_apply_mode() {
        let args = vec!["--apply".to_owned()];
        assert_eq!(mode_from_args(args.into_iter()), Mode::Apply);
    }

    #[test]
    fn test_should_ignore_unknown_arguments() {
        let args = vec!["--verbose".to_owned(), "--apply".to_owned()];
        assert_eq!(mode_from_args(args.into_iter()), Mode::Apply);
    }
}
