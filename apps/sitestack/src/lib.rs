//! The static-website stack declaration.
//!
//! Exposes [`stack::build_site_stack`] so the binary and the integration
//! tests share one declaration of the website stack.

pub mod stack;
