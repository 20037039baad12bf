//! Error types for the SiteStack core.

/// Core error type for SiteStack graph construction primitives.
#[derive(Debug, thiserror::Error)]
pub enum SiteStackError {
    /// A deferred value was resolved a second time.
    ///
    /// The provisioning engine resolves every generated attribute exactly
    /// once, in dependency order; a second resolution indicates a logic
    /// error in the caller.
    #[error("deferred value {output} is already resolved")]
    AlreadyResolved {
        /// Label of the deferred value, or `<unnamed>` when it has none.
        output: String,
    },
}

/// Convenience result type for SiteStack operations.
pub type SiteStackResult<T> = Result<T, SiteStackError>;
