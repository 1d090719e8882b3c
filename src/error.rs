//! Error types for DPI negotiation and queries.

use thiserror::Error;

/// Failures surfaced by the DPI facade and controller.
///
/// Per-monitor density reads are deliberately absent here: a failed monitor
/// density read degrades to the 96 DPI fallback instead of erroring.
#[derive(Error, Debug)]
pub enum DpiError {
    /// Declaring per-monitor awareness failed at construction. Fatal, not
    /// retried.
    #[error(
        "enabling per-monitor DPI awareness failed; the hosting application's \
         manifest may already declare a conflicting awareness mode that cannot \
         be overridden at runtime"
    )]
    AwarenessDeclaration,

    /// The process awareness mode could not be read back. No default is
    /// substituted since guessing the mode could mis-describe the window's
    /// behavior.
    #[error("unable to read the process DPI awareness mode: {0}")]
    AwarenessQuery(String),
}
