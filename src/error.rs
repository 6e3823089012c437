//! Typed error types for tabstrip.
//!
//! Tab operations themselves never fail: missing tabs and vetoed closes are
//! no-ops. These errors cover the edges where the manager talks to the
//! outside world.

use thiserror::Error;

/// Failure to deliver an analytics event.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The receiving end of the analytics channel was dropped.
    #[error("Analytics channel closed")]
    ChannelClosed,

    /// Delivery failure reported by a host-implemented sink (e.g. an HTTP
    /// client that could not reach the collector).
    #[error("Analytics delivery failed: {0}")]
    Delivery(String),
}

/// Errors returned by `TabManager` helpers that serialize state.
#[derive(Debug, Error)]
pub enum TabsError {
    #[error("Snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}
