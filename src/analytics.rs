//! Fire-and-forget analytics sink
//!
//! The manager emits events after a transition has been committed. Delivery
//! failures are logged by the caller and never affect tab state.

use crate::error::AnalyticsError;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Event name emitted when a tab is opened via `open_current`.
pub const TAB_OPENED_EVENT: &str = "tab_opened";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub event: String,
    pub view: String,
}

impl AnalyticsEvent {
    pub fn new(event: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            view: view.into(),
        }
    }
}

/// Destination for analytics events. Must not block.
pub trait AnalyticsSink: Send + Sync {
    fn event(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError>;
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn event(&self, _event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        Ok(())
    }
}

/// Sink that forwards events over an unbounded tokio channel.
///
/// The host drains the receiver from an async task and performs the actual
/// network delivery there, so emitting never waits.
#[derive(Debug, Clone)]
pub struct ChannelAnalytics {
    tx: mpsc::UnboundedSender<AnalyticsEvent>,
}

impl ChannelAnalytics {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<AnalyticsEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl AnalyticsSink for ChannelAnalytics {
    fn event(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError> {
        self.tx
            .send(event)
            .map_err(|_| AnalyticsError::ChannelClosed)
    }
}
