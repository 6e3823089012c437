//! Read model of the in-progress recording session
//!
//! The recorder updates a shared `LiveSessionMonitor`; the tab manager only
//! reads it to decide whether the active session tab may be replaced.

use parking_lot::RwLock;

/// Recording state of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LiveStatus {
    #[default]
    Inactive,
    Active,
    Finalizing,
}

impl LiveStatus {
    /// A busy session's tab must not be navigated away from in place.
    pub fn is_busy(self) -> bool {
        matches!(self, LiveStatus::Active | LiveStatus::Finalizing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveSession {
    pub session_id: String,
    pub status: LiveStatus,
}

/// Read access to the live session, if any.
pub trait LiveStatusSource: Send + Sync {
    fn live_session(&self) -> Option<LiveSession>;

    /// Whether `session_id` is currently recording or finalizing.
    fn is_busy(&self, session_id: &str) -> bool {
        self.live_session()
            .is_some_and(|live| live.session_id == session_id && live.status.is_busy())
    }
}

/// Shared, lock-protected live session state.
#[derive(Debug, Default)]
pub struct LiveSessionMonitor {
    current: RwLock<Option<LiveSession>>,
}

impl LiveSessionMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the status of `session_id`, replacing any previous session.
    pub fn set(&self, session_id: impl Into<String>, status: LiveStatus) {
        let session_id = session_id.into();
        log::debug!("Live session {} -> {:?}", session_id, status);
        *self.current.write() = Some(LiveSession { session_id, status });
    }

    pub fn clear(&self) {
        *self.current.write() = None;
    }
}

impl LiveStatusSource for LiveSessionMonitor {
    fn live_session(&self) -> Option<LiveSession> {
        self.current.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_statuses() {
        assert!(!LiveStatus::Inactive.is_busy());
        assert!(LiveStatus::Active.is_busy());
        assert!(LiveStatus::Finalizing.is_busy());
    }

    #[test]
    fn test_monitor_is_busy_only_for_matching_session() {
        let monitor = LiveSessionMonitor::new();
        assert!(!monitor.is_busy("s1"));

        monitor.set("s1", LiveStatus::Active);
        assert!(monitor.is_busy("s1"));
        assert!(!monitor.is_busy("s2"));

        monitor.set("s1", LiveStatus::Inactive);
        assert!(!monitor.is_busy("s1"));

        monitor.set("s2", LiveStatus::Finalizing);
        assert!(monitor.is_busy("s2"));

        monitor.clear();
        assert!(monitor.live_session().is_none());
    }
}
