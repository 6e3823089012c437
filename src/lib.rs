// Library exports for the tab strip manager
//
// `tab` holds the data model, the pure transitions and the `TabManager`
// store. The remaining modules are the seams the manager talks through:
// per-slot history, the close guard, the live recording read model and the
// analytics sink.

/// Library version, for hosts that report it alongside analytics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod analytics;
pub mod error;
pub mod history;
pub mod lifecycle;
pub mod live_session;
pub mod tab;

pub use analytics::{AnalyticsEvent, AnalyticsSink, ChannelAnalytics, NoopAnalytics};
pub use error::{AnalyticsError, TabsError};
pub use history::{HistoryMap, TabHistory, push_history};
pub use lifecycle::{CloseGuard, NavigationFlags};
pub use live_session::{LiveSession, LiveSessionMonitor, LiveStatus, LiveStatusSource};
pub use tab::{
    SequentialSlotIds, SlotId, SlotIdGenerator, Tab, TabIdentity, TabInput, TabManager, TabPayload,
    TabsSnapshot, TabsState, UuidSlotIds, default_state, is_same_tab,
};
pub use tabstrip_config::{ConfigError, TabsConfig};
