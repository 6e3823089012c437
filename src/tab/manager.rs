//! Tab manager for coordinating the tabs of the tab strip

use super::transitions::{self, HistoryDirection, TabsState};
use super::{SlotId, SlotIdGenerator, Tab, TabInput, TabPayload, UuidSlotIds};
use crate::analytics::{AnalyticsEvent, AnalyticsSink, NoopAnalytics, TAB_OPENED_EVENT};
use crate::error::TabsError;
use crate::history::{HistoryMap, TabHistory, push_history};
use crate::lifecycle::{CloseGuard, NavigationFlags};
use crate::live_session::LiveStatusSource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tabstrip_config::TabsConfig;

/// Serializable view of the manager for host bridges and debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabsSnapshot {
    pub tabs: Vec<Tab>,
    pub current_slot: Option<SlotId>,
    pub can_go_back: bool,
    pub can_go_next: bool,
}

/// Owns the open tabs, the per-slot history and the navigation flags.
///
/// Every operation is a read-modify-write over the current state using the
/// pure functions in [`transitions`]. Operations that do not apply (missing
/// tab, vetoed close, nothing to select) leave the state untouched.
pub struct TabManager {
    /// Tabs in strip order plus the current tab
    state: TabsState,
    /// Slot id → navigation history of that slot
    history: HistoryMap,
    /// Back/forward availability for the current tab
    flags: NavigationFlags,
    config: TabsConfig,
    slot_ids: Box<dyn SlotIdGenerator>,
    close_guard: Option<Box<dyn CloseGuard>>,
    live_status: Option<Arc<dyn LiveStatusSource>>,
    analytics: Arc<dyn AnalyticsSink>,
}

impl TabManager {
    /// Create an empty tab manager with no collaborators attached
    pub fn new(config: TabsConfig) -> Self {
        Self {
            state: TabsState::default(),
            history: HistoryMap::new(),
            flags: NavigationFlags::default(),
            config,
            slot_ids: Box::new(UuidSlotIds),
            close_guard: None,
            live_status: None,
            analytics: Arc::new(NoopAnalytics),
        }
    }

    pub fn with_slot_ids(mut self, slot_ids: impl SlotIdGenerator + 'static) -> Self {
        self.slot_ids = Box::new(slot_ids);
        self
    }

    pub fn with_close_guard(mut self, guard: impl CloseGuard + 'static) -> Self {
        self.close_guard = Some(Box::new(guard));
        self
    }

    pub fn with_live_status(mut self, live_status: Arc<dyn LiveStatusSource>) -> Self {
        self.live_status = Some(live_status);
        self
    }

    pub fn with_analytics(mut self, analytics: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = analytics;
        self
    }

    /// Commit a new state and history, refreshing the navigation flags.
    fn commit(&mut self, state: TabsState, history: HistoryMap) {
        self.state = state;
        self.history = history;
        self.flags = NavigationFlags::for_current(self.state.current_tab.as_ref(), &self.history);
    }

    fn commit_state(&mut self, state: TabsState) {
        let history = std::mem::take(&mut self.history);
        self.commit(state, history);
    }

    /// Whether the current tab must not be navigated away from in place.
    fn current_is_sticky(&self) -> bool {
        let Some(current) = self.state.current_tab.as_ref() else {
            return false;
        };
        if current.pinned {
            return true;
        }
        match (current.identity.session_id(), &self.live_status) {
            (Some(session_id), Some(live)) => live.is_busy(session_id),
            _ => false,
        }
    }

    fn open(&mut self, input: &TabInput, replace_active: bool) {
        let (state, history) = transitions::open_tab(
            &self.state.tabs,
            input,
            &self.history,
            replace_active,
            self.slot_ids.as_ref(),
            self.config.history_limit,
        );
        self.commit(state, history);

        log::info!(
            "Opened {} (replace: {}, total: {})",
            input.identity,
            replace_active,
            self.state.tabs.len()
        );
    }

    /// Open `input` the way a normal click does: in place of the current tab
    /// unless that tab is pinned or a session that is still recording.
    pub fn open_current(&mut self, input: impl Into<TabInput>) {
        let input = input.into();
        let replace_active = self.config.replace_in_place && !self.current_is_sticky();
        self.open(&input, replace_active);

        if self.config.analytics_enabled {
            let event = AnalyticsEvent::new(TAB_OPENED_EVENT, input.identity.type_name());
            if let Err(e) = self.analytics.event(event) {
                log::warn!("Ignoring analytics failure for {}: {}", input.identity, e);
            }
        }
    }

    /// Open `input` in a slot of its own, or focus it if it is already open.
    pub fn open_new(&mut self, input: impl Into<TabInput>) {
        let input = input.into();
        self.open(&input, false);
    }

    /// Activate the tab showing the same document as `tab`
    pub fn select(&mut self, tab: &Tab) {
        match transitions::select(&self.state, tab) {
            Some(state) => {
                self.commit_state(state);
                log::debug!("Selected {}", tab.identity);
            }
            None => log::debug!("Select ignored, {} is not open", tab.identity),
        }
    }

    /// Activate the tab at a 1-based position (Cmd+1-9)
    pub fn select_index(&mut self, index: usize) {
        if index == 0 {
            return;
        }
        if let Some(state) = transitions::select_index(&self.state, index - 1) {
            self.commit_state(state);
        }
    }

    /// Switch to the next tab
    pub fn select_next(&mut self) {
        if let Some(state) = transitions::select_next(&self.state, self.config.wrap_navigation) {
            self.commit_state(state);
        }
    }

    /// Switch to the previous tab
    pub fn select_prev(&mut self) {
        if let Some(state) = transitions::select_prev(&self.state, self.config.wrap_navigation) {
            self.commit_state(state);
        }
    }

    /// Close the tab showing the same document as `tab`.
    ///
    /// The close guard may veto; callers detect that by the tab still being
    /// present afterwards.
    pub fn close(&mut self, tab: &Tab) {
        let Some(index) = self.state.position_of(tab) else {
            log::debug!("Close ignored, {} is not open", tab.identity);
            return;
        };

        if let Some(guard) = &self.close_guard
            && !guard.can_close(&self.state.tabs[index])
        {
            log::debug!("Close of {} vetoed by guard", tab.identity);
            return;
        }

        log::info!("Closing {} (index {})", tab.identity, index);
        let (state, history) = transitions::close(&self.state, &self.history, index);
        self.commit(state, history);
    }

    /// Close every tab except the one showing `tab`
    pub fn close_others(&mut self, tab: &Tab) {
        let Some(index) = self.state.position_of(tab) else {
            log::debug!("Close others ignored, {} is not open", tab.identity);
            return;
        };
        if let Some((state, history)) =
            transitions::close_others(&self.state, &self.history, index)
        {
            log::info!("Closed all tabs except {}", tab.identity);
            self.commit(state, history);
        }
    }

    /// Close every tab and forget all history
    pub fn close_all(&mut self) {
        log::info!("Closing all {} tabs", self.state.tabs.len());
        self.commit(TabsState::default(), HistoryMap::new());
    }

    /// Apply a drag-and-drop ordering of the current tabs
    pub fn reorder(&mut self, tabs: &[Tab]) {
        match transitions::reorder(&self.state, tabs) {
            Some(state) => self.commit_state(state),
            None => log::warn!(
                "Reorder ignored: {} tabs supplied do not match the {} open slots",
                tabs.len(),
                self.state.tabs.len()
            ),
        }
    }

    pub fn pin(&mut self, tab: &Tab) {
        if let Some(index) = self.state.position_of(tab)
            && let Some(state) = transitions::pin(&self.state, index)
        {
            log::debug!("Pinned {}", tab.identity);
            self.commit_state(state);
        }
    }

    pub fn unpin(&mut self, tab: &Tab) {
        if let Some(index) = self.state.position_of(tab)
            && let Some(state) = transitions::unpin(&self.state, index)
        {
            log::debug!("Unpinned {}", tab.identity);
            self.commit_state(state);
        }
    }

    /// Show the previous entry of the current slot's history
    pub fn go_back(&mut self) {
        self.navigate(HistoryDirection::Back);
    }

    /// Show the next entry of the current slot's history
    pub fn go_next(&mut self) {
        self.navigate(HistoryDirection::Forward);
    }

    fn navigate(&mut self, direction: HistoryDirection) {
        if let Some((state, history)) =
            transitions::navigate(&self.state, &self.history, direction)
        {
            log::debug!("History {:?} in current slot", direction);
            self.commit(state, history);
        }
    }

    /// Replace the current tab's view state and remember it in its history
    pub fn update_current_state(&mut self, payload: TabPayload) {
        let Some(state) = transitions::update_current_state(&self.state, payload) else {
            log::debug!("View state update ignored for current tab");
            return;
        };
        let history = match &state.current_tab {
            Some(current) => push_history(
                std::mem::take(&mut self.history),
                current,
                self.config.history_limit,
            ),
            None => std::mem::take(&mut self.history),
        };
        self.commit(state, history);
    }

    /// Get the full tab state
    pub fn state(&self) -> &TabsState {
        &self.state
    }

    /// Get all tabs as a slice
    pub fn tabs(&self) -> &[Tab] {
        &self.state.tabs
    }

    /// Get a reference to the active tab
    pub fn current_tab(&self) -> Option<&Tab> {
        self.state.current_tab.as_ref()
    }

    /// Get the number of tabs
    pub fn tab_count(&self) -> usize {
        self.state.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.tabs.is_empty()
    }

    pub fn history(&self) -> &HistoryMap {
        &self.history
    }

    pub fn history_for(&self, slot_id: SlotId) -> Option<&TabHistory> {
        self.history.get(&slot_id)
    }

    pub fn can_go_back(&self) -> bool {
        self.flags.can_go_back
    }

    pub fn can_go_next(&self) -> bool {
        self.flags.can_go_next
    }

    pub fn config(&self) -> &TabsConfig {
        &self.config
    }

    pub fn snapshot(&self) -> TabsSnapshot {
        TabsSnapshot {
            tabs: self.state.tabs.clone(),
            current_slot: self.state.current_tab.as_ref().map(|t| t.slot_id),
            can_go_back: self.flags.can_go_back,
            can_go_next: self.flags.can_go_next,
        }
    }

    pub fn snapshot_json(&self) -> Result<String, TabsError> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new(TabsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::ChannelAnalytics;
    use crate::error::AnalyticsError;
    use crate::live_session::{LiveSessionMonitor, LiveStatus};
    use crate::tab::{EditorView, SequentialSlotIds, SessionView, TabIdentity};
    use parking_lot::Mutex;

    fn manager() -> TabManager {
        TabManager::default().with_slot_ids(SequentialSlotIds::new())
    }

    fn find(mgr: &TabManager, session_id: &str) -> Tab {
        mgr.tabs()
            .iter()
            .find(|t| t.identity.session_id() == Some(session_id))
            .cloned()
            .unwrap()
    }

    fn session_ids(mgr: &TabManager) -> Vec<&str> {
        mgr.tabs()
            .iter()
            .map(|t| t.identity.session_id().unwrap_or("?"))
            .collect()
    }

    struct FailingSink;

    impl AnalyticsSink for FailingSink {
        fn event(&self, _event: AnalyticsEvent) -> Result<(), AnalyticsError> {
            Err(AnalyticsError::Delivery("offline".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<AnalyticsEvent>>,
    }

    impl AnalyticsSink for RecordingSink {
        fn event(&self, event: AnalyticsEvent) -> Result<(), AnalyticsError> {
            self.events.lock().push(event);
            Ok(())
        }
    }

    #[test]
    fn test_open_current_replaces_unpinned_tab() {
        let mut mgr = manager();
        mgr.open_current(TabInput::session("a"));
        let slot = mgr.current_tab().unwrap().slot_id;

        mgr.open_current(TabInput::session("b"));
        assert_eq!(session_ids(&mgr), vec!["b"]);
        assert_eq!(mgr.current_tab().unwrap().slot_id, slot);
        assert!(mgr.can_go_back());
        assert!(!mgr.can_go_next());
    }

    #[test]
    fn test_open_current_does_not_replace_pinned_tab() {
        let mut mgr = manager();
        mgr.open_current(TabInput::session("a"));
        let a = find(&mgr, "a");
        mgr.pin(&a);

        mgr.open_current(TabInput::session("b"));
        assert_eq!(session_ids(&mgr), vec!["a", "b"]);
        assert!(mgr.tabs()[0].pinned);
        assert_eq!(mgr.current_tab().unwrap().identity.session_id(), Some("b"));
    }

    #[test]
    fn test_open_current_does_not_replace_recording_session() {
        let live = Arc::new(LiveSessionMonitor::new());
        let mut mgr = manager().with_live_status(live.clone());
        mgr.open_current(TabInput::session("a"));

        live.set("a", LiveStatus::Active);
        mgr.open_current(TabInput::session("b"));
        assert_eq!(session_ids(&mgr), vec!["a", "b"]);

        live.set("b", LiveStatus::Finalizing);
        mgr.open_current(TabInput::session("c"));
        assert_eq!(session_ids(&mgr), vec!["a", "b", "c"]);

        live.set("c", LiveStatus::Inactive);
        mgr.open_current(TabInput::session("d"));
        assert_eq!(session_ids(&mgr), vec!["a", "b", "d"]);
    }

    #[test]
    fn test_open_current_respects_replace_in_place_setting() {
        let config = TabsConfig {
            replace_in_place: false,
            ..TabsConfig::default()
        };
        let mut mgr = TabManager::new(config).with_slot_ids(SequentialSlotIds::new());
        mgr.open_current(TabInput::session("a"));
        mgr.open_current(TabInput::session("b"));
        assert_eq!(session_ids(&mgr), vec!["a", "b"]);
    }

    #[test]
    fn test_open_current_emits_analytics() {
        let sink = Arc::new(RecordingSink::default());
        let mut mgr = manager().with_analytics(sink.clone());
        mgr.open_current(TabIdentity::Contacts);
        mgr.open_new(TabInput::session("a"));

        let events = sink.events.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], AnalyticsEvent::new("tab_opened", "contacts"));
    }

    #[test]
    fn test_analytics_disabled_emits_nothing() {
        let sink = Arc::new(RecordingSink::default());
        let config = TabsConfig {
            analytics_enabled: false,
            ..TabsConfig::default()
        };
        let mut mgr = TabManager::new(config).with_analytics(sink.clone());
        mgr.open_current(TabInput::session("a"));
        assert!(sink.events.lock().is_empty());
    }

    #[test]
    fn test_analytics_failure_does_not_affect_state() {
        let mut mgr = manager().with_analytics(Arc::new(FailingSink));
        mgr.open_current(TabInput::session("a"));
        assert_eq!(session_ids(&mgr), vec!["a"]);
        assert!(mgr.current_tab().is_some());
    }

    #[tokio::test]
    async fn test_channel_analytics_receives_open_events() {
        let (sink, mut rx) = ChannelAnalytics::new();
        let mut mgr = manager().with_analytics(Arc::new(sink));
        mgr.open_current(TabIdentity::Calendars);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.view, "calendars");
    }

    #[test]
    fn test_close_guard_vetoes() {
        let mut mgr = manager().with_close_guard(|tab: &Tab| !tab.pinned);
        mgr.open_new(TabInput::session("a"));
        mgr.open_new(TabInput::session("b"));
        let a = find(&mgr, "a");
        mgr.pin(&a);

        mgr.close(&a);
        assert_eq!(session_ids(&mgr), vec!["a", "b"]);

        let b = find(&mgr, "b");
        mgr.close(&b);
        assert_eq!(session_ids(&mgr), vec!["a"]);
    }

    #[test]
    fn test_close_missing_tab_is_noop() {
        let mut mgr = manager();
        mgr.open_new(TabInput::session("a"));
        let before = mgr.snapshot();

        let mut other = find(&mgr, "a");
        other.identity = TabIdentity::Sessions { id: "zzz".into() };
        mgr.close(&other);
        assert_eq!(mgr.snapshot(), before);
    }

    #[test]
    fn test_close_last_tab_resets_everything() {
        let mut mgr = manager();
        mgr.open_current(TabInput::session("a"));
        mgr.open_current(TabInput::session("b"));
        assert!(mgr.can_go_back());

        let b = find(&mgr, "b");
        mgr.close(&b);
        assert!(mgr.is_empty());
        assert!(mgr.current_tab().is_none());
        assert!(mgr.history().is_empty());
        assert!(!mgr.can_go_back());
        assert!(!mgr.can_go_next());
    }

    #[test]
    fn test_select_index_is_one_based() {
        let mut mgr = manager();
        for id in ["a", "b", "c"] {
            mgr.open_new(TabInput::session(id));
        }
        mgr.select_index(1);
        assert_eq!(mgr.current_tab().unwrap().identity.session_id(), Some("a"));
        mgr.select_index(0);
        mgr.select_index(9);
        assert_eq!(mgr.current_tab().unwrap().identity.session_id(), Some("a"));
    }

    #[test]
    fn test_go_back_and_next_update_flags() {
        let mut mgr = manager();
        mgr.open_current(TabInput::session("a"));
        mgr.open_current(TabInput::session("b"));

        mgr.go_back();
        assert_eq!(session_ids(&mgr), vec!["a"]);
        assert!(!mgr.can_go_back());
        assert!(mgr.can_go_next());

        mgr.go_next();
        assert_eq!(session_ids(&mgr), vec!["b"]);
        assert!(mgr.can_go_back());
        assert!(!mgr.can_go_next());
    }

    #[test]
    fn test_flags_follow_selected_slot() {
        let mut mgr = manager();
        mgr.open_current(TabInput::session("a"));
        mgr.open_current(TabInput::session("b"));
        mgr.open_new(TabInput::session("c"));
        assert!(!mgr.can_go_back());

        mgr.select_prev();
        assert!(mgr.can_go_back());
    }

    #[test]
    fn test_update_current_state_is_remembered_in_history() {
        let mut mgr = manager();
        mgr.open_current(TabInput::session("a"));
        let transcript = TabPayload::Sessions(SessionView {
            editor: EditorView::Transcript,
        });
        mgr.update_current_state(transcript.clone());
        assert_eq!(mgr.current_tab().unwrap().state, transcript);

        mgr.open_current(TabInput::session("b"));
        mgr.go_back();
        assert_eq!(mgr.current_tab().unwrap().state, transcript);
    }

    #[test]
    fn test_snapshot_json() {
        let mut mgr = manager();
        mgr.open_new(TabIdentity::Settings);
        let json = mgr.snapshot_json().unwrap();
        let snapshot: TabsSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, mgr.snapshot());
        assert_eq!(snapshot.current_slot, Some(mgr.tabs()[0].slot_id));
    }
}
