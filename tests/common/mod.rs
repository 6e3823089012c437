//! Shared integration test helpers for tabstrip.
//!
//! Include with `mod common;` at the top of a test file. The
//! `#[allow(dead_code)]` attribute suppresses warnings when a test file uses
//! only some of the helpers.

#![allow(dead_code)]

use tabstrip::{SequentialSlotIds, Tab, TabInput, TabManager, TabsConfig};

/// A manager with deterministic slot ids and default config.
pub fn manager() -> TabManager {
    TabManager::new(TabsConfig::default()).with_slot_ids(SequentialSlotIds::new())
}

/// A manager with each session opened in its own slot; the last is active.
pub fn manager_with_sessions(ids: &[&str]) -> TabManager {
    let mut mgr = manager();
    for id in ids {
        mgr.open_new(TabInput::session(*id));
    }
    mgr
}

/// The open tab showing session `id`.
pub fn tab(mgr: &TabManager, id: &str) -> Tab {
    mgr.tabs()
        .iter()
        .find(|t| t.identity.session_id() == Some(id))
        .cloned()
        .unwrap_or_else(|| panic!("session {id} is not open"))
}

/// Session ids in strip order, `*` marking pinned and `!` marking active.
pub fn layout(mgr: &TabManager) -> Vec<String> {
    mgr.tabs()
        .iter()
        .map(|t| {
            let mut name = t.identity.session_id().unwrap_or("?").to_string();
            if t.pinned {
                name.push('*');
            }
            if t.active {
                name.push('!');
            }
            name
        })
        .collect()
}

/// Assert the active-tab and pinned-prefix invariants.
pub fn assert_invariants(mgr: &TabManager) {
    let active: Vec<&Tab> = mgr.tabs().iter().filter(|t| t.active).collect();
    assert_eq!(
        active.len(),
        mgr.tab_count().min(1),
        "active count wrong in {:?}",
        layout(mgr)
    );
    assert_eq!(mgr.current_tab(), active.first().copied());

    if let Some(first_unpinned) = mgr.tabs().iter().position(|t| !t.pinned) {
        assert!(
            mgr.tabs()[first_unpinned..].iter().all(|t| !t.pinned),
            "pinned tab after unpinned one in {:?}",
            layout(mgr)
        );
    }

    if mgr.is_empty() {
        assert!(mgr.history().is_empty());
        assert!(!mgr.can_go_back());
        assert!(!mgr.can_go_next());
    }
}
