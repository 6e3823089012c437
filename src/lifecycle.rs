//! Close guard and back/forward availability flags.

use crate::history::HistoryMap;
use crate::tab::Tab;

/// Veto predicate consulted before a tab is closed.
///
/// Returning `false` keeps the tab open (e.g. unsaved edits the user has
/// not confirmed discarding). Any `Fn(&Tab) -> bool` closure is a guard.
pub trait CloseGuard: Send + Sync {
    fn can_close(&self, tab: &Tab) -> bool;
}

impl<F> CloseGuard for F
where
    F: Fn(&Tab) -> bool + Send + Sync,
{
    fn can_close(&self, tab: &Tab) -> bool {
        self(tab)
    }
}

/// Whether the back and forward buttons are enabled for the current tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationFlags {
    pub can_go_back: bool,
    pub can_go_next: bool,
}

impl NavigationFlags {
    /// Flags for `current`'s slot; both false without a current tab or history.
    pub fn for_current(current: Option<&Tab>, history: &HistoryMap) -> Self {
        current
            .and_then(|tab| history.get(&tab.slot_id))
            .map(|h| Self {
                can_go_back: h.can_go_back(),
                can_go_next: h.can_go_next(),
            })
            .unwrap_or_default()
    }
}
