//! Pure state transitions for the tab strip
//!
//! Every function here maps `(state, args)` to a new state without touching
//! collaborators other than the slot id generator. Functions returning
//! `Option` yield `None` when the call is a no-op.
//!
//! All transitions keep two invariants:
//! - exactly one tab is active when the list is non-empty, and `current_tab`
//!   is a copy of it (`None` iff the list is empty)
//! - pinned tabs form a prefix of the list

use super::{SlotId, SlotIdGenerator, Tab, TabInput, TabPayload, default_state, is_same_tab};
use crate::history::{HistoryMap, push_history};
use std::collections::HashMap;

/// Ordered tabs plus a materialized copy of the active one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabsState {
    pub tabs: Vec<Tab>,
    pub current_tab: Option<Tab>,
}

impl TabsState {
    /// Build a state from `tabs`, deriving the current tab from the active flag.
    pub fn from_tabs(tabs: Vec<Tab>) -> Self {
        let current_tab = tabs.iter().find(|t| t.active).cloned();
        Self { tabs, current_tab }
    }

    /// Index of the tab identity-equal to `tab`.
    pub fn position_of(&self, tab: &Tab) -> Option<usize> {
        self.tabs.iter().position(|t| is_same_tab(t, tab))
    }

    /// Index of the active tab.
    pub fn current_index(&self) -> Option<usize> {
        self.tabs.iter().position(|t| t.active)
    }

    pub fn pinned_count(&self) -> usize {
        self.tabs.iter().filter(|t| t.pinned).count()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

/// Direction of a history step within the current slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Back,
    Forward,
}

fn activate_index(mut tabs: Vec<Tab>, index: usize) -> TabsState {
    for (i, tab) in tabs.iter_mut().enumerate() {
        tab.active = i == index;
    }
    TabsState::from_tabs(tabs)
}

fn deactivated(tabs: &[Tab]) -> Vec<Tab> {
    tabs.iter()
        .map(|t| Tab {
            active: false,
            ..t.clone()
        })
        .collect()
}

/// Put `replacement` into its own slot and drop any other slot showing the
/// same identity, together with that slot's history.
fn replace_in_slot(tabs: &[Tab], replacement: &Tab, history: &mut HistoryMap) -> Vec<Tab> {
    let mut next = Vec::with_capacity(tabs.len());
    for tab in tabs {
        if tab.slot_id == replacement.slot_id {
            next.push(replacement.clone());
        } else if is_same_tab(tab, replacement) {
            history.remove(&tab.slot_id);
        } else {
            next.push(Tab {
                active: false,
                ..tab.clone()
            });
        }
    }
    next
}

/// Open `input`, either into the active slot (`replace_active`) or into a
/// slot of its own.
///
/// Replacing keeps the active slot's id and pinned flag and removes any
/// other tab showing the same identity. Opening without replacement
/// activates an existing identity-equal tab instead of creating a duplicate;
/// history is untouched in that case.
pub fn open_tab(
    tabs: &[Tab],
    input: &TabInput,
    history: &HistoryMap,
    replace_active: bool,
    ids: &dyn SlotIdGenerator,
    history_limit: usize,
) -> (TabsState, HistoryMap) {
    let tab_with_defaults = default_state(input, ids.next_slot_id());
    let mut history = history.clone();

    if replace_active {
        let (active_tab, next_tabs) = match tabs.iter().find(|t| t.active) {
            Some(previous) => {
                let active_tab = Tab {
                    slot_id: previous.slot_id,
                    active: true,
                    pinned: previous.pinned,
                    ..tab_with_defaults
                };
                let next_tabs = replace_in_slot(tabs, &active_tab, &mut history);
                (active_tab, next_tabs)
            }
            None => {
                let active_tab = Tab {
                    active: true,
                    ..tab_with_defaults
                };
                let mut next_tabs = deactivated(tabs);
                next_tabs.push(active_tab.clone());
                (active_tab, next_tabs)
            }
        };

        let history = push_history(history, &active_tab, history_limit);
        return (
            TabsState {
                tabs: next_tabs,
                current_tab: Some(active_tab),
            },
            history,
        );
    }

    if let Some(index) = tabs.iter().position(|t| is_same_tab(t, &tab_with_defaults)) {
        return (activate_index(tabs.to_vec(), index), history);
    }

    let active_tab = Tab {
        active: true,
        ..tab_with_defaults
    };
    let mut next_tabs = deactivated(tabs);
    next_tabs.push(active_tab.clone());
    history = push_history(history, &active_tab, history_limit);

    (
        TabsState {
            tabs: next_tabs,
            current_tab: Some(active_tab),
        },
        history,
    )
}

/// Activate the tab identity-equal to `tab`.
pub fn select(state: &TabsState, tab: &Tab) -> Option<TabsState> {
    let index = state.position_of(tab)?;
    Some(activate_index(state.tabs.clone(), index))
}

/// Activate the tab at 0-based `index`.
pub fn select_index(state: &TabsState, index: usize) -> Option<TabsState> {
    if index >= state.tabs.len() {
        return None;
    }
    Some(activate_index(state.tabs.clone(), index))
}

/// Activate the tab after the current one.
///
/// With `wrap`, the last tab is followed by the first; without it the call
/// is a no-op at the end of the strip.
pub fn select_next(state: &TabsState, wrap: bool) -> Option<TabsState> {
    state.current_tab.as_ref()?;
    let current = state.current_index()?;
    let n = state.tabs.len();
    let next = if wrap {
        (current + 1) % n
    } else if current + 1 < n {
        current + 1
    } else {
        return None;
    };
    Some(activate_index(state.tabs.clone(), next))
}

/// Activate the tab before the current one. See [`select_next`].
pub fn select_prev(state: &TabsState, wrap: bool) -> Option<TabsState> {
    state.current_tab.as_ref()?;
    let current = state.current_index()?;
    let n = state.tabs.len();
    let prev = if wrap {
        (current + n - 1) % n
    } else if current > 0 {
        current - 1
    } else {
        return None;
    };
    Some(activate_index(state.tabs.clone(), prev))
}

/// Remove the tab at `index`.
///
/// The tab now at `index` (or the new last tab when the last one was closed)
/// becomes active, and the closed slot's history is dropped. Closing the
/// final tab yields the empty state and an empty history map.
pub fn close(state: &TabsState, history: &HistoryMap, index: usize) -> (TabsState, HistoryMap) {
    let mut tabs = state.tabs.clone();
    if index >= tabs.len() {
        return (state.clone(), history.clone());
    }
    let closed = tabs.remove(index);

    if tabs.is_empty() {
        return (TabsState::default(), HistoryMap::new());
    }

    let next_index = index.min(tabs.len() - 1);
    let mut history = history.clone();
    history.remove(&closed.slot_id);

    (activate_index(tabs, next_index), history)
}

/// Keep only the tab at `index`, active, with only its slot's history.
pub fn close_others(
    state: &TabsState,
    history: &HistoryMap,
    index: usize,
) -> Option<(TabsState, HistoryMap)> {
    let kept = Tab {
        active: true,
        ..state.tabs.get(index)?.clone()
    };

    let mut history = history.clone();
    history.retain(|slot_id, _| *slot_id == kept.slot_id);

    Some((
        TabsState {
            tabs: vec![kept.clone()],
            current_tab: Some(kept),
        },
        history,
    ))
}

/// Apply a caller-supplied ordering of the existing tabs.
///
/// Tabs are matched by slot id and keep their own flags. Pinned tabs are
/// moved ahead of unpinned ones, each group keeping the supplied order.
/// Returns `None` unless `order` names every current slot exactly once.
pub fn reorder(state: &TabsState, order: &[Tab]) -> Option<TabsState> {
    if order.len() != state.tabs.len() {
        return None;
    }

    let mut remaining: HashMap<SlotId, &Tab> =
        state.tabs.iter().map(|t| (t.slot_id, t)).collect();
    let mut reordered = Vec::with_capacity(order.len());
    for tab in order {
        reordered.push(remaining.remove(&tab.slot_id)?.clone());
    }

    let (mut tabs, unpinned): (Vec<Tab>, Vec<Tab>) =
        reordered.into_iter().partition(|t| t.pinned);
    tabs.extend(unpinned);
    Some(TabsState::from_tabs(tabs))
}

/// Pin the tab at `index`, moving it to the end of the pinned prefix.
pub fn pin(state: &TabsState, index: usize) -> Option<TabsState> {
    if state.tabs.get(index)?.pinned {
        return None;
    }
    let pinned_count = state.pinned_count();

    let mut tabs = state.tabs.clone();
    let mut tab = tabs.remove(index);
    tab.pinned = true;
    tabs.insert(pinned_count.min(tabs.len()), tab);

    Some(TabsState::from_tabs(tabs))
}

/// Unpin the tab at `index`, moving it to the start of the unpinned suffix.
///
/// The pinned count includes the tab itself, so unpinning the only pinned
/// tab lands it at index 0.
pub fn unpin(state: &TabsState, index: usize) -> Option<TabsState> {
    if !state.tabs.get(index)?.pinned {
        return None;
    }
    let pinned_count = state.pinned_count();

    let mut tabs = state.tabs.clone();
    let mut tab = tabs.remove(index);
    tab.pinned = false;
    tabs.insert(pinned_count.saturating_sub(1).min(tabs.len()), tab);

    Some(TabsState::from_tabs(tabs))
}

/// Step the current slot's history and show the resulting entry in place.
///
/// The slot keeps its id and pinned flag; no history entry is pushed. Any
/// other slot showing the target identity is dropped.
pub fn navigate(
    state: &TabsState,
    history: &HistoryMap,
    direction: HistoryDirection,
) -> Option<(TabsState, HistoryMap)> {
    let current = state.current_tab.as_ref()?;
    let mut history = history.clone();

    let slot_history = history.get_mut(&current.slot_id)?;
    let target = match direction {
        HistoryDirection::Back => slot_history.back(),
        HistoryDirection::Forward => slot_history.forward(),
    }?
    .clone();

    let replacement = Tab {
        active: true,
        pinned: current.pinned,
        ..default_state(&target, current.slot_id)
    };
    let tabs = replace_in_slot(&state.tabs, &replacement, &mut history);

    Some((
        TabsState {
            tabs,
            current_tab: Some(replacement),
        },
        history,
    ))
}

/// Replace the current tab's view state. Payloads of another tab type are
/// rejected.
pub fn update_current_state(state: &TabsState, payload: TabPayload) -> Option<TabsState> {
    let index = state.current_index()?;
    if !payload.matches(&state.tabs[index].identity) {
        return None;
    }
    let mut tabs = state.tabs.clone();
    tabs[index].state = payload;
    Some(TabsState::from_tabs(tabs))
}
