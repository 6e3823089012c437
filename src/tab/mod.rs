//! Tab data model for the tab strip
//!
//! This module provides the core tab infrastructure including:
//! - `Tab`: One open view bound to a slot in the tab strip
//! - `TabIdentity`: The type + key parameters that decide "same document"
//! - `TabInput`: A caller's request to open something, before it has a slot
//! - `SlotId`: Unique identifier for a position in the strip
//! - `TabManager`: Coordinates the ordered list of tabs

mod manager;
mod payload;
pub mod transitions;

pub use manager::{TabManager, TabsSnapshot};
pub use payload::{
    CalendarMode, CalendarView, ContactSelection, ContactsView, EditorView, SessionView, TabPayload,
};
pub use transitions::TabsState;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Identifier of a slot (position) in the tab strip.
///
/// A slot keeps its id while the document shown in it changes, the same way
/// a browser tab survives navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(Uuid);

impl SlotId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Source of fresh slot identifiers.
pub trait SlotIdGenerator: Send + Sync {
    /// Return an id that has never been handed out before.
    fn next_slot_id(&self) -> SlotId;
}

/// Random v4 UUID slot ids. Used by default.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSlotIds;

impl SlotIdGenerator for UuidSlotIds {
    fn next_slot_id(&self) -> SlotId {
        SlotId(Uuid::new_v4())
    }
}

/// Deterministic, monotonically increasing slot ids (1, 2, 3, ...).
///
/// Useful for tests and for replaying a recorded sequence of operations.
#[derive(Debug, Default)]
pub struct SequentialSlotIds {
    next: AtomicU64,
}

impl SequentialSlotIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotIdGenerator for SequentialSlotIds {
    fn next_slot_id(&self) -> SlotId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        SlotId(Uuid::from_u128(u128::from(n)))
    }
}

/// What a tab shows, keyed by tab type.
///
/// Two tabs with equal identities are the same open document regardless of
/// the slot they sit in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TabIdentity {
    Sessions { id: String },
    Folders { id: Option<String> },
    Humans { id: String },
    Organizations { id: String },
    Contacts,
    Calendars,
    Templates,
    Settings,
    Empty,
}

impl TabIdentity {
    /// Stable type name, also used as the analytics `view`.
    pub fn type_name(&self) -> &'static str {
        match self {
            TabIdentity::Sessions { .. } => "sessions",
            TabIdentity::Folders { .. } => "folders",
            TabIdentity::Humans { .. } => "humans",
            TabIdentity::Organizations { .. } => "organizations",
            TabIdentity::Contacts => "contacts",
            TabIdentity::Calendars => "calendars",
            TabIdentity::Templates => "templates",
            TabIdentity::Settings => "settings",
            TabIdentity::Empty => "empty",
        }
    }

    /// Session id when this identity points at a note session.
    pub fn session_id(&self) -> Option<&str> {
        match self {
            TabIdentity::Sessions { id } => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for TabIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabIdentity::Sessions { id }
            | TabIdentity::Humans { id }
            | TabIdentity::Organizations { id } => write!(f, "{}:{}", self.type_name(), id),
            TabIdentity::Folders { id: Some(id) } => write!(f, "folders:{}", id),
            _ => f.write_str(self.type_name()),
        }
    }
}

/// A request to open a tab: identity plus an optional payload override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabInput {
    pub identity: TabIdentity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<TabPayload>,
}

impl TabInput {
    pub fn new(identity: TabIdentity) -> Self {
        Self {
            identity,
            state: None,
        }
    }

    pub fn with_state(mut self, state: TabPayload) -> Self {
        self.state = Some(state);
        self
    }

    pub fn session(id: impl Into<String>) -> Self {
        Self::new(TabIdentity::Sessions { id: id.into() })
    }
}

impl From<TabIdentity> for TabInput {
    fn from(identity: TabIdentity) -> Self {
        Self::new(identity)
    }
}

/// One open view in the tab strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    /// Slot this tab occupies
    pub slot_id: SlotId,
    /// Document or view shown in the slot
    pub identity: TabIdentity,
    /// Whether this is the selected tab
    pub active: bool,
    /// Whether this tab belongs to the pinned prefix
    pub pinned: bool,
    /// Type-specific view state
    pub state: TabPayload,
}

impl Tab {
    /// Return the request that would reopen this tab with its current state.
    pub fn to_input(&self) -> TabInput {
        TabInput {
            identity: self.identity.clone(),
            state: Some(self.state.clone()),
        }
    }
}

/// Identity equality; slot ids, flags and payload are ignored.
pub fn is_same_tab(a: &Tab, b: &Tab) -> bool {
    a.identity == b.identity
}

/// Build an inactive, unpinned tab for `input` in slot `slot_id`.
///
/// A payload override is kept only when it belongs to the input's tab type;
/// otherwise the type's default payload is used.
pub fn default_state(input: &TabInput, slot_id: SlotId) -> Tab {
    let state = match &input.state {
        Some(state) if state.matches(&input.identity) => state.clone(),
        Some(state) => {
            log::debug!(
                "Ignoring {:?} payload for {} tab",
                state,
                input.identity.type_name()
            );
            TabPayload::default_for(&input.identity)
        }
        None => TabPayload::default_for(&input.identity),
    };

    Tab {
        slot_id,
        identity: input.identity.clone(),
        active: false,
        pinned: false,
        state,
    }
}
