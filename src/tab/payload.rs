//! Type-specific view state carried by a tab.

use super::TabIdentity;
use serde::{Deserialize, Serialize};

/// Which editor a session tab is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorView {
    #[default]
    Raw,
    Enhanced,
    Transcript,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub editor: EditorView,
}

/// Entry highlighted in the contacts view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ContactSelection {
    Person(String),
    Organization(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactsView {
    pub selected: Option<ContactSelection>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarMode {
    #[default]
    Month,
    Week,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarView {
    pub mode: CalendarMode,
}

/// View state for a tab, one variant per tab type that has any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TabPayload {
    Sessions(SessionView),
    Contacts(ContactsView),
    Calendars(CalendarView),
    /// Tab types without view state
    None,
}

impl TabPayload {
    /// Default view state for a freshly opened tab of this identity's type.
    pub fn default_for(identity: &TabIdentity) -> Self {
        match identity {
            TabIdentity::Sessions { .. } => TabPayload::Sessions(SessionView::default()),
            TabIdentity::Contacts => TabPayload::Contacts(ContactsView::default()),
            TabIdentity::Calendars => TabPayload::Calendars(CalendarView::default()),
            _ => TabPayload::None,
        }
    }

    /// Whether this payload belongs to the identity's tab type.
    pub fn matches(&self, identity: &TabIdentity) -> bool {
        match self {
            TabPayload::Sessions(_) => matches!(identity, TabIdentity::Sessions { .. }),
            TabPayload::Contacts(_) => *identity == TabIdentity::Contacts,
            TabPayload::Calendars(_) => *identity == TabIdentity::Calendars,
            TabPayload::None => TabPayload::default_for(identity) == TabPayload::None,
        }
    }
}
