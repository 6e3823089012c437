//! Default values for tab manager settings.

pub fn history_limit() -> usize {
    50 // Entries kept per slot
}

pub fn analytics_enabled() -> bool {
    true
}

pub fn replace_in_place() -> bool {
    true
}

pub fn wrap_navigation() -> bool {
    true
}
