//! Decides whether a request may see level content.
//!
//! A player who shows up mid-game without a cookie did not start at the
//! beginning, so they get a restart prompt instead of the level. The entry
//! route is always visible; any cookie at all, however malformed, also
//! counts as having started.

/// Outcome of the gate check for one request. Never persisted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Visibility {
    /// Render level content.
    Visible,
    /// Render the start-over prompt only.
    Blocked,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        matches!(self, Visibility::Visible)
    }
}

/// Gate a request: visible when prior state was presented or the request is
/// for the canonical entry route.
pub fn decide(had_prior_state: bool, route: &str, entry_route: &str) -> Visibility {
    if had_prior_state || route == entry_route {
        Visibility::Visible
    } else {
        Visibility::Blocked
    }
}
