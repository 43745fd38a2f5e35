//! Per-request orchestration: decode, apply, gate, render, re-encode.

use log::debug;

use crate::logutil::client_preview;

use super::gate;
use super::level::{apply, LevelDescriptor};
use super::render::{render, RenderContext};
use super::state;

/// Content type of every engine response.
pub const CONTENT_TYPE: &str = "text/html";

/// What the engine hands back to the host for one request. The host emits
/// the body with a success status and always sets the cookie, even on a
/// blocked request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResponse {
    pub body: String,
    pub cookie: String,
}

/// Run one request through the engine.
///
/// The host supplies the request path, the raw `Cookie` header if one came
/// in, and the already-resolved descriptor for the route. Nothing here
/// fails: malformed cookies decode to zeros and the gate decision is a
/// normal outcome, so the host can always answer with a success status.
///
/// A blocked request did not visit the level, so its outgoing cookie is the
/// pre-delta state (the fresh default, since blocking only happens without a
/// cookie). Visible requests get the level's reward/damage folded into the
/// outgoing cookie; the page shows the updated totals for a returning
/// player, and the untouched fresh stats on a first visit (the first page a
/// player sees says 0 and 1000, while their cookie already carries the entry
/// level's effects toward the next page).
pub fn handle(
    route: &str,
    cookie_header: Option<&str>,
    level: &LevelDescriptor,
    entry_route: &str,
) -> GameResponse {
    let (prior, had_prior_state) = state::decode(cookie_header);
    let current = apply(prior, level);
    let visibility = gate::decide(had_prior_state, route, entry_route);
    let cookie = if visibility.is_visible() {
        state::encode(current)
    } else {
        state::encode(prior)
    };
    debug!(
        "route={} cookie_in={} prior={:?} visibility={:?} cookie_out={}",
        route,
        cookie_header.map(client_preview).unwrap_or_else(|| "<none>".to_string()),
        prior,
        visibility,
        cookie
    );
    let ctx = RenderContext {
        state: if had_prior_state { current } else { prior },
        level,
        visibility,
        entry_route,
    };
    GameResponse {
        body: render(&ctx),
        cookie,
    }
}
