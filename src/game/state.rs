//! Player state and the cookie wire codec.
//!
//! The entire game state is a `(treasure, health)` pair carried in the client
//! cookie as `"<treasure>&<health>"`. There is no server-side session: every
//! request decodes the header, every response re-emits a fresh pair.

/// Health a player starts a fresh game with.
pub const STARTING_HEALTH: i64 = 1000;

/// Separator between the treasure and health fields on the wire.
const FIELD_SEPARATOR: char = '&';

/// The per-player game state, round-tripped through the client cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerState {
    /// Cumulative treasure collected across visited levels.
    pub treasure: i64,
    /// Remaining life. May go negative; the engine never clamps.
    pub health: i64,
}

impl PlayerState {
    /// State handed to a player on their first request: no treasure, full health.
    pub fn fresh() -> Self {
        PlayerState {
            treasure: 0,
            health: STARTING_HEALTH,
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        PlayerState::fresh()
    }
}

/// Parse an integer the forgiving way: optional leading sign, then decimal
/// digits, stopping at the first non-digit. Anything unparsable is 0.
///
/// Reward/damage amounts in level config and both cookie fields go through
/// this, so a malformed value degrades to "no effect" instead of failing the
/// request.
pub fn parse_amount(s: &str) -> i64 {
    let mut chars = s.chars().peekable();
    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };
    let mut value: i64 = 0;
    let mut saw_digit = false;
    for ch in chars {
        match ch.to_digit(10) {
            Some(d) => {
                saw_digit = true;
                value = value.wrapping_mul(10).wrapping_add(d as i64);
            }
            None => break,
        }
    }
    if !saw_digit {
        return 0;
    }
    if negative {
        -value
    } else {
        value
    }
}

/// Decode an incoming cookie header into a [`PlayerState`].
///
/// Returns the state plus whether any prior state was present at all. A
/// missing header yields the fresh state and `false`; a present header yields
/// `true` no matter how malformed it is. Fields beyond the second are
/// ignored; a missing health field decodes to 0.
pub fn decode(cookie_header: Option<&str>) -> (PlayerState, bool) {
    let raw = match cookie_header {
        Some(raw) => raw,
        None => return (PlayerState::fresh(), false),
    };
    let mut fields = raw.split(FIELD_SEPARATOR);
    let treasure = fields.next().map(parse_amount).unwrap_or(0);
    let health = fields.next().map(parse_amount).unwrap_or(0);
    (PlayerState { treasure, health }, true)
}

/// Serialize a [`PlayerState`] into the outgoing cookie value.
pub fn encode(state: PlayerState) -> String {
    format!("{}{}{}", state.treasure, FIELD_SEPARATOR, state.health)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_cookie_yields_fresh_state() {
        let (state, had_prior) = decode(None);
        assert_eq!(state, PlayerState::fresh());
        assert_eq!(state.treasure, 0);
        assert_eq!(state.health, 1000);
        assert!(!had_prior);
    }

    #[test]
    fn well_formed_cookie_round_trips() {
        for (t, h) in [(0, 1000), (50, 800), (-3, -40), (987654321, 0)] {
            let state = PlayerState {
                treasure: t,
                health: h,
            };
            let (decoded, had_prior) = decode(Some(&encode(state)));
            assert_eq!(decoded, state);
            assert!(had_prior);
        }
    }

    #[test]
    fn encode_is_plain_decimal() {
        assert_eq!(
            encode(PlayerState {
                treasure: 60,
                health: 780
            }),
            "60&780"
        );
        assert_eq!(
            encode(PlayerState {
                treasure: -5,
                health: 0
            }),
            "-5&0"
        );
    }

    #[test]
    fn malformed_fields_decode_to_zero() {
        let (state, had_prior) = decode(Some("abc&800"));
        assert_eq!(state.treasure, 0);
        assert_eq!(state.health, 800);
        assert!(had_prior);

        let (state, _) = decode(Some("&"));
        assert_eq!(state, PlayerState { treasure: 0, health: 0 });
    }

    #[test]
    fn single_field_cookie_defaults_health_to_zero() {
        let (state, had_prior) = decode(Some("42"));
        assert_eq!(state.treasure, 42);
        assert_eq!(state.health, 0);
        assert!(had_prior);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let (state, _) = decode(Some("1&2&3&4"));
        assert_eq!(state, PlayerState { treasure: 1, health: 2 });
    }

    #[test]
    fn parse_amount_is_forgiving() {
        assert_eq!(parse_amount("10"), 10);
        assert_eq!(parse_amount("-20"), -20);
        assert_eq!(parse_amount("+7"), 7);
        assert_eq!(parse_amount("15gold"), 15);
        assert_eq!(parse_amount("gold"), 0);
        assert_eq!(parse_amount(""), 0);
        assert_eq!(parse_amount("-"), 0);
    }
}
