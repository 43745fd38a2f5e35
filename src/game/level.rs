//! Resolved per-route level content and the reward/damage applier.

use super::state::{parse_amount, PlayerState};

/// Fully resolved content for one route, produced by configuration
/// resolution before the server starts taking requests. Read-only from the
/// request path.
///
/// `left_path`/`left_label` are always set as a pair: both empty means the
/// level has no left choice (the first level of a game, typically).
/// `treasure_reward` and `damage_amount` stay string-encoded the way the
/// operator wrote them; [`apply`] parses them forgivingly on every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelDescriptor {
    pub title: String,
    pub description: String,
    pub left_path: String,
    pub left_label: String,
    pub right_path: String,
    pub right_label: String,
    pub treasure_reward: String,
    pub damage_amount: String,
    /// Raw template text, present only when the operator configured one and
    /// it could be read at resolution time.
    pub template: Option<String>,
}

impl LevelDescriptor {
    /// True when the level offers no left choice.
    pub fn has_left_choice(&self) -> bool {
        !self.left_path.is_empty() || !self.left_label.is_empty()
    }
}

/// Fold a level's reward and damage into the player state.
///
/// Treasure goes up by the parsed reward, health down by the parsed damage.
/// Unparsable amounts count as 0. No clamping: health may go negative,
/// treasure has no cap. Presentation layers are free to read negative health
/// as a lost game; this engine does not.
pub fn apply(state: PlayerState, level: &LevelDescriptor) -> PlayerState {
    PlayerState {
        treasure: state.treasure + parse_amount(&level.treasure_reward),
        health: state.health - parse_amount(&level.damage_amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(reward: &str, damage: &str) -> LevelDescriptor {
        LevelDescriptor {
            treasure_reward: reward.to_string(),
            damage_amount: damage.to_string(),
            ..LevelDescriptor::default()
        }
    }

    #[test]
    fn reward_adds_and_damage_subtracts() {
        let state = PlayerState {
            treasure: 50,
            health: 800,
        };
        let next = apply(state, &level("10", "20"));
        assert_eq!(next.treasure, 60);
        assert_eq!(next.health, 780);
    }

    #[test]
    fn non_numeric_amounts_count_as_zero() {
        let state = PlayerState {
            treasure: 5,
            health: 100,
        };
        let next = apply(state, &level("plenty", "ouch"));
        assert_eq!(next, state);
    }

    #[test]
    fn health_is_not_clamped() {
        let state = PlayerState {
            treasure: 0,
            health: 10,
        };
        let next = apply(state, &level("0", "50"));
        assert_eq!(next.health, -40);
    }

    #[test]
    fn apply_is_deterministic() {
        let state = PlayerState {
            treasure: 1,
            health: 2,
        };
        let l = level("3", "4");
        assert_eq!(apply(state, &l), apply(state, &l));
    }

    #[test]
    fn left_choice_detection() {
        let mut l = LevelDescriptor::default();
        assert!(!l.has_left_choice());
        l.left_path = "/cyp".to_string();
        l.left_label = "Back to stage 1.".to_string();
        assert!(l.has_left_choice());
    }
}
