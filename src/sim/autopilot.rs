//! Demo-mode driver
//!
//! Walks right and hops over pits. Toggled with `I` in the browser and
//! drives the headless native run.

use super::session::Session;
use super::state::Intent;

/// Jump when the platform underfoot ends within this distance ahead
const EDGE_LOOKAHEAD: f32 = 10.0;

/// Intents to post before the next tick
pub fn autopilot_intents(session: &Session) -> Vec<Intent> {
    let state = session.state();
    if !state.is_playing() {
        return Vec::new();
    }

    let mut intents = Vec::with_capacity(3);
    if state.move_left_held {
        intents.push(Intent::MoveLeft(false));
    }
    if !state.move_right_held {
        intents.push(Intent::MoveRight(true));
    }

    if state.grounded && near_edge(session) {
        intents.push(Intent::Jump);
    }
    intents
}

/// Whether the platform supporting the player ends just ahead
fn near_edge(session: &Session) -> bool {
    let player = session.player_rect();
    let level_end = session.config().level_width;

    let support_end = session
        .active_level()
        .geometry
        .platforms
        .iter()
        .filter(|p| p.top() == player.bottom() && player.overlaps_horizontally(p))
        .map(|p| p.right())
        .reduce(f32::max);

    match support_end {
        Some(end) => end < level_end && end - player.right() <= EDGE_LOOKAHEAD,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_LEVEL;
    use crate::sim::state::ScreenState;

    fn run(session: &mut Session, max_ticks: usize) {
        for _ in 0..max_ticks {
            for intent in autopilot_intents(session) {
                session.apply_intent(intent);
            }
            session.tick();
            if !session.state().is_playing() {
                break;
            }
        }
    }

    #[test]
    fn test_idle_when_not_playing() {
        let session = Session::default();
        assert!(autopilot_intents(&session).is_empty());
    }

    #[test]
    fn test_autopilot_finishes_builtin_levels() {
        let mut session = Session::default();
        session.start();
        run(&mut session, 5000);
        let state = session.state();
        assert_eq!(state.screen, ScreenState::Won);
        assert_eq!(state.level, MAX_LEVEL);
        assert_eq!(state.lives, 3);
        assert!(state.score > 0);
    }
}
