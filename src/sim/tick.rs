//! Fixed timestep simulation tick
//!
//! Advances a match by one step. Only the `Playing` phase simulates; the
//! other phases wait for input handled by the loop driver.

use super::collision::resolve_collisions;
use super::phase::{MatchPhase, PhaseAction, Trigger};
use super::state::{GameEvent, MatchState};
use crate::consts::*;

/// Held-key state sampled for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move player one's paddle up
    pub up: bool,
    /// Move player one's paddle down (ignored while `up` is held)
    pub down: bool,
}

/// Advance the match by `elapsed_ms`, appending anything that happened to
/// `events`
pub fn tick(
    state: &mut MatchState,
    input: &TickInput,
    elapsed_ms: f32,
    events: &mut Vec<GameEvent>,
) {
    if state.phase != MatchPhase::Playing {
        return;
    }

    move_player(state, input, elapsed_ms);
    move_autopilot(state, elapsed_ms);
    resolve_collisions(state, events);
    state.ball.advance(elapsed_ms);

    if let Some(winner) = state.score.winner() {
        if let PhaseAction::Enter(phase) = state.phase.transition(Trigger::MatchDecided(winner)) {
            log::info!("Match decided {} ({})", state.score, phase.as_str());
            state.phase = phase;
        }
    }
}

/// Player one follows the held keys
fn move_player(state: &mut MatchState, input: &TickInput, elapsed_ms: f32) {
    let step = MOVE_DISTANCE * elapsed_ms / PLAYER_RATE_DIVISOR;
    if input.up {
        state.player1.move_by(-step);
    } else if input.down {
        state.player1.move_by(step);
    }
}

/// Player two chases the ball, a little quicker going up than down
fn move_autopilot(state: &mut MatchState, elapsed_ms: f32) {
    let ball = &state.ball;
    let paddle = &mut state.player2;
    if ball.pos.y < paddle.pos.y {
        paddle.move_by(-MOVE_DISTANCE * elapsed_ms / AUTOPILOT_UP_DIVISOR);
    } else if ball.pos.y + ball.radius > paddle.pos.y + paddle.size.y {
        paddle.move_by(MOVE_DISTANCE * elapsed_ms / AUTOPILOT_DOWN_DIVISOR);
    }
}
