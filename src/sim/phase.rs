//! Match phase machine
//!
//! Intro → Playing → {P1Won, P1Lost} → Playing (via restart). Every legal
//! move is listed in [`MatchPhase::transition`]; anything else is `Stay`.

use super::state::Player;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPhase {
    /// Title screen, waiting for any key
    #[default]
    Intro,
    /// Active rally
    Playing,
    /// Player one won (terminal until restart)
    P1Won,
    /// Player one lost (terminal until restart)
    P1Lost,
}

/// What can move the phase machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Any key other than the quit key
    AnyKey,
    /// Score evaluation found a winner
    MatchDecided(Player),
}

/// Result of feeding a trigger to the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseAction {
    /// No transition
    Stay,
    /// Move to the given phase
    Enter(MatchPhase),
    /// Reset the match and resume play
    Restart,
}

impl MatchPhase {
    /// Transition table
    pub fn transition(self, trigger: Trigger) -> PhaseAction {
        use MatchPhase::*;
        match (self, trigger) {
            (Intro, Trigger::AnyKey) => PhaseAction::Enter(Playing),
            (P1Won | P1Lost, Trigger::AnyKey) => PhaseAction::Restart,
            (Playing, Trigger::MatchDecided(Player::One)) => PhaseAction::Enter(P1Won),
            (Playing, Trigger::MatchDecided(Player::Two)) => PhaseAction::Enter(P1Lost),
            _ => PhaseAction::Stay,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPhase::Intro => "Intro",
            MatchPhase::Playing => "Playing",
            MatchPhase::P1Won => "P1Won",
            MatchPhase::P1Lost => "P1Lost",
        }
    }
}
