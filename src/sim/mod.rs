//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module renders, plays
//! sound, or reads the clock:
//! - Time arrives as an explicit millisecond step
//! - Input arrives as sampled key state
//! - Side effects leave as [`GameEvent`]s

pub mod collision;
pub mod phase;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::resolve_collisions;
pub use phase::{MatchPhase, PhaseAction, Trigger};
pub use rect::Rect;
pub use state::{Ball, GameEvent, MatchState, Paddle, Player, Score, Wall, Walls};
pub use tick::{TickInput, tick};
