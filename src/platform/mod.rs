//! Platform abstraction layer
//!
//! The loop driver talks to the outside world only through [`Platform`]:
//! - Time (monotonic, for frame deltas)
//! - Input events and held keys
//! - Fire-and-forget sound playback
//! - Drawing one frame

pub mod input;
pub mod time;

use std::time::Duration;

use crate::audio::SoundEffect;
use crate::scene::Scene;

pub use input::{InputEvent, InputQueue, Key};
pub use time::SystemClock;

/// Services the game loop consumes from the host
pub trait Platform {
    /// Monotonic time since an arbitrary epoch
    fn now(&self) -> Duration;

    /// Pop the next queued input event
    fn poll_event(&mut self) -> Option<InputEvent>;

    /// Whether `key` is currently held down
    fn is_key_held(&self, key: Key) -> bool;

    /// Start playing a sound; never blocks
    fn play(&mut self, sound: SoundEffect);

    /// Draw a complete frame
    fn render(&mut self, scene: &Scene);
}
