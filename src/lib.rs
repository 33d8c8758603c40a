//! Ping Pong 2 - a single-screen two-paddle arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, match phases)
//! - `game_loop`: Fixed-timestep driver over a `Platform`
//! - `platform`: Clock/input/audio/render boundary
//! - `scene`: What gets drawn for each phase
//! - `renderer`: wgpu pipeline, shape tessellation, text rasterization
//! - `settings`: User preferences

pub mod assets;
pub mod audio;
pub mod error;
pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::{AssetError, StartupError};
pub use game_loop::{FrameOutcome, Game};
pub use settings::Settings;

/// Game configuration constants
///
/// Units: pixels and milliseconds. Velocities are pixels per millisecond.
pub mod consts {
    /// Simulation rate
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Length of one simulation step in milliseconds
    pub const SIM_DT_MS: f32 = 1000.0 / TICKS_PER_SECOND as f32;
    /// Maximum catch-up steps per rendered frame to prevent spiral of death
    pub const MAX_FRAMESKIP: u32 = 10;

    /// Playfield / window dimensions
    pub const WIDTH: f32 = 640.0;
    pub const HEIGHT: f32 = 480.0;
    /// Wall thickness, also the paddle width
    pub const BORDER_SIZE: f32 = 12.0;
    /// Distance between a paddle and its side of the screen
    pub const MARGIN: f32 = 50.0;

    /// Paddle travel per `PLAYER_RATE_DIVISOR` milliseconds
    pub const MOVE_DISTANCE: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 90.0;
    /// Paddles start this far above the vertical centre
    pub const PADDLE_START_OFFSET: f32 = 25.0;
    /// Gap kept between a paddle and the top/bottom walls
    pub const PADDLE_WALL_GAP: f32 = 5.0;
    pub const PLAYER_RATE_DIVISOR: f32 = 50.0;
    /// Autopilot moves up faster than it moves down; keeps it beatable
    pub const AUTOPILOT_UP_DIVISOR: f32 = 40.0;
    pub const AUTOPILOT_DOWN_DIVISOR: f32 = 50.0;

    pub const BALL_RADIUS: f32 = 10.0;
    /// Serve speed on both axes
    pub const BALL_BASE_SPEED: f32 = 0.3;
    /// Velocity scale on every accepted paddle hit (unbounded on purpose)
    pub const PADDLE_HIT_SPEEDUP: f32 = 1.02;
    /// Offset from paddle centre (px) divided by this gives vertical speed
    pub const SPIN_DIVISOR: f32 = 100.0;
    /// Gap between the serving paddle and the ball
    pub const SERVE_GAP: f32 = 5.0;

    /// Drawn outline thickness; collision bounds include it
    pub const WALL_OUTLINE: f32 = 3.0;
    pub const PADDLE_OUTLINE: f32 = 3.0;
    pub const BALL_OUTLINE: f32 = 2.0;

    /// First to this score...
    pub const WIN_SCORE: u32 = 11;
    /// ...with at least this lead wins the match
    pub const WIN_MARGIN: u32 = 2;
}

/// Integer clamp (paddles are snapped to whole pixels when bounded)
#[inline]
pub fn clamp_i32(x: i32, lo: i32, hi: i32) -> i32 {
    x.max(lo).min(hi)
}
