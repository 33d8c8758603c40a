//! Fixed-timestep loop driver
//!
//! Each rendered frame measures the wall-clock delta, runs zero or more
//! 1/60 s simulation steps (at most `MAX_FRAMESKIP`), then renders once.
//! Input is dispatched before every step, or once when no step is due.

use std::time::Duration;

use crate::audio::SoundEffect;
use crate::consts::*;
use crate::platform::{InputEvent, Key, Platform};
use crate::scene::Scene;
use crate::settings::Settings;
use crate::sim::{GameEvent, MatchState, PhaseAction, TickInput, Trigger, tick};

/// Whether the host should keep running the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Exit,
}

/// Length of one simulation step
pub const SIM_STEP: Duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64);

/// Accumulator turning frame deltas into whole simulation steps
#[derive(Debug, Clone, Default)]
pub struct FixedTimestep {
    accumulator: Duration,
    last_frame: Option<Duration>,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps due at `now`. The first frame runs a single step. Time that
    /// would need more than `MAX_FRAMESKIP` steps is dropped.
    pub fn advance(&mut self, now: Duration) -> u32 {
        let delta = match self.last_frame {
            Some(prev) => now.saturating_sub(prev),
            None => SIM_STEP,
        };
        self.last_frame = Some(now);
        self.accumulator += delta.min(SIM_STEP * MAX_FRAMESKIP);

        let mut steps = 0;
        while self.accumulator >= SIM_STEP && steps < MAX_FRAMESKIP {
            self.accumulator -= SIM_STEP;
            steps += 1;
        }
        if self.accumulator >= SIM_STEP {
            log::debug!("Dropping {:?} of simulation backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        steps
    }
}

const FPS_WINDOW: usize = 60;

/// Frames per second over the last `FPS_WINDOW` frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [Option<Duration>; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self {
            frame_times: [None; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, now: Duration) {
        self.frame_times[self.frame_index] = Some(now);
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Slot after the newest is the oldest once the ring has filled
        if let Some(oldest) = self.frame_times[self.frame_index] {
            let elapsed = now.saturating_sub(oldest).as_secs_f64();
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// A running game: match state plus the loop bookkeeping around it
pub struct Game {
    state: MatchState,
    timestep: FixedTimestep,
    fps: FpsCounter,
    show_fps: bool,
    events: Vec<GameEvent>,
    steps_last_frame: u32,
}

impl Game {
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: MatchState::new(),
            timestep: FixedTimestep::new(),
            fps: FpsCounter::new(),
            show_fps: settings.show_fps,
            events: Vec::new(),
            steps_last_frame: 0,
        }
    }

    /// Run one frame against `platform`
    pub fn frame<P: Platform>(&mut self, platform: &mut P) -> FrameOutcome {
        let now = platform.now();
        let steps = self.timestep.advance(now);
        self.fps.record(now);
        self.steps_last_frame = steps;

        if steps == 0 && self.dispatch_events(platform) == FrameOutcome::Exit {
            return FrameOutcome::Exit;
        }

        for _ in 0..steps {
            if self.dispatch_events(platform) == FrameOutcome::Exit {
                return FrameOutcome::Exit;
            }
            let input = TickInput {
                up: platform.is_key_held(Key::Up),
                down: platform.is_key_held(Key::Down),
            };
            tick(&mut self.state, &input, SIM_DT_MS, &mut self.events);
            for event in self.events.drain(..) {
                platform.play(SoundEffect::for_event(event));
            }
        }

        platform.render(&self.scene());
        FrameOutcome::Continue
    }

    fn dispatch_events<P: Platform>(&mut self, platform: &mut P) -> FrameOutcome {
        while let Some(event) = platform.poll_event() {
            if self.handle_event(event) == FrameOutcome::Exit {
                return FrameOutcome::Exit;
            }
        }
        FrameOutcome::Continue
    }

    /// Apply a single input event
    pub fn handle_event(&mut self, event: InputEvent) -> FrameOutcome {
        match event {
            InputEvent::WindowClosed | InputEvent::KeyPressed(Key::Escape) => {
                log::info!("Quit requested");
                FrameOutcome::Exit
            }
            InputEvent::KeyPressed(_) => {
                match self.state.phase.transition(Trigger::AnyKey) {
                    PhaseAction::Stay => {}
                    PhaseAction::Enter(phase) => {
                        log::info!("{} -> {}", self.state.phase.as_str(), phase.as_str());
                        self.state.phase = phase;
                    }
                    PhaseAction::Restart => {
                        log::info!("Restarting match after {}", self.state.score);
                        self.state.restart();
                    }
                }
                FrameOutcome::Continue
            }
        }
    }

    /// What to draw for the current state
    pub fn scene(&self) -> Scene {
        Scene::build(&self.state, self.show_fps.then(|| self.fps.fps()))
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    /// Simulation steps run by the most recent frame
    pub fn steps_last_frame(&self) -> u32 {
        self.steps_last_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::MatchPhase;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_first_frame_runs_one_step() {
        let mut ts = FixedTimestep::new();
        assert_eq!(ts.advance(ms(5000)), 1);
    }

    #[test]
    fn test_steps_follow_elapsed_time() {
        let mut ts = FixedTimestep::new();
        ts.advance(ms(0));
        assert_eq!(ts.advance(ms(10)), 0);
        // 10 + 10 ms crosses one 16.6 ms step
        assert_eq!(ts.advance(ms(20)), 1);
        assert_eq!(ts.advance(ms(70)), 3);
    }

    #[test]
    fn test_catch_up_is_capped_and_backlog_dropped() {
        let mut ts = FixedTimestep::new();
        ts.advance(ms(0));
        assert_eq!(ts.advance(ms(10_000)), MAX_FRAMESKIP);
        // Nothing left over from the stall
        assert_eq!(ts.advance(ms(10_001)), 0);
    }

    #[test]
    fn test_clock_going_backwards_runs_nothing() {
        let mut ts = FixedTimestep::new();
        ts.advance(ms(1000));
        assert_eq!(ts.advance(ms(500)), 0);
        assert_eq!(ts.advance(ms(520)), 1);
    }

    #[test]
    fn test_fps_counter() {
        let mut fps = FpsCounter::new();
        for frame in 0..120u64 {
            fps.record(Duration::from_micros(frame * 16_667));
        }
        assert_eq!(fps.fps(), 60);
    }

    #[test]
    fn test_fps_unknown_until_window_fills() {
        let mut fps = FpsCounter::new();
        for frame in 0..10u64 {
            fps.record(ms(frame * 16));
        }
        assert_eq!(fps.fps(), 0);
    }

    #[test]
    fn test_any_key_walks_the_phase_machine() {
        let mut game = Game::new(&Settings::default());
        assert_eq!(game.state().phase, MatchPhase::Intro);

        assert_eq!(game.handle_event(InputEvent::KeyPressed(Key::Other)), FrameOutcome::Continue);
        assert_eq!(game.state().phase, MatchPhase::Playing);

        // Keys during play don't change phase
        game.handle_event(InputEvent::KeyPressed(Key::Up));
        assert_eq!(game.state().phase, MatchPhase::Playing);

        game.state_mut().phase = MatchPhase::P1Lost;
        game.state_mut().score.p2 = 11;
        game.handle_event(InputEvent::KeyPressed(Key::Down));
        assert_eq!(game.state().phase, MatchPhase::Playing);
        assert_eq!(game.state().score.p2, 0);
    }

    #[test]
    fn test_escape_and_close_exit() {
        let mut game = Game::new(&Settings::default());
        assert_eq!(game.handle_event(InputEvent::KeyPressed(Key::Escape)), FrameOutcome::Exit);
        assert_eq!(game.handle_event(InputEvent::WindowClosed), FrameOutcome::Exit);
    }

    #[test]
    fn test_scene_shows_fps_only_when_enabled() {
        let game = Game::new(&Settings::default());
        assert!(!game.scene().labels().any(|l| l.text.ends_with("fps ")));

        let settings = Settings {
            show_fps: true,
            ..Default::default()
        };
        let game = Game::new(&settings);
        assert!(game.scene().labels().any(|l| l.text == "0 fps "));
    }
}
