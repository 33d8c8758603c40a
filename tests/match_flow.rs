//! Drives the game loop through a scripted platform

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use glam::Vec2;
use ping_pong::audio::SoundEffect;
use ping_pong::consts::MAX_FRAMESKIP;
use ping_pong::platform::{InputEvent, Key, Platform};
use ping_pong::scene::Scene;
use ping_pong::sim::{MatchPhase, Score};
use ping_pong::{FrameOutcome, Game, Settings};

#[derive(Default)]
struct FakePlatform {
    now: Duration,
    events: VecDeque<InputEvent>,
    held: HashSet<Key>,
    played: Vec<SoundEffect>,
    renders: usize,
    last_scene: Option<Scene>,
}

impl FakePlatform {
    fn press(&mut self, key: Key) {
        self.events.push_back(InputEvent::KeyPressed(key));
    }

    fn advance_ms(&mut self, ms: u64) {
        self.now += Duration::from_millis(ms);
    }
}

impl Platform for FakePlatform {
    fn now(&self) -> Duration {
        self.now
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }

    fn is_key_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn play(&mut self, sound: SoundEffect) {
        self.played.push(sound);
    }

    fn render(&mut self, scene: &Scene) {
        self.renders += 1;
        self.last_scene = Some(scene.clone());
    }
}

fn playing_game() -> Game {
    let mut game = Game::new(&Settings::default());
    game.state_mut().phase = MatchPhase::Playing;
    game
}

#[test]
fn test_any_key_leaves_intro() {
    let mut game = Game::new(&Settings::default());
    let mut platform = FakePlatform::default();

    assert_eq!(game.frame(&mut platform), FrameOutcome::Continue);
    assert_eq!(game.state().phase, MatchPhase::Intro);

    platform.press(Key::Other);
    platform.advance_ms(17);
    assert_eq!(game.frame(&mut platform), FrameOutcome::Continue);
    assert_eq!(game.state().phase, MatchPhase::Playing);

    let scene = platform.last_scene.as_ref().unwrap();
    assert!(scene.labels().any(|l| l.text == "0   0"));
}

#[test]
fn test_one_render_per_frame() {
    let mut game = playing_game();
    let mut platform = FakePlatform::default();
    for _ in 0..30 {
        game.frame(&mut platform);
        platform.advance_ms(7);
    }
    assert_eq!(platform.renders, 30);
}

#[test]
fn test_long_stall_is_capped() {
    let mut game = playing_game();
    let mut platform = FakePlatform::default();
    game.frame(&mut platform);

    platform.advance_ms(5_000);
    game.frame(&mut platform);
    assert_eq!(game.steps_last_frame(), MAX_FRAMESKIP);
    assert_eq!(platform.renders, 2);

    // Backlog was dropped rather than replayed
    platform.advance_ms(1);
    game.frame(&mut platform);
    assert_eq!(game.steps_last_frame(), 0);
}

#[test]
fn test_escape_exits() {
    let mut game = playing_game();
    let mut platform = FakePlatform::default();
    platform.press(Key::Escape);
    assert_eq!(game.frame(&mut platform), FrameOutcome::Exit);
}

#[test]
fn test_close_exits_when_no_step_is_due() {
    let mut game = Game::new(&Settings::default());
    let mut platform = FakePlatform::default();
    game.frame(&mut platform);

    platform.events.push_back(InputEvent::WindowClosed);
    platform.advance_ms(1);
    assert_eq!(game.frame(&mut platform), FrameOutcome::Exit);
    assert_eq!(game.steps_last_frame(), 0);
}

#[test]
fn test_held_up_key_moves_player_one() {
    let mut game = playing_game();
    let mut platform = FakePlatform::default();
    platform.held.insert(Key::Up);

    let start = game.state().player1.pos.y;
    game.frame(&mut platform);
    let moved = start - game.state().player1.pos.y;
    // One 1/60 s step at 20 px per 50 ms
    assert!((moved - 20.0 / 3.0).abs() < 1e-3);
}

#[test]
fn test_goal_plays_sound_and_scores() {
    let mut game = playing_game();
    let mut platform = FakePlatform::default();
    {
        let ball = &mut game.state_mut().ball;
        ball.pos = Vec2::new(660.0, 240.0);
        ball.vel = Vec2::new(0.3, 0.0);
    }

    game.frame(&mut platform);

    assert_eq!(game.state().score, Score { p1: 1, p2: 0 });
    assert!(platform.played.contains(&SoundEffect::Blam));
    assert_eq!(game.state().phase, MatchPhase::Playing);
}

#[test]
fn test_deciding_goal_ends_match_and_key_restarts() {
    let mut game = playing_game();
    let mut platform = FakePlatform::default();
    {
        let state = game.state_mut();
        state.score = Score { p1: 10, p2: 9 };
        state.ball.pos = Vec2::new(660.0, 240.0);
    }

    game.frame(&mut platform);
    assert_eq!(game.state().phase, MatchPhase::P1Won);
    assert_eq!(game.state().score, Score { p1: 11, p2: 9 });

    // Nothing moves while the result is shown
    let ball = game.state().ball.clone();
    platform.advance_ms(100);
    game.frame(&mut platform);
    assert_eq!(game.state().ball, ball);

    platform.press(Key::Other);
    platform.advance_ms(17);
    game.frame(&mut platform);
    assert_eq!(game.state().phase, MatchPhase::Playing);
    assert_eq!(game.state().score, Score::default());
}
