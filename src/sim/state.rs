//! Match state and entity types
//!
//! Everything the simulation mutates lives in [`MatchState`], which the loop
//! owns and lends to `tick` by mutable reference.

use std::fmt;

use glam::Vec2;

use super::phase::MatchPhase;
use super::rect::Rect;
use crate::consts::*;

/// One of the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    /// Left paddle, keyboard controlled
    One,
    /// Right paddle, autopilot
    Two,
}

/// Something the resolver did this tick; the driver turns these into sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A paddle was pushed back inside the playable band
    PaddleBump(Player),
    /// Ball bounced off the top or bottom wall
    WallBounce,
    /// Ball was returned by a paddle
    PaddleHit(Player),
    /// Ball entered a goal sensor; carries the player who scored
    Goal(Player),
}

/// A paddle. `pos` is the top-left corner of the body (outline excluded).
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Paddle {
    pub fn new(x: f32) -> Self {
        Self {
            pos: Vec2::new(x, Self::start_y()),
            size: Vec2::new(BORDER_SIZE, PADDLE_HEIGHT),
        }
    }

    /// Paddle for the given side at its starting position
    pub fn for_player(player: Player) -> Self {
        match player {
            Player::One => Self::new(MARGIN - BORDER_SIZE),
            Player::Two => Self::new(WIDTH - MARGIN),
        }
    }

    pub fn start_y() -> f32 {
        HEIGHT / 2.0 - PADDLE_START_OFFSET
    }

    /// Drawn body, outline excluded
    pub fn body(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Collision bounds (body plus outline)
    pub fn bounds(&self) -> Rect {
        self.body().inflate(PADDLE_OUTLINE)
    }

    pub fn move_by(&mut self, dy: f32) {
        self.pos.y += dy;
    }
}

/// The ball. `pos` is the top-left corner of the circle's bounding square.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per millisecond
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
        }
    }

    pub fn diameter(&self) -> f32 {
        self.radius * 2.0
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius)
    }

    /// Collision bounds (bounding square plus outline)
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, Vec2::splat(self.diameter())).inflate(BALL_OUTLINE)
    }

    /// Advance by velocity over `elapsed_ms`
    pub fn advance(&mut self, elapsed_ms: f32) {
        self.pos += self.vel * elapsed_ms;
    }
}

/// A static wall body
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    pub body: Rect,
}

impl Wall {
    pub const fn new(body: Rect) -> Self {
        Self { body }
    }

    pub fn bounds(&self) -> Rect {
        self.body.inflate(WALL_OUTLINE)
    }
}

/// Top/bottom deflectors and the two off-screen goal sensors
#[derive(Debug, Clone, PartialEq)]
pub struct Walls {
    pub top: Wall,
    pub bottom: Wall,
    /// Goal sensor behind player one; contact scores for player two
    pub left: Wall,
    /// Goal sensor behind player two; contact scores for player one
    pub right: Wall,
}

impl Default for Walls {
    fn default() -> Self {
        let span = WIDTH + 4.0 * BORDER_SIZE;
        Self {
            top: Wall::new(Rect::new(-2.0 * BORDER_SIZE, 0.0, span, BORDER_SIZE)),
            bottom: Wall::new(Rect::new(
                -2.0 * BORDER_SIZE,
                HEIGHT - BORDER_SIZE,
                span,
                BORDER_SIZE,
            )),
            left: Wall::new(Rect::new(-3.0 * BORDER_SIZE, 0.0, BORDER_SIZE, HEIGHT)),
            right: Wall::new(Rect::new(
                WIDTH + 2.0 * BORDER_SIZE,
                0.0,
                BORDER_SIZE,
                HEIGHT,
            )),
        }
    }
}

impl Walls {
    /// Legal y range for a paddle's `pos.y`, as whole pixels
    pub fn paddle_band(&self, paddle_height: f32) -> (i32, i32) {
        let lo = self.top.bounds().bottom() + PADDLE_WALL_GAP;
        let hi = self.bottom.bounds().top() - paddle_height - PADDLE_WALL_GAP;
        (lo as i32, hi as i32)
    }
}

/// Points for both sides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub p1: u32,
    pub p2: u32,
}

impl Score {
    pub fn add_point(&mut self, player: Player) {
        match player {
            Player::One => self.p1 += 1,
            Player::Two => self.p2 += 1,
        }
    }

    /// Winner if someone has reached `WIN_SCORE` with a `WIN_MARGIN` lead
    pub fn winner(&self) -> Option<Player> {
        if self.p1 >= WIN_SCORE && self.p1 >= self.p2 + WIN_MARGIN {
            Some(Player::One)
        } else if self.p2 >= WIN_SCORE && self.p2 >= self.p1 + WIN_MARGIN {
            Some(Player::Two)
        } else {
            None
        }
    }
}

/// Score label as shown above the field
impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}   {}", self.p1, self.p2)
    }
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct MatchState {
    pub phase: MatchPhase,
    pub player1: Paddle,
    pub player2: Paddle,
    pub ball: Ball,
    pub walls: Walls,
    pub score: Score,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    /// Fresh match on the intro screen, ball ready to serve toward player two
    pub fn new() -> Self {
        let mut state = Self {
            phase: MatchPhase::Intro,
            player1: Paddle::for_player(Player::One),
            player2: Paddle::for_player(Player::Two),
            ball: Ball::new(Vec2::new(WIDTH / 2.0, HEIGHT / 2.0), Vec2::ZERO),
            walls: Walls::default(),
            score: Score::default(),
        };
        state.serve_from(Player::One);
        state
    }

    pub fn paddle(&self, player: Player) -> &Paddle {
        match player {
            Player::One => &self.player1,
            Player::Two => &self.player2,
        }
    }

    pub fn paddle_mut(&mut self, player: Player) -> &mut Paddle {
        match player {
            Player::One => &mut self.player1,
            Player::Two => &mut self.player2,
        }
    }

    /// Place the ball just outside `server`'s paddle at base speed,
    /// heading toward the opponent
    pub fn serve_from(&mut self, server: Player) {
        let paddle = self.paddle(server).bounds();
        let y = HEIGHT / 2.0;
        let (x, vx) = match server {
            Player::One => (paddle.right() + SERVE_GAP, BALL_BASE_SPEED),
            Player::Two => {
                let width = self.ball.bounds().width;
                (paddle.left() - width - SERVE_GAP, -BALL_BASE_SPEED)
            }
        };
        self.ball.pos = Vec2::new(x, y);
        self.ball.vel = Vec2::new(vx, BALL_BASE_SPEED);
    }

    /// Zero the score, recentre the paddles and serve toward player two
    pub fn restart(&mut self) {
        self.player1.pos.y = Paddle::start_y();
        self.player2.pos.y = Paddle::start_y();
        self.score = Score::default();
        self.serve_from(Player::One);
        self.phase = MatchPhase::Playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let state = MatchState::new();
        assert_eq!(state.phase, MatchPhase::Intro);
        assert_eq!(state.player1.pos, Vec2::new(38.0, 215.0));
        assert_eq!(state.player2.pos, Vec2::new(590.0, 215.0));
        // Served from player one: right of the paddle bounds plus the gap
        assert_eq!(state.ball.pos, Vec2::new(58.0, 240.0));
        assert_eq!(state.ball.vel, Vec2::new(0.3, 0.3));
    }

    #[test]
    fn test_serve_from_player_two() {
        let mut state = MatchState::new();
        state.serve_from(Player::Two);
        assert_eq!(state.ball.pos, Vec2::new(558.0, 240.0));
        assert_eq!(state.ball.vel, Vec2::new(-0.3, 0.3));
        assert!(state.ball.bounds().right() < state.player2.bounds().left());
    }

    #[test]
    fn test_paddle_band() {
        let walls = Walls::default();
        assert_eq!(walls.paddle_band(PADDLE_HEIGHT), (20, 370));
    }

    #[test]
    fn test_goal_sensors_are_off_screen() {
        let walls = Walls::default();
        assert!(walls.left.bounds().right() < 0.0);
        assert!(walls.right.bounds().left() > WIDTH);
    }

    #[test]
    fn test_score_label() {
        let score = Score { p1: 7, p2: 10 };
        assert_eq!(score.to_string(), "7   10");
        assert_eq!(Score::default().to_string(), "0   0");
    }

    #[test]
    fn test_winner_needs_eleven_and_two_point_lead() {
        assert_eq!(Score { p1: 11, p2: 9 }.winner(), Some(Player::One));
        assert_eq!(Score { p1: 11, p2: 10 }.winner(), None);
        assert_eq!(Score { p1: 10, p2: 8 }.winner(), None);
        assert_eq!(Score { p1: 12, p2: 14 }.winner(), Some(Player::Two));
        assert_eq!(Score { p1: 0, p2: 11 }.winner(), Some(Player::Two));
    }

    #[test]
    fn test_restart() {
        let mut state = MatchState::new();
        state.phase = MatchPhase::P1Lost;
        state.score = Score { p1: 4, p2: 11 };
        state.player1.pos.y = 20.0;
        state.player2.pos.y = 370.0;
        state.ball.vel = Vec2::new(-1.2, 0.4);

        state.restart();

        assert_eq!(state.phase, MatchPhase::Playing);
        assert_eq!(state.score, Score::default());
        assert_eq!(state.player1.pos.y, 215.0);
        assert_eq!(state.player2.pos.y, 215.0);
        assert_eq!(state.ball.vel, Vec2::new(0.3, 0.3));
        assert!(state.ball.pos.x > state.player1.bounds().right());
    }
}
