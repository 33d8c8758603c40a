//! Collision detection and response
//!
//! Box intersection is the only detection primitive. Each case below is
//! independent and runs every tick in a fixed order, so one tick can both
//! clamp a paddle and bounce the ball.

use std::f32::consts::FRAC_PI_2;

use super::state::{Ball, GameEvent, MatchState, Paddle, Player, Walls};
use crate::clamp_i32;
use crate::consts::{PADDLE_HIT_SPEEDUP, SPIN_DIVISOR};

/// Run every collision case once, in order, recording what happened
pub fn resolve_collisions(state: &mut MatchState, events: &mut Vec<GameEvent>) {
    // Keep both paddles inside the playable band
    for player in [Player::One, Player::Two] {
        let walls = &state.walls;
        let paddle = match player {
            Player::One => &mut state.player1,
            Player::Two => &mut state.player2,
        };
        if bound_paddle(paddle, walls) {
            events.push(GameEvent::PaddleBump(player));
        }
    }

    if bounce_off_walls(&mut state.ball, &state.walls) {
        events.push(GameEvent::WallBounce);
    }

    if state.ball.bounds().intersects(&state.player1.bounds()) {
        if return_ball(&mut state.ball, &state.player1, Player::One) {
            events.push(GameEvent::PaddleHit(Player::One));
        }
    } else if state.ball.bounds().intersects(&state.player2.bounds())
        && return_ball(&mut state.ball, &state.player2, Player::Two)
    {
        events.push(GameEvent::PaddleHit(Player::Two));
    }

    if let Some(scorer) = goal_scored(&state.ball, &state.walls) {
        state.score.add_point(scorer);
        log::debug!("{:?} scored, score now {}", scorer, state.score);
        // Scorer serves toward the player who conceded
        state.serve_from(scorer);
        events.push(GameEvent::Goal(scorer));
    }
}

/// Clamp a paddle into the legal band when it touches a wall or has left
/// the band. Returns true if the paddle was clamped.
pub fn bound_paddle(paddle: &mut Paddle, walls: &Walls) -> bool {
    let bounds = paddle.bounds();
    let touching =
        bounds.intersects(&walls.top.bounds()) || bounds.intersects(&walls.bottom.bounds());
    let (lo, hi) = walls.paddle_band(paddle.size.y);
    let y = paddle.pos.y;

    if touching || y < lo as f32 || y > hi as f32 {
        paddle.pos.y = clamp_i32(y as i32, lo, hi) as f32;
        true
    } else {
        false
    }
}

/// Reflect the ball off the top (or else bottom) wall. The ball is moved
/// back by twice its penetration so it never rests inside a wall.
pub fn bounce_off_walls(ball: &mut Ball, walls: &Walls) -> bool {
    let b = ball.bounds();
    let top = walls.top.bounds();
    let bottom = walls.bottom.bounds();

    let penetration = if b.intersects(&top) {
        top.bottom() - b.top()
    } else if b.intersects(&bottom) {
        bottom.top() - b.bottom()
    } else {
        return false;
    };

    ball.vel.y = -ball.vel.y;
    ball.pos.y += 2.0 * penetration;
    true
}

/// Angle of the vector from paddle centre to ball centre, with each axis
/// normalized by the paddle's extent. Near zero means the ball is to the
/// right of the paddle, near ±π to the left.
pub fn hit_angle(ball: &Ball, paddle: &Paddle) -> f32 {
    let p = paddle.bounds();
    let om = (ball.bounds().center() - p.center()) / p.size();
    om.y.atan2(om.x)
}

/// Send the ball back from `paddle` if it arrives from the open side.
/// Returns true on an accepted hit.
pub fn return_ball(ball: &mut Ball, paddle: &Paddle, player: Player) -> bool {
    let angle = hit_angle(ball, paddle);
    let accepted = match player {
        Player::One => angle.abs() < FRAC_PI_2,
        Player::Two => angle.abs() > FRAC_PI_2,
    };
    if !accepted {
        return false;
    }

    let p = paddle.bounds();
    let b = ball.bounds();

    // Spin from where the ball met the paddle
    ball.vel.y = (b.center().y - p.center().y) / SPIN_DIVISOR;

    match player {
        Player::One => {
            ball.vel.x = ball.vel.x.abs();
            ball.pos.x += 2.0 * (p.right() - b.left());
        }
        Player::Two => {
            ball.vel.x = -ball.vel.x.abs();
            ball.pos.x -= 2.0 * (b.right() - p.left());
        }
    }

    ball.vel *= PADDLE_HIT_SPEEDUP;
    true
}

/// Player who scored, if the ball reached a goal sensor
pub fn goal_scored(ball: &Ball, walls: &Walls) -> Option<Player> {
    let b = ball.bounds();
    if b.intersects(&walls.left.bounds()) {
        Some(Player::Two)
    } else if b.intersects(&walls.right.bounds()) {
        Some(Player::One)
    } else {
        None
    }
}
