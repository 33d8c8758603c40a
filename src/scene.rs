//! Scene description
//!
//! Turns the match state into a flat, ordered list of things to draw. The
//! renderer only ever sees a [`Scene`]; it knows nothing about the match.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{MatchPhase, MatchState, Rect};

/// Linear RGBA in 0..1
pub type Color = [f32; 4];

/// Color from 8-bit channels
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::{Color, rgba};

    pub const BACKGROUND: Color = rgba(255, 255, 255, 255);
    pub const WALL: Color = rgba(100, 100, 100, 255);
    pub const WALL_OUTLINE: Color = rgba(0, 0, 255, 255);
    pub const PADDLE: Color = rgba(0, 122, 245, 255);
    pub const PADDLE_OUTLINE: Color = rgba(255, 0, 0, 255);
    pub const BALL: Color = rgba(255, 255, 0, 255);
    pub const BALL_OUTLINE: Color = rgba(255, 0, 0, 255);
    pub const MIDDLE_LINE: Color = rgba(100, 100, 100, 30);
    pub const MIDDLE_LINE_OUTLINE: Color = rgba(0, 0, 100, 30);
    pub const TITLE: Color = rgba(0, 0, 255, 255);
    pub const PROMPT: Color = rgba(255, 0, 0, 255);
    pub const WON: Color = rgba(0, 255, 0, 255);
    pub const LOST: Color = rgba(255, 0, 0, 255);
    pub const SCORE: Color = rgba(0, 0, 100, 50);
    pub const FPS: Color = rgba(52, 0, 100, 50);
}

pub const TITLE_TEXT: &str = "Ping Pong Fun";
pub const PROMPT_TEXT: &str = "Press any key to start";
pub const WON_TEXT: &str = "You have won this game.\n\n Congratulations !";
pub const LOST_TEXT: &str = "You have lost this game, \n better luck next time!";

/// FPS counter top; x comes from the inset of [`FPS_INSET_SAMPLE`]
pub const FPS_LABEL_TOP: f32 = 40.0;
/// The counter is inset by half the width of a single zero
pub const FPS_INSET_SAMPLE: &str = "0";

/// How a label's position relates to its text block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `pos` is the top-left corner
    TopLeft,
    /// `pos.x` is the horizontal centre, `pos.y` the top
    CenterX,
    /// `pos` is the centre of the block
    Center,
    /// `pos` is the top-left corner, moved right by half the width of the
    /// sample text at the label's size
    InsetHalf(&'static str),
}

/// A line (or lines, split on `\n`) of text
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Character size in pixels
    pub size: f32,
    pub pos: Vec2,
    pub color: Color,
    pub align: Align,
}

/// A drawable primitive. Outlines are drawn outside the shape.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawItem {
    Rect {
        rect: Rect,
        fill: Color,
        outline: Color,
        outline_thickness: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: Color,
        outline: Color,
        outline_thickness: f32,
    },
    Text(Label),
}

/// One frame's worth of drawing, back to front
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub clear: Color,
    pub items: Vec<DrawItem>,
}

impl Scene {
    pub fn new(clear: Color) -> Self {
        Self {
            clear,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: DrawItem) {
        self.items.push(item);
    }

    /// All text labels, in draw order
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.items.iter().filter_map(|item| match item {
            DrawItem::Text(label) => Some(label),
            _ => None,
        })
    }

    /// Describe the current match. `fps` is drawn on top when given.
    pub fn build(state: &MatchState, fps: Option<u32>) -> Self {
        let mut scene = Scene::new(colors::BACKGROUND);

        match state.phase {
            MatchPhase::Intro => {
                scene.push(label(
                    TITLE_TEXT,
                    50.0,
                    Vec2::new(WIDTH / 2.0, 100.0),
                    colors::TITLE,
                    Align::CenterX,
                ));
                scene.push(label(
                    PROMPT_TEXT,
                    30.0,
                    Vec2::new(WIDTH / 2.0, 400.0),
                    colors::PROMPT,
                    Align::CenterX,
                ));
            }
            MatchPhase::Playing => push_field(&mut scene, state),
            MatchPhase::P1Won => {
                scene.push(label(WON_TEXT, 20.0, screen_center(), colors::WON, Align::Center));
            }
            MatchPhase::P1Lost => {
                scene.push(label(LOST_TEXT, 20.0, screen_center(), colors::LOST, Align::Center));
            }
        }

        if let Some(fps) = fps {
            scene.push(label(
                &format!("{fps} fps "),
                30.0,
                Vec2::new(0.0, FPS_LABEL_TOP),
                colors::FPS,
                Align::InsetHalf(FPS_INSET_SAMPLE),
            ));
        }

        scene
    }
}

fn screen_center() -> Vec2 {
    Vec2::new(WIDTH / 2.0, HEIGHT / 2.0)
}

fn label(text: &str, size: f32, pos: Vec2, color: Color, align: Align) -> DrawItem {
    DrawItem::Text(Label {
        text: text.to_string(),
        size,
        pos,
        color,
        align,
    })
}

fn wall(rect: Rect) -> DrawItem {
    DrawItem::Rect {
        rect,
        fill: colors::WALL,
        outline: colors::WALL_OUTLINE,
        outline_thickness: crate::consts::WALL_OUTLINE,
    }
}

/// Playing field; goal sensors first, top/bottom walls last so they cover
/// anything that strays over them
fn push_field(scene: &mut Scene, state: &MatchState) {
    scene.push(DrawItem::Rect {
        rect: Rect::new(WIDTH / 2.0, 0.0, 0.0, HEIGHT),
        fill: colors::MIDDLE_LINE,
        outline: colors::MIDDLE_LINE_OUTLINE,
        outline_thickness: 2.0,
    });
    scene.push(wall(state.walls.left.body));
    scene.push(wall(state.walls.right.body));

    for paddle in [&state.player1, &state.player2] {
        scene.push(DrawItem::Rect {
            rect: paddle.body(),
            fill: colors::PADDLE,
            outline: colors::PADDLE_OUTLINE,
            outline_thickness: crate::consts::PADDLE_OUTLINE,
        });
    }

    scene.push(DrawItem::Circle {
        center: state.ball.center(),
        radius: state.ball.radius,
        fill: colors::BALL,
        outline: colors::BALL_OUTLINE,
        outline_thickness: crate::consts::BALL_OUTLINE,
    });

    scene.push(label(
        &state.score.to_string(),
        50.0,
        Vec2::new(WIDTH / 2.0, 40.0),
        colors::SCORE,
        Align::CenterX,
    ));

    scene.push(wall(state.walls.top.body));
    scene.push(wall(state.walls.bottom.body));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Score;

    fn texts(scene: &Scene) -> Vec<&str> {
        scene.labels().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_intro_scene() {
        let state = MatchState::new();
        let scene = Scene::build(&state, None);
        assert_eq!(scene.clear, colors::BACKGROUND);
        assert_eq!(texts(&scene), vec![TITLE_TEXT, PROMPT_TEXT]);
        assert_eq!(scene.items.len(), 2);
    }

    #[test]
    fn test_playing_scene_draws_field() {
        let mut state = MatchState::new();
        state.phase = MatchPhase::Playing;
        state.score = Score { p1: 3, p2: 5 };
        let scene = Scene::build(&state, None);

        // Middle line, four walls, two paddles, ball, score
        assert_eq!(scene.items.len(), 9);
        assert_eq!(texts(&scene), vec!["3   5"]);
        let circles = scene
            .items
            .iter()
            .filter(|i| matches!(i, DrawItem::Circle { .. }))
            .count();
        assert_eq!(circles, 1);
        assert!(matches!(
            scene.items.last(),
            Some(DrawItem::Rect { rect, .. }) if *rect == state.walls.bottom.body
        ));
    }

    #[test]
    fn test_terminal_scenes() {
        let mut state = MatchState::new();
        state.phase = MatchPhase::P1Won;
        assert_eq!(texts(&Scene::build(&state, None)), vec![WON_TEXT]);
        state.phase = MatchPhase::P1Lost;
        assert_eq!(texts(&Scene::build(&state, None)), vec![LOST_TEXT]);
    }

    #[test]
    fn test_fps_label_on_top() {
        let state = MatchState::new();
        let scene = Scene::build(&state, Some(59));
        assert_eq!(texts(&scene).last(), Some(&"59 fps "));
    }

    #[test]
    fn test_fps_label_inset_by_half_a_digit() {
        let state = MatchState::new();
        let scene = Scene::build(&state, Some(60));
        let fps = scene.labels().last().unwrap();
        assert_eq!(fps.size, 30.0);
        assert_eq!(fps.pos, Vec2::new(0.0, FPS_LABEL_TOP));
        assert_eq!(fps.align, Align::InsetHalf("0"));
    }

    #[test]
    fn test_rgba() {
        assert_eq!(rgba(255, 0, 0, 255), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(rgba(0, 0, 0, 0), [0.0; 4]);
    }
}
