//! Draw-call scene for one frame
//!
//! The game never talks to the GPU directly. It describes the frame as a
//! list of rounded rectangles, circles and text, in play-area coordinates,
//! and a presenter turns that into pixels.

use glam::Vec2;

use super::vertex::colors;
use crate::consts::*;
use crate::sim::{GamePhase, GameState};

/// Corner radius used for every rounded rectangle
pub const CORNER_RADIUS: f32 = 2.0;

/// Text style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f32,
    pub bold: bool,
}

impl Font {
    pub const DEFAULT: Font = Font { size: 32.0, bold: true };
    pub const SCORE: Font = Font { size: 16.0, bold: true };
    pub const TITLE: Font = Font { size: 64.0, bold: false };
    pub const HIGH_SCORE: Font = Font { size: 24.0, bold: false };
}

/// One abstract draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    RoundedRect {
        min: Vec2,
        size: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    /// Text centered on `pos`
    Text {
        text: String,
        pos: Vec2,
        font: Font,
        color: [f32; 4],
    },
}

/// A full frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub background: [f32; 4],
    pub cmds: Vec<DrawCmd>,
}

impl Scene {
    fn new() -> Self {
        Self {
            background: colors::BACKGROUND,
            cmds: Vec::with_capacity(BRICK_ROWS * BRICK_COLUMNS + 16),
        }
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        self.cmds.push(DrawCmd::RoundedRect {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
            radius: CORNER_RADIUS,
            color,
        });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        self.cmds.push(DrawCmd::Circle {
            center,
            radius,
            color,
        });
    }

    fn text(&mut self, text: impl Into<String>, x: f32, y: f32, font: Font, color: [f32; 4]) {
        self.cmds.push(DrawCmd::Text {
            text: text.into(),
            pos: Vec2::new(x, y),
            font,
            color,
        });
    }

    /// All text strings, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cmds.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of shape (non-text) commands
    pub fn shape_count(&self) -> usize {
        self.cmds
            .iter()
            .filter(|cmd| !matches!(cmd, DrawCmd::Text { .. }))
            .count()
    }
}

/// A text command resolved for an overlay of a given on-screen height
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub text: String,
    /// Center, as a percentage of the play area
    pub left_pct: f32,
    pub top_pct: f32,
    /// Font size in CSS pixels
    pub font_px: f32,
    pub bold: bool,
    pub color: [f32; 4],
}

/// Resolve every text command for a play area displayed `display_height` pixels tall
pub fn text_layout(scene: &Scene, display_height: f32) -> Vec<TextNode> {
    let scale = display_height / SCREEN_HEIGHT;
    scene
        .cmds
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCmd::Text {
                text,
                pos,
                font,
                color,
            } => Some(TextNode {
                text: text.clone(),
                left_pct: pos.x / SCREEN_WIDTH * 100.0,
                top_pct: pos.y / SCREEN_HEIGHT * 100.0,
                font_px: (font.size * scale).round(),
                bold: font.bold,
                color: *color,
            }),
            _ => None,
        })
        .collect()
}

/// Build the frame for the current phase
pub fn build(state: &GameState, high_score: Option<u64>) -> Scene {
    let mut scene = Scene::new();
    match state.phase {
        GamePhase::Menu => {
            scene.text("js13k", SCREEN_WIDTH / 2.0, 120.0, Font::TITLE, colors::WHITE);
            scene.text(
                "Breakout",
                SCREEN_WIDTH / 2.0,
                200.0,
                Font::TITLE,
                colors::TITLE_ACCENT,
            );
            play_prompt(&mut scene, high_score);
        }
        GamePhase::Playing => game(&mut scene, state),
        GamePhase::GameOver => {
            game(&mut scene, state);
            scene.text("GAME OVER", SCREEN_WIDTH / 2.0, 350.0, Font::DEFAULT, colors::WHITE);
            play_prompt(&mut scene, high_score);
        }
        GamePhase::Win => {
            game(&mut scene, state);
            scene.text("YOU WIN!", SCREEN_WIDTH / 2.0, 350.0, Font::DEFAULT, colors::WHITE);
            play_prompt(&mut scene, high_score);
        }
    }
    scene
}

fn game(scene: &mut Scene, state: &GameState) {
    for (row, _, rect) in state.bricks.iter_alive() {
        scene.rect(
            rect.min.x,
            rect.min.y,
            rect.size.x,
            rect.size.y,
            colors::BRICKS[row / 2],
        );
    }
    scene.circle(state.ball.pos, state.ball.radius, colors::BALL);
    scene.rect(
        state.paddle.x,
        PADDLE_Y,
        PADDLE_WIDTH,
        PADDLE_HEIGHT,
        colors::PADDLE,
    );
    scene.text(state.score.to_string(), 22.0, 38.0, Font::SCORE, colors::WHITE);
    for i in 0..START_LIVES {
        let color = if state.lives > i {
            colors::WHITE
        } else {
            colors::LIFE_LOST
        };
        scene.rect(216.0 + i as f32 * 17.0, 24.0, 15.0, 15.0, color);
    }
}

/// Play button plus the high score line
fn play_prompt(scene: &mut Scene, high_score: Option<u64>) {
    let center = Vec2::new(SCREEN_WIDTH / 2.0, 100.0 + SCREEN_HEIGHT / 2.0);
    scene.circle(center, 50.0, colors::WHITE);
    scene.text(
        "▶",
        center.x + 5.0,
        center.y + 5.0,
        Font::TITLE,
        colors::BACKGROUND,
    );
    if let Some(best) = high_score.filter(|b| *b > 0) {
        scene.text(
            format!("♔ {}", best),
            SCREEN_WIDTH / 2.0,
            620.0,
            Font::HIGH_SCORE,
            colors::HIGH_SCORE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::brick_rect;

    fn texts(scene: &Scene) -> Vec<&str> {
        scene.texts().collect()
    }

    #[test]
    fn test_menu_scene() {
        let state = GameState::new(1);
        let scene = build(&state, None);
        assert_eq!(texts(&scene), vec!["js13k", "Breakout", "▶"]);
        // Play button only
        assert_eq!(scene.shape_count(), 1);
    }

    #[test]
    fn test_high_score_shown_when_present() {
        let state = GameState::new(1);
        let scene = build(&state, Some(320));
        assert!(texts(&scene).contains(&"♔ 320"));

        let scene = build(&state, Some(0));
        assert!(!texts(&scene).iter().any(|t| t.starts_with('♔')));
    }

    #[test]
    fn test_playing_scene_contents() {
        let mut state = GameState::new(1);
        state.start();
        state.lives = 2;
        state.bricks.kill(0, 0);
        let scene = build(&state, Some(999));

        // Bricks + ball + paddle + 3 life pips
        let bricks = BRICK_ROWS * BRICK_COLUMNS - 1;
        assert_eq!(scene.shape_count(), bricks + 1 + 1 + 3);
        // No high score or prompt during play
        assert_eq!(texts(&scene), vec!["0"]);

        let pips: Vec<_> = scene
            .cmds
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::RoundedRect { min, color, .. } if min.y == 24.0 => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(pips, vec![colors::WHITE, colors::WHITE, colors::LIFE_LOST]);
    }

    #[test]
    fn test_brick_colors_by_row_pair() {
        let mut state = GameState::new(1);
        state.start();
        let scene = build(&state, None);
        let last_row_color = scene.cmds.iter().find_map(|cmd| match cmd {
            DrawCmd::RoundedRect { min, color, .. } if *min == brick_rect(7, 0).min => Some(*color),
            _ => None,
        });
        assert_eq!(last_row_color, Some(colors::BRICKS[3]));
    }

    #[test]
    fn test_text_layout_follows_display_size() {
        let state = GameState::new(1);
        let scene = build(&state, None);

        let full = text_layout(&scene, SCREEN_HEIGHT);
        let title = &full[1];
        assert_eq!(title.text, "Breakout");
        assert_eq!(title.left_pct, 50.0);
        assert_eq!(title.font_px, Font::TITLE.size);

        // Same text, resized display: layout differs so the overlay is rebuilt
        let half = text_layout(&scene, SCREEN_HEIGHT / 2.0);
        assert_eq!(half[1].font_px, Font::TITLE.size / 2.0);
        assert_ne!(full, half);
        assert_eq!(full, text_layout(&scene, SCREEN_HEIGHT));
    }

    #[test]
    fn test_end_screens_overlay_game() {
        let mut state = GameState::new(1);
        state.start();
        state.phase = GamePhase::GameOver;
        let scene = build(&state, Some(50));
        let t = texts(&scene);
        assert!(t.contains(&"GAME OVER"));
        assert!(t.contains(&"▶"));
        assert!(t.contains(&"♔ 50"));
        // Frozen game still drawn underneath
        assert!(scene.shape_count() > BRICK_ROWS * BRICK_COLUMNS);

        state.phase = GamePhase::Win;
        let scene = build(&state, None);
        assert!(texts(&scene).contains(&"YOU WIN!"));
    }
}
