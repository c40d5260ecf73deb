//! Staged player input
//!
//! Event handlers write here between frames; the frame loop snapshots it
//! into a `TickInput` once per frame.

use crate::consts::SCREEN_WIDTH;
use crate::sim::TickInput;

/// Logical paddle direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Map a pointer client x into play-area x, given the canvas' on-page
/// left offset and displayed width
pub fn client_to_play_x(client_x: f32, offset_left: f32, offset_width: f32) -> Option<f32> {
    if offset_width <= 0.0 {
        return None;
    }
    Some((client_x - offset_left) / offset_width * SCREEN_WIDTH)
}

/// Intent staged by input handlers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pub left_held: bool,
    pub right_held: bool,
    /// Last pointer x, while the pointer owns the paddle
    pub pointer_x: Option<f32>,
    /// Demo mode
    pub autopilot: bool,
    /// Pointer moves are ignored when false
    pub pointer_enabled: bool,
}

impl InputState {
    pub fn new(pointer_enabled: bool) -> Self {
        Self {
            pointer_enabled,
            ..Default::default()
        }
    }

    pub fn key_down(&mut self, dir: Direction) {
        match dir {
            Direction::Left => self.left_held = true,
            Direction::Right => self.right_held = true,
        }
        // Keyboard takes the paddle until the pointer moves again
        self.pointer_x = None;
    }

    pub fn key_up(&mut self, dir: Direction) {
        match dir {
            Direction::Left => self.left_held = false,
            Direction::Right => self.right_held = false,
        }
    }

    /// Pointer moved to `x` in play-area coordinates
    pub fn pointer_move(&mut self, x: f32) {
        if self.pointer_enabled {
            self.pointer_x = Some(x);
        }
    }

    pub fn toggle_autopilot(&mut self) -> bool {
        self.autopilot = !self.autopilot;
        self.autopilot
    }

    /// Snapshot for one frame
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            pointer_x: self.pointer_x,
            left: self.left_held,
            right: self.right_held,
            autopilot: self.autopilot,
        }
    }
}
