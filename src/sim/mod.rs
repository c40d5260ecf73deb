//! Game simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! audio and platform dependencies:
//! - One step per rendered frame
//! - Seeded RNG only
//! - Row-major brick iteration

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, brick_rect, paddle_rect};
pub use state::{Ball, BrickGrid, GameEvent, GamePhase, GameState, Paddle, Transition};
pub use tick::{TickInput, is_finished, tick};
