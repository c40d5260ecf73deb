//! Breakout - a single-screen brick breaker
//!
//! Core modules:
//! - `sim`: Game session (entities, collisions, state machine)
//! - `game`: Frame loop host wiring input, audio and high score to the session
//! - `renderer`: Draw-call scene builder and WebGPU pipeline
//! - `platform`: Browser/native platform abstraction (input, storage)
//! - `audio`: Procedural sound cues

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{FixedFrames, FrameScheduler, Game, Presenter};
pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Play area dimensions (logical units, y grows downward)
    pub const SCREEN_WIDTH: f32 = 480.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Horizontal launch speed is uniform in [-BALL_LAUNCH_DX, BALL_LAUNCH_DX)
    pub const BALL_LAUNCH_DX: f32 = 3.0;
    pub const BALL_LAUNCH_DY: f32 = -3.0;
    pub const BALL_START_X: f32 = SCREEN_WIDTH / 2.0;
    pub const BALL_START_Y: f32 = SCREEN_HEIGHT - 60.0;

    /// Paddle defaults (y is fixed)
    pub const PADDLE_WIDTH: f32 = 90.0;
    pub const PADDLE_HEIGHT: f32 = 16.0;
    pub const PADDLE_Y: f32 = 690.0;
    /// Paddle shift per frame while a direction key is held
    pub const PADDLE_KEY_STEP: f32 = 7.0;
    /// Horizontal velocity per unit of offset from paddle center
    pub const PADDLE_DEFLECT_GAIN: f32 = 0.1;
    /// Vertical velocity multiplier on paddle hit (sign flip + speed-up)
    pub const PADDLE_BOUNCE_FACTOR: f32 = -1.1;

    /// Brick grid layout
    pub const BRICK_ROWS: usize = 8;
    pub const BRICK_COLUMNS: usize = 7;
    pub const BRICK_WIDTH: f32 = 57.0;
    pub const BRICK_HEIGHT: f32 = 16.0;
    pub const BRICK_OFFSET_X: f32 = 10.0;
    pub const BRICK_OFFSET_Y: f32 = 90.0;
    pub const BRICK_PADDING_X: f32 = 10.0;
    pub const BRICK_PADDING_Y: f32 = 7.0;

    /// Scoring and lives
    pub const BRICK_SCORE: u64 = 10;
    pub const MAX_SCORE: u64 = BRICK_SCORE * (BRICK_ROWS * BRICK_COLUMNS) as u64;
    pub const START_LIVES: u8 = 3;
}
