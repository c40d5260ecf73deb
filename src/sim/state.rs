//! Game session and entity types
//!
//! One `GameState` is one game instance. The frame loop owns it; input
//! handlers never touch it directly.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{Rect, brick_rect, paddle_rect};
use crate::consts::*;

/// Current mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Title screen, waiting for the first activation
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Every brick destroyed
    Win,
    /// Last life lost
    GameOver,
}

/// Requested phase changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Player activation (click) outside of play
    Start,
    /// Lives reached zero
    LastLifeLost,
    /// Score reached the maximum
    AllBricksCleared,
}

impl GamePhase {
    /// Resulting phase for a transition, or `None` if it is not legal from here
    pub fn next(self, transition: Transition) -> Option<GamePhase> {
        use GamePhase::*;
        match (self, transition) {
            (Menu | Win | GameOver, Transition::Start) => Some(Playing),
            (Playing, Transition::LastLifeLost) => Some(GameOver),
            (Playing, Transition::AllBricksCleared) => Some(Win),
            _ => None,
        }
    }

    /// Physics and collisions only run while playing
    pub fn is_live(self) -> bool {
        self == GamePhase::Playing
    }
}

/// Things that happened during a frame, drained by the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new session began
    Started,
    /// Ball bounced off a side wall or the ceiling
    WallBounce,
    /// Ball bounced off the paddle
    PaddleBounce,
    /// Brick destroyed; `score` is the new total
    BrickDestroyed { row: usize, col: usize, score: u64 },
    /// Ball fell out with lives remaining
    LifeLost { lives: u8 },
    /// Ball fell out on the last life
    GameOver,
    /// Last brick destroyed
    Win,
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BALL_START_X, BALL_START_Y),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    /// Move back to the launch point with a random horizontal component
    pub fn relaunch(&mut self, rng: &mut Pcg32) {
        self.pos = Vec2::new(BALL_START_X, BALL_START_Y);
        self.vel = Vec2::new(
            rng.random_range(-BALL_LAUNCH_DX..BALL_LAUNCH_DX),
            BALL_LAUNCH_DY,
        );
    }

    /// Bounding square used for overlap tests
    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    /// Advance by one frame
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }
}

/// The player's paddle; only `x` (left edge) moves
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub x: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (SCREEN_WIDTH - PADDLE_WIDTH) / 2.0,
        }
    }
}

impl Paddle {
    pub fn bounds(&self) -> Rect {
        paddle_rect(self.x)
    }

    /// Horizontal center
    #[inline]
    pub fn center(&self) -> f32 {
        self.x + PADDLE_WIDTH / 2.0
    }

    /// Snap the paddle center to a pointer coordinate
    pub fn center_on(&mut self, x: f32) {
        self.x = x - PADDLE_WIDTH / 2.0;
    }

    /// Shift right one key step if the right edge is still inside
    pub fn step_right(&mut self) {
        if self.x < SCREEN_WIDTH - PADDLE_WIDTH {
            self.x += PADDLE_KEY_STEP;
        }
    }

    /// Shift left one key step if the left edge is still inside
    pub fn step_left(&mut self) {
        if self.x > 0.0 {
            self.x -= PADDLE_KEY_STEP;
        }
    }
}

/// Fixed grid of alive flags
#[derive(Debug, Clone, PartialEq)]
pub struct BrickGrid {
    alive: [[bool; BRICK_COLUMNS]; BRICK_ROWS],
}

impl Default for BrickGrid {
    fn default() -> Self {
        Self {
            alive: [[true; BRICK_COLUMNS]; BRICK_ROWS],
        }
    }
}

impl BrickGrid {
    /// Every brick alive again
    pub fn refill(&mut self) {
        self.alive = [[true; BRICK_COLUMNS]; BRICK_ROWS];
    }

    #[inline]
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.alive[row][col]
    }

    pub fn kill(&mut self, row: usize, col: usize) {
        self.alive[row][col] = false;
    }

    pub fn alive_count(&self) -> usize {
        self.alive.iter().flatten().filter(|a| **a).count()
    }

    pub fn all_alive(&self) -> bool {
        self.alive_count() == BRICK_ROWS * BRICK_COLUMNS
    }

    /// Alive bricks in row-major order with their bounds
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, usize, Rect)> + '_ {
        (0..BRICK_ROWS).flat_map(move |row| {
            (0..BRICK_COLUMNS)
                .filter(move |&col| self.alive[row][col])
                .map(move |col| (row, col, brick_rect(row, col)))
        })
    }
}

/// One game instance
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the session RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    /// Frames simulated since the last start
    pub frame: u64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh session sitting on the menu
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            score: 0,
            lives: 0,
            ball: Ball::default(),
            paddle: Paddle::default(),
            bricks: BrickGrid::default(),
            frame: 0,
            events: Vec::new(),
        }
    }

    /// Apply a phase transition. Illegal requests are ignored and return false.
    pub fn apply(&mut self, transition: Transition) -> bool {
        match self.phase.next(transition) {
            Some(next) => {
                log::debug!("Phase {:?} -> {:?} ({:?})", self.phase, next, transition);
                self.phase = next;
                true
            }
            None => {
                log::debug!("Ignored {:?} while {:?}", transition, self.phase);
                false
            }
        }
    }

    /// Start (or restart) a session. No-op while already playing.
    pub fn start(&mut self) -> bool {
        if !self.apply(Transition::Start) {
            return false;
        }
        self.bricks.refill();
        self.score = 0;
        self.lives = START_LIVES;
        self.frame = 0;
        self.ball.relaunch(&mut self.rng);
        self.events.push(GameEvent::Started);
        true
    }

    /// Put the ball back at the launch point after a lost life
    pub fn reset_ball(&mut self) {
        self.ball.relaunch(&mut self.rng);
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
