//! Per-frame simulation step
//!
//! One call advances the session by exactly one rendered frame: paddle
//! control, ball integration, then collision resolution.

use super::collision::{ball_falls_out, ball_hits_ceiling, ball_hits_side_wall, brick_rect};
use super::state::{GameEvent, GamePhase, GameState, Transition};
use crate::consts::*;

/// Staged input for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Pointer position in play-area x, if the pointer currently owns the paddle
    pub pointer_x: Option<f32>,
    /// "Move left" held
    pub left: bool,
    /// "Move right" held
    pub right: bool,
    /// Demo mode - paddle follows the ball
    pub autopilot: bool,
}

/// Advance the session by one frame. Does nothing unless playing.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if !state.phase.is_live() {
        return;
    }

    state.frame += 1;

    let pointer_x = if input.autopilot {
        Some(autopilot_target(state))
    } else {
        input.pointer_x
    };
    move_paddle(state, pointer_x, input);

    state.ball.integrate();
    resolve_collisions(state);
}

/// Pointer has priority; keys only act when the pointer is outside the play area
fn move_paddle(state: &mut GameState, pointer_x: Option<f32>, input: &TickInput) {
    match pointer_x {
        Some(x) if x > 0.0 && x < SCREEN_WIDTH => state.paddle.center_on(x),
        _ => {
            if input.right {
                state.paddle.step_right();
            } else if input.left {
                state.paddle.step_left();
            }
        }
    }
}

/// Where the demo player puts the paddle center this frame
fn autopilot_target(state: &GameState) -> f32 {
    // Oscillating offset so the ball does not settle into a vertical loop
    let t = state.frame as f32 * 0.01;
    let offset = (t.sin() * 0.3 + (t * 0.7).sin() * 0.15) * PADDLE_WIDTH;
    (state.ball.pos.x + offset).clamp(1.0, SCREEN_WIDTH - 1.0)
}

/// Run every collision check once, in a fixed order.
///
/// Checks do not short-circuit each other: a frame can bounce off a wall
/// and destroy a brick, or destroy several adjacent bricks.
fn resolve_collisions(state: &mut GameState) {
    let ball = &mut state.ball;

    // Side walls
    if ball_hits_side_wall(ball.pos, ball.radius) {
        ball.pos.x -= ball.vel.x;
        ball.vel.x = -ball.vel.x;
        state.events.push(GameEvent::WallBounce);
    }

    // Ceiling
    if ball_hits_ceiling(ball.pos, ball.radius) {
        ball.pos.y -= ball.vel.y;
        ball.vel.y = -ball.vel.y;
        state.events.push(GameEvent::WallBounce);
    }

    // Paddle
    if ball.bounds().overlaps(&state.paddle.bounds()) {
        ball.pos.y = PADDLE_Y - ball.radius;
        ball.vel.x = (ball.pos.x - state.paddle.center()) * PADDLE_DEFLECT_GAIN;
        ball.vel.y *= PADDLE_BOUNCE_FACTOR;
        state.events.push(GameEvent::PaddleBounce);
    }

    // Floor
    if ball_falls_out(ball.pos, ball.vel, ball.radius) {
        state.lives = state.lives.saturating_sub(1);
        if state.lives == 0 {
            if state.apply(Transition::LastLifeLost) {
                state.events.push(GameEvent::GameOver);
            }
        } else {
            state.reset_ball();
            state.events.push(GameEvent::LifeLost { lives: state.lives });
        }
    }

    // Bricks, re-tested against the ball as each hit moves it
    for row in 0..BRICK_ROWS {
        for col in 0..BRICK_COLUMNS {
            if state.bricks.is_alive(row, col)
                && brick_rect(row, col).overlaps(&state.ball.bounds())
            {
                hit_brick(state, row, col);
            }
        }
    }
}

fn hit_brick(state: &mut GameState, row: usize, col: usize) {
    let ball = &mut state.ball;
    ball.pos -= ball.vel;
    ball.vel.y = -ball.vel.y;

    state.bricks.kill(row, col);
    state.score += BRICK_SCORE;
    state.events.push(GameEvent::BrickDestroyed {
        row,
        col,
        score: state.score,
    });

    if state.score == MAX_SCORE && state.apply(Transition::AllBricksCleared) {
        state.events.push(GameEvent::Win);
    }
}

/// Convenience for hosts: true once the session reached a terminal phase
pub fn is_finished(state: &GameState) -> bool {
    matches!(state.phase, GamePhase::Win | GamePhase::GameOver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BrickGrid;
    use glam::Vec2;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state.drain_events();
        state
    }

    #[test]
    fn test_tick_idle_outside_play() {
        let mut state = GameState::new(1);
        let before = state.ball.clone();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball, before);
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_ball_integrates_once_per_frame() {
        let mut state = playing(1);
        state.ball.pos = Vec2::new(240.0, 400.0);
        state.ball.vel = Vec2::new(2.0, -3.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, Vec2::new(242.0, 397.0));
    }

    #[test]
    fn test_pointer_centers_paddle() {
        let mut state = playing(1);
        let input = TickInput {
            pointer_x: Some(SCREEN_WIDTH / 2.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.x, (SCREEN_WIDTH - PADDLE_WIDTH) / 2.0);
    }

    #[test]
    fn test_pointer_beats_keys() {
        let mut state = playing(1);
        let input = TickInput {
            pointer_x: Some(100.0),
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.x, 100.0 - PADDLE_WIDTH / 2.0);
    }

    #[test]
    fn test_keys_when_pointer_outside() {
        let mut state = playing(1);
        let start = state.paddle.x;
        let input = TickInput {
            pointer_x: Some(0.0),
            left: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.x, start - PADDLE_KEY_STEP);

        // Right wins when both keys are held
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.paddle.x, start);
    }

    #[test]
    fn test_left_wall_bounce() {
        let mut state = playing(1);
        state.ball.pos = Vec2::new(BALL_RADIUS, 400.0);
        state.ball.vel = Vec2::new(-2.0, 1.5);
        tick(&mut state, &TickInput::default());

        assert_eq!(state.ball.vel, Vec2::new(2.0, 1.5));
        assert_eq!(state.ball.pos.x, BALL_RADIUS);
        assert!(state.events.contains(&GameEvent::WallBounce));
    }

    #[test]
    fn test_ceiling_bounce() {
        let mut state = playing(1);
        state.ball.pos = Vec2::new(240.0, 12.0);
        state.ball.vel = Vec2::new(0.5, -3.0);
        tick(&mut state, &TickInput::default());

        assert_eq!(state.ball.vel.y, 3.0);
        assert_eq!(state.ball.pos.y, 12.0);
        assert_eq!(state.ball.vel.x, 0.5);
    }

    #[test]
    fn test_paddle_bounce_deflects_and_speeds_up() {
        let mut state = playing(1);
        state.paddle.x = 195.0;
        // Right of center by 20 after the step
        state.ball.pos = Vec2::new(260.0, 680.0);
        state.ball.vel = Vec2::new(0.0, 4.0);
        tick(&mut state, &TickInput::default());

        assert_eq!(state.ball.pos.y, PADDLE_Y - BALL_RADIUS);
        assert!((state.ball.vel.x - 2.0).abs() < 1e-5);
        assert!((state.ball.vel.y + 4.4).abs() < 1e-5);
        assert!(state.events.contains(&GameEvent::PaddleBounce));
    }

    #[test]
    fn test_life_lost_relaunches_ball() {
        let mut state = playing(1);
        state.paddle.x = 0.0;
        state.ball.pos = Vec2::new(400.0, 700.0);
        state.ball.vel = Vec2::new(0.0, 6.0);
        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, START_LIVES - 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ball.pos, Vec2::new(BALL_START_X, BALL_START_Y));
        assert!(state.events.contains(&GameEvent::LifeLost { lives: 2 }));
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = playing(1);
        state.lives = 1;
        state.paddle.x = 0.0;
        state.ball.pos = Vec2::new(400.0, 700.0);
        state.ball.vel = Vec2::new(0.0, 6.0);
        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver));
        assert!(state.bricks.all_alive());
        assert!(is_finished(&state));

        // Frozen afterwards
        let ball = state.ball.clone();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball, ball);
    }

    #[test]
    fn test_brick_hit_scores_and_reverses() {
        let mut state = playing(1);
        let brick = brick_rect(7, 3);
        // Approach from below, ending inside the brick box
        let center = brick.center();
        state.ball.pos = center + Vec2::new(0.0, 3.0);
        state.ball.vel = Vec2::new(1.0, -3.0);
        tick(&mut state, &TickInput::default());

        assert!(!state.bricks.is_alive(7, 3));
        assert_eq!(state.score, BRICK_SCORE);
        assert_eq!(state.ball.vel, Vec2::new(1.0, 3.0));
        // Full displacement undone
        assert_eq!(state.ball.pos, center + Vec2::new(0.0, 3.0));
        assert!(state.events.contains(&GameEvent::BrickDestroyed {
            row: 7,
            col: 3,
            score: BRICK_SCORE
        }));
    }

    #[test]
    fn test_adjacent_bricks_both_hit_in_one_frame() {
        let mut state = playing(1);
        let left = brick_rect(4, 2);
        let right = brick_rect(4, 3);
        // Ball straddling the gap between two bricks in the same row
        let gap_x = (left.max().x + right.min.x) / 2.0;
        let start = Vec2::new(gap_x, left.center().y);
        state.ball.pos = start;
        state.ball.vel = Vec2::new(0.0, -2.0);
        tick(&mut state, &TickInput::default());

        assert!(!state.bricks.is_alive(4, 2));
        assert!(!state.bricks.is_alive(4, 3));
        assert_eq!(state.score, 2 * BRICK_SCORE);
        // dy flipped once per brick, so it ends where it started
        assert_eq!(state.ball.vel, Vec2::new(0.0, -2.0));
        // Second undo uses the already-flipped velocity
        assert_eq!(state.ball.pos, start + Vec2::new(0.0, -2.0));
        let hits = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::BrickDestroyed { .. }))
            .count();
        assert_eq!(hits, 2);
    }

    #[test]
    fn test_game_over_beats_win_in_same_frame() {
        let mut state = playing(1);
        for (row, col, _) in BrickGrid::default().iter_alive() {
            if (row, col) != (7, 6) {
                state.bricks.kill(row, col);
            }
        }
        state.score = MAX_SCORE - BRICK_SCORE;
        state.lives = 1;
        state.paddle.x = 0.0;
        // Lands on the last brick while its next step is below the floor
        let vel = Vec2::new(0.0, 460.0);
        state.ball.pos = brick_rect(7, 6).center() - vel;
        state.ball.vel = vel;
        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 0);
        assert!(!state.bricks.is_alive(7, 6));
        assert_eq!(state.score, MAX_SCORE);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver));
        assert!(!state.events.contains(&GameEvent::Win));
    }

    #[test]
    fn test_last_brick_wins() {
        let mut state = playing(1);
        let others: Vec<_> = state
            .bricks
            .iter_alive()
            .map(|(row, col, _)| (row, col))
            .filter(|&cell| cell != (0, 0))
            .collect();
        for (row, col) in others {
            state.bricks.kill(row, col);
        }
        state.score = MAX_SCORE - BRICK_SCORE;
        state.ball.pos = brick_rect(0, 0).center();
        state.ball.vel = Vec2::ZERO;
        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, MAX_SCORE);
        assert_eq!(state.phase, GamePhase::Win);
        assert!(state.events.contains(&GameEvent::Win));
    }

    #[test]
    fn test_autopilot_follows_ball() {
        let mut state = playing(3);
        state.ball.pos = Vec2::new(100.0, 400.0);
        state.ball.vel = Vec2::ZERO;
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!((state.paddle.center() - 100.0).abs() <= PADDLE_WIDTH * 0.45 + 1.0);
    }
}
