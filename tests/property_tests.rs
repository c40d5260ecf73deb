//! Property tests for physics and score invariants

use breakout::HighScore;
use breakout::consts::*;
use breakout::platform::MemoryStore;
use breakout::sim::{GamePhase, GameState, TickInput, tick};
use glam::Vec2;
use proptest::prelude::*;

const EPS: f32 = 1e-3;

proptest! {
    /// Walls and ceiling keep the ball inside after any single frame
    #[test]
    fn ball_stays_in_bounds(
        x in BALL_RADIUS..=(SCREEN_WIDTH - BALL_RADIUS),
        y in BALL_RADIUS..=600.0f32,
        dx in -8.0f32..8.0,
        dy in -8.0f32..8.0,
    ) {
        let mut state = GameState::new(0);
        state.start();
        for row in 0..BRICK_ROWS {
            for col in 0..BRICK_COLUMNS {
                state.bricks.kill(row, col);
            }
        }
        state.ball.pos = Vec2::new(x, y);
        state.ball.vel = Vec2::new(dx, dy);

        tick(&mut state, &TickInput::default());

        let r = state.ball.radius;
        let p = state.ball.pos;
        prop_assert!(p.x - r >= -EPS, "left escape: {:?}", p);
        prop_assert!(p.x + r <= SCREEN_WIDTH + EPS, "right escape: {:?}", p);
        prop_assert!(p.y - r >= -EPS, "ceiling escape: {:?}", p);
        prop_assert_eq!(state.phase, GamePhase::Playing);
    }

    /// Any pointer inside the play area centers the paddle on it
    #[test]
    fn pointer_centers_paddle(x in 0.5f32..(SCREEN_WIDTH - 0.5)) {
        let mut state = GameState::new(0);
        state.start();
        let input = TickInput { pointer_x: Some(x), ..Default::default() };
        tick(&mut state, &input);
        prop_assert_eq!(state.paddle.x, x - PADDLE_WIDTH / 2.0);
    }

    /// The stored best is the max of everything recorded, across reloads
    #[test]
    fn high_score_is_running_max(
        sessions in prop::collection::vec(prop::collection::vec(0u64..=MAX_SCORE, 0..8), 1..5)
    ) {
        let store = MemoryStore::new();
        let mut expected: Option<u64> = None;
        for scores in &sessions {
            let mut hs = HighScore::load(store.clone());
            prop_assert_eq!(hs.best(), expected);
            for &score in scores {
                hs.record(score);
                expected = Some(expected.map_or(score, |b| b.max(score)));
                prop_assert_eq!(hs.best(), expected);
            }
        }
    }
}
