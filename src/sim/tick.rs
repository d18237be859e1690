//! Per-frame game loop and state machine
//!
//! One call to [`tick`] advances the simulation by exactly one tick. The
//! obstacle spawner is a separate entry point because it is driven by a
//! wall-clock timer, not the frame loop.

use super::obstacle::Obstacle;
use super::state::{Difficulty, GameEvent, GamePhase, GameState, Viewport};
use crate::consts::*;

/// Input commands for a single tick. One-shot flags are cleared by the
/// caller after each tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump/confirm action (spacebar or tap)
    pub jump: bool,
    /// Pause toggle (keyboard only)
    pub pause: bool,
    /// Difficulty chosen on the menu
    pub start: Option<Difficulty>,
    /// Restart from the game-over screen
    pub restart: bool,
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, input: &TickInput, viewport: Viewport) {
    // Pause toggle is only meaningful between Playing and Paused
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
            }
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Start => {
            if let Some(difficulty) = input.start {
                state.start_game(difficulty, viewport);
            }
            return;
        }
        GamePhase::GameOver => {
            if input.restart {
                state.end_session();
            }
            return;
        }
        GamePhase::Paused => return,
        GamePhase::Playing => {}
    }

    state.ticks += 1;

    // Speed is a pure function of (difficulty, score), recomputed every tick.
    // Ground level is likewise recomputed so resizes take effect immediately.
    let speed = state.speed();
    let ground_y = viewport.ground_y();

    // Player kinematics
    if input.jump && state.player.jump() {
        state.push_event(GameEvent::Jumped);
    }
    state.player.apply_gravity(GRAVITY);
    if state.player.resolve_ground(ground_y) {
        state.push_event(GameEvent::Landed);
    }

    // Scroll obstacles
    for obstacle in &mut state.obstacles {
        obstacle.advance(speed);
    }

    // Collision: the first hit ends the session; simultaneous hits are one
    if state
        .obstacles
        .iter()
        .any(|o| o.overlaps_player(&state.player))
    {
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::Hit);
        log::info!("Run over at score {}", state.score);
        return;
    }

    // Score each obstacle exactly once when its right edge passes the runner
    let player_x = state.player.pos.x;
    for obstacle in &mut state.obstacles {
        if !obstacle.passed && obstacle.right_edge() < player_x {
            obstacle.passed = true;
            state.score += 1;
        }
    }

    // Prune obstacles that scrolled fully off-screen
    state.obstacles.retain(|o| !o.is_offscreen());
}

/// Timed spawner entry point, fired on a fixed wall-clock cadence.
///
/// Requests outside the Playing phase are silently dropped, never queued.
pub fn spawn_obstacle(state: &mut GameState, viewport: Viewport) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let obstacle = Obstacle::spawn(viewport, &mut state.rng);
    state.obstacles.push(obstacle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 620.0) // ground at y=500
    }

    fn started(difficulty: Difficulty) -> GameState {
        let mut state = GameState::new(42, viewport());
        let input = TickInput {
            start: Some(difficulty),
            ..Default::default()
        };
        tick(&mut state, &input, viewport());
        state
    }

    fn obstacle(x: f32, w: f32, h: f32) -> Obstacle {
        Obstacle {
            pos: Vec2::new(x, viewport().ground_y() - h + OBSTACLE_SINK),
            w,
            h,
            passed: false,
        }
    }

    #[test]
    fn test_start_game_resets_session() {
        let mut state = GameState::new(1, viewport());
        state.score = 99;
        state.obstacles.push(obstacle(400.0, 30.0, 30.0));

        let input = TickInput {
            start: Some(Difficulty::Hard),
            ..Default::default()
        };
        tick(&mut state, &input, viewport());

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.difficulty, Some(Difficulty::Hard));
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos.y, viewport().ground_y());
        assert_eq!(state.player.jumps, MAX_JUMPS);
    }

    #[test]
    fn test_speed_formula() {
        let mut state = started(Difficulty::Easy);
        assert_eq!(state.speed(), 5.0);
        state.score = 10;
        assert!((state.speed() - 6.5).abs() < 1e-6);

        let mut hard = started(Difficulty::Hard);
        hard.score = 10;
        assert!((hard.speed() - 9.5).abs() < 1e-6);
    }

    #[test]
    fn test_speed_tracks_difficulty_change() {
        let mut state = started(Difficulty::Easy);
        state.score = 10;
        assert!((state.speed() - 6.5).abs() < 1e-6);

        // A new session on Hard never sees a stale Easy-derived value
        state.phase = GamePhase::GameOver;
        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
            viewport(),
        );
        tick(
            &mut state,
            &TickInput {
                start: Some(Difficulty::Hard),
                ..Default::default()
            },
            viewport(),
        );
        assert_eq!(state.speed(), 7.0);
    }

    #[test]
    fn test_pause_toggle_freezes_state() {
        let mut state = started(Difficulty::Easy);
        state.obstacles.push(obstacle(400.0, 30.0, 30.0));
        tick(&mut state, &TickInput::default(), viewport());
        let frozen_x = state.obstacles[0].pos.x;
        let frozen_ticks = state.ticks;

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, viewport());
        assert_eq!(state.phase, GamePhase::Paused);

        // Nothing moves while paused
        tick(&mut state, &TickInput::default(), viewport());
        tick(&mut state, &TickInput::default(), viewport());
        assert_eq!(state.obstacles[0].pos.x, frozen_x);
        assert_eq!(state.ticks, frozen_ticks);

        // Toggle back resumes the run on the same tick
        tick(&mut state, &pause, viewport());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.obstacles[0].pos.x < frozen_x);
    }

    #[test]
    fn test_pause_ignored_outside_play() {
        let mut state = GameState::new(1, viewport());
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, viewport());
        assert_eq!(state.phase, GamePhase::Start);
    }

    #[test]
    fn test_collision_transitions_to_game_over() {
        let mut state = started(Difficulty::Easy);
        // Right on top of the runner; two overlapping obstacles still
        // produce a single Hit event
        state.obstacles.push(obstacle(145.0, 30.0, 30.0));
        state.obstacles.push(obstacle(140.0, 30.0, 30.0));
        state.drain_events();

        tick(&mut state, &TickInput::default(), viewport());

        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::Hit).count(),
            1
        );
    }

    #[test]
    fn test_game_over_restart_returns_to_menu() {
        let mut state = started(Difficulty::Easy);
        state.score = 3;
        state.phase = GamePhase::GameOver;

        // Jump input is not a restart trigger contextually; restart is
        tick(&mut state, &TickInput::default(), viewport());
        assert_eq!(state.phase, GamePhase::GameOver);

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, viewport());
        assert_eq!(state.phase, GamePhase::Start);
        // Score survives until the next start_game so it can be persisted
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_pass_scores_exactly_once() {
        let mut state = started(Difficulty::Easy);
        // Already behind the runner, not yet marked
        state.obstacles.push(obstacle(60.0, 30.0, 30.0));

        tick(&mut state, &TickInput::default(), viewport());
        assert_eq!(state.score, 1);

        // Checked on multiple subsequent ticks: no double counting
        for _ in 0..5 {
            tick(&mut state, &TickInput::default(), viewport());
        }
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_offscreen_obstacles_are_pruned() {
        let mut state = started(Difficulty::Easy);
        state.obstacles.push(obstacle(20.0, 30.0, 30.0));

        // Easy base speed 5: gone behind x=-30 within a few dozen ticks
        for _ in 0..15 {
            tick(&mut state, &TickInput::default(), viewport());
        }
        assert!(state.obstacles.is_empty());
        // The pass was still counted before pruning
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_spawn_suppressed_outside_play() {
        let mut state = GameState::new(5, viewport());
        spawn_obstacle(&mut state, viewport());
        assert!(state.obstacles.is_empty());

        state.start_game(Difficulty::Easy, viewport());
        spawn_obstacle(&mut state, viewport());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos.x, viewport().width + SPAWN_LEAD);

        state.phase = GamePhase::Paused;
        spawn_obstacle(&mut state, viewport());
        assert_eq!(state.obstacles.len(), 1);

        state.phase = GamePhase::GameOver;
        spawn_obstacle(&mut state, viewport());
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_jump_emits_events_through_tick() {
        let mut state = started(Difficulty::Easy);
        state.drain_events();

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, viewport());
        assert!(state.drain_events().contains(&GameEvent::Jumped));

        // Ride the arc back down to the ground
        let mut saw_landed = false;
        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), viewport());
            if state.drain_events().contains(&GameEvent::Landed) {
                saw_landed = true;
                break;
            }
        }
        assert!(saw_landed);
        assert_eq!(state.player.jumps, MAX_JUMPS);
    }

    #[test]
    fn test_resize_recomputes_ground() {
        let mut state = started(Difficulty::Easy);
        assert_eq!(state.player.pos.y, 500.0);

        // Shrink the viewport: the ground rises and the runner clamps to it
        let shorter = Viewport::new(800.0, 520.0);
        tick(&mut state, &TickInput::default(), shorter);
        assert_eq!(state.player.pos.y, shorter.ground_y());
    }

    #[test]
    fn test_determinism() {
        let script = |state: &mut GameState| {
            for i in 0..400u32 {
                if i % 90 == 0 {
                    spawn_obstacle(state, viewport());
                }
                let input = TickInput {
                    jump: i % 37 == 0,
                    ..Default::default()
                };
                tick(state, &input, viewport());
            }
        };

        let mut a = started(Difficulty::Hard);
        let mut b = started(Difficulty::Hard);
        script(&mut a);
        script(&mut b);

        assert_eq!(a.ticks, b.ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        for (oa, ob) in a.obstacles.iter().zip(&b.obstacles) {
            assert_eq!(oa.pos, ob.pos);
            assert_eq!((oa.w, oa.h), (ob.w, ob.h));
        }
    }

    proptest! {
        #[test]
        fn prop_score_monotonic_within_session(
            jumps in proptest::collection::vec(any::<bool>(), 0..300)
        ) {
            let mut state = started(Difficulty::Easy);
            let mut last = 0;
            for (i, jump) in jumps.into_iter().enumerate() {
                if i % 40 == 0 {
                    spawn_obstacle(&mut state, viewport());
                }
                let input = TickInput { jump, ..Default::default() };
                tick(&mut state, &input, viewport());
                prop_assert!(state.score >= last);
                last = state.score;
                if state.phase == GamePhase::GameOver {
                    break;
                }
            }
        }
    }
}
