//! Fixed timestep simulation tick
//!
//! Core game loop step that advances the simulation deterministically.

use super::collision::first_hit;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Hop pressed this frame (edge-triggered)
    pub hop: bool,
    /// Quit requested
    pub quit: bool,
    /// Demo mode - the autopilot decides when to hop
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
///
/// Order: input, integration, recycling, difficulty, collision. Returns what
/// happened; once the game is over this is a no-op.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase.is_over() {
        return events;
    }

    if input.quit {
        state.phase = GamePhase::Quit;
        log::info!("Quit requested at score {}", state.score);
        events.push(GameEvent::Quit { score: state.score });
        return events;
    }

    let hop = if input.autopilot {
        autopilot_wants_hop(state)
    } else {
        input.hop
    };
    if hop {
        state.player.apply_impulse(state.tuning.hop_impulse);
        // Limit how fast the player can fly up
        state.player.vel.y = state.player.vel.y.max(state.tuning.max_rise_speed);
    }

    state.time_ticks += 1;

    state.ceiling.tick(dt);
    state.ground.tick(dt);
    for pair in &mut state.pairs {
        pair.tick(dt);
    }
    state.player.tick(dt);

    // Recycle pairs that scrolled off the left edge
    for pair in &mut state.pairs {
        if pair.recycle_if_offscreen(&mut state.difficulty, &mut state.rng, &state.tuning) {
            state.score += 1;
            log::info!("score: {}", state.score);
            events.push(GameEvent::Scored { score: state.score });
        }
    }

    // One speed-up per point scored since the last one
    while state.score_at_last_speedup < state.score {
        state.score_at_last_speedup += 1;
        state
            .difficulty
            .on_score_increased(&mut state.pairs, &state.tuning);
        let speed = state.difficulty.obstacle_speed;
        log::info!("Obstacle speed now {}", speed);
        events.push(GameEvent::SpeedUp { speed });
    }

    if let Some(hazard) = first_hit(&state.player, state.hazards()) {
        state.phase = GamePhase::Crashed;
        log::info!("Crashed into {:?} with score {}", hazard, state.score);
        events.push(GameEvent::Crashed {
            hazard,
            score: state.score,
        });
    }

    events
}

/// Demo-mode hop decision: steer toward the middle of the next gap
///
/// Hops when the player has sunk below the gap centre and is not already
/// rising fast. Good enough to clear the early gaps; not a perfect player.
pub fn autopilot_wants_hop(state: &GameState) -> bool {
    let player = &state.player;

    let next_pair = state
        .pairs
        .iter()
        .filter(|p| p.right() > player.left())
        .min_by(|a, b| {
            a.left()
                .partial_cmp(&b.left())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let target = match next_pair {
        Some(pair) => {
            let (top, height) = pair.gap();
            top + height * 0.6
        }
        None => state.tuning.screen_height / 2.0,
    };

    let rising_fast = player.vel.y < state.tuning.hop_impulse * 0.4;
    player.bottom() > target && !rising_fast
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::Hazard;

    #[test]
    fn test_hop_impulse_and_clamp() {
        let mut state = GameState::new(1);
        let hop = TickInput {
            hop: true,
            ..Default::default()
        };

        tick(&mut state, &hop, SIM_DT);
        let after_one = state.player.vel.y;
        assert!((after_one - (-250.0 + 343.0 * SIM_DT)).abs() < 1e-3);

        // Second hop would reach about -489; clamped to -300 before gravity
        tick(&mut state, &hop, SIM_DT);
        assert!((state.player.vel.y - (-300.0 + 343.0 * SIM_DT)).abs() < 1e-3);
    }

    #[test]
    fn test_quit_is_immediate() {
        let mut state = GameState::new(1);
        let before = state.player.clone();
        let events = tick(
            &mut state,
            &TickInput {
                quit: true,
                hop: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(events, vec![GameEvent::Quit { score: 0 }]);
        assert_eq!(state.phase, GamePhase::Quit);
        assert_eq!(state.player, before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_falling_player_hits_ground() {
        let mut state = GameState::new(3);
        let input = TickInput::default();

        let mut crash = None;
        for _ in 0..200 {
            for event in tick(&mut state, &input, SIM_DT) {
                if let GameEvent::Crashed { hazard, .. } = event {
                    crash = Some(hazard);
                }
            }
            if state.phase.is_over() {
                break;
            }
        }

        assert_eq!(crash, Some(Hazard::Ground));
        assert_eq!(state.phase, GamePhase::Crashed);

        // Further ticks do nothing
        let ticks = state.time_ticks;
        assert!(tick(&mut state, &input, SIM_DT).is_empty());
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_recycle_scores_and_speeds_up() {
        let mut state = GameState::new(5);
        // Keep the player safely in the gap region by parking it far left
        state.player.pos.x = -1000.0;
        state.player.enable_gravity(0.0);
        state.pairs[0].high.pos.x = 1.0;
        state.pairs[0].low.pos.x = 1.0;

        let events = tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.score, 1);
        assert_eq!(state.score_at_last_speedup, 1);
        assert_eq!(
            events,
            vec![
                GameEvent::Scored { score: 1 },
                GameEvent::SpeedUp { speed: -105.0 }
            ]
        );
        for pair in &state.pairs {
            assert_eq!(pair.speed(), -105.0);
        }
        assert!(state.pairs[0].left() > 490.0);
    }

    struct CaptureLog(Mutex<Vec<(log::Level, String)>>);

    impl log::Log for CaptureLog {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }
        fn log(&self, record: &log::Record) {
            if let Ok(mut records) = self.0.lock() {
                records.push((record.level(), record.args().to_string()));
            }
        }
        fn flush(&self) {}
    }

    static CAPTURE: CaptureLog = CaptureLog(Mutex::new(Vec::new()));

    #[test]
    fn test_speed_up_logged_at_info() {
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Trace);

        let mut state = GameState::new(5);
        state.player.pos.x = -1000.0;
        state.player.enable_gravity(0.0);
        state.pairs[0].high.pos.x = 1.0;
        state.pairs[0].low.pos.x = 1.0;
        tick(&mut state, &TickInput::default(), SIM_DT);

        let records = CAPTURE.0.lock().unwrap();
        let speed_ups: Vec<_> = records
            .iter()
            .filter(|(_, msg)| msg.starts_with("Obstacle speed now"))
            .collect();
        assert!(!speed_ups.is_empty());
        assert!(speed_ups.iter().all(|(level, _)| *level == log::Level::Info));
    }

    #[test]
    fn test_two_recycles_in_one_tick_give_two_speedups() {
        let mut state = GameState::new(9);
        state.player.pos.x = -1000.0;
        state.player.enable_gravity(0.0);
        for pair in &mut state.pairs {
            pair.high.pos.x = 0.0;
            pair.low.pos.x = 0.0;
        }

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.score, 2);
        assert_eq!(state.difficulty.obstacle_speed, -110.0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        for _ in 0..600 {
            tick(&mut state1, &input, SIM_DT);
            tick(&mut state2, &input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.pairs, state2.pairs);
    }

    #[test]
    fn test_autopilot_decision() {
        let mut state = GameState::new(1);
        let (top, height) = state.pairs[0].gap();

        // Sinking below the gap: hop
        state.player.pos.y = top + height;
        state.player.vel.y = 50.0;
        assert!(autopilot_wants_hop(&state));

        // Well above the gap centre: wait
        state.player.pos.y = top;
        assert!(!autopilot_wants_hop(&state));

        // Below but already rising hard: wait
        state.player.pos.y = top + height;
        state.player.vel.y = -200.0;
        assert!(!autopilot_wants_hop(&state));
    }
}
