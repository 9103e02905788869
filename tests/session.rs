//! End-to-end sessions driven through the public API

use hop_square::consts::SIM_DT;
use hop_square::platform::{AutopilotInput, ScriptedInput, Unpaced, run_session};
use hop_square::renderer::Framebuffer;
use hop_square::sim::{Body, GameEvent, GamePhase, GameState, Hazard, TickInput, intersects, tick};
use hop_square::{Tuning, colors};

fn square(left: f32, top: f32, size: f32) -> Body {
    Body::new(left, top, size, size, 0.0, colors::WHITE)
}

#[test]
fn test_hop_then_fall_for_one_second() {
    let mut state = GameState::new(7);
    let mut fb = Framebuffer::new(500, 500);
    let summary = run_session(
        &mut state,
        &mut ScriptedInput::hops([0]),
        &mut fb,
        &mut Unpaced,
        Some(30),
    );

    assert_eq!(summary.phase, GamePhase::Playing);
    assert_eq!(summary.ticks, 30);
    assert!((state.player.vel.y - 93.0).abs() < 0.01);
    // Rose and is coming back down, still inside the playfield
    assert!(state.player.top() < 250.0);
    assert!(state.player.top() > 50.0);
}

#[test]
fn test_pairs_scroll_and_score() {
    let mut state = GameState::new(11);
    state.player.enable_gravity(0.0);
    state.player.pos.x = -1000.0;

    let mut scores = Vec::new();
    for _ in 0..300 {
        for event in tick(&mut state, &TickInput::default(), SIM_DT) {
            if let GameEvent::Scored { score } = event {
                scores.push(score);
            }
        }
    }

    // Ten seconds at >= 100 px/s moves the first pair past the edge at least twice
    assert!(scores.len() >= 3);
    assert_eq!(scores, (1..=scores.len() as u32).collect::<Vec<_>>());
    assert_eq!(state.score_at_last_speedup, state.score);
    assert!(state.difficulty.obstacle_speed <= -100.0 - 5.0 * 3.0);
    for pair in &state.pairs {
        assert_eq!(pair.speed(), state.difficulty.obstacle_speed);
        let (top, height) = pair.gap();
        assert!(top >= 55.0);
        assert!(top + height <= 445.0);
    }
}

#[test]
fn test_corner_collision_scenarios() {
    let player = square(100.0, 100.0, 20.0);

    assert!(intersects(&player, &square(110.0, 110.0, 20.0)));
    assert!(!intersects(&player, &square(120.0, 100.0, 20.0)));
    let tall = Body::new(90.0, 50.0, 40.0, 200.0, 0.0, colors::GREEN);
    assert!(intersects(&player, &tall));
    // Only the first body's corners are tested
    assert!(!intersects(&tall, &player));
}

#[test]
fn test_silent_player_falls_into_ground() {
    let mut state = GameState::new(2);
    let mut fb = Framebuffer::new(500, 500);
    let mut crash = None;

    while !state.phase.is_over() {
        for event in tick(&mut state, &TickInput::default(), SIM_DT) {
            if let GameEvent::Crashed { hazard, score } = event {
                crash = Some((hazard, score));
            }
        }
        hop_square::renderer::draw_scene(&state, &mut fb);
    }

    assert_eq!(crash, Some((Hazard::Ground, 0)));
    assert!(state.player.bottom() > 450.0);
}

#[test]
fn test_quit_mid_session() {
    let mut state = GameState::new(3);
    let mut fb = Framebuffer::new(500, 500);
    let summary = run_session(
        &mut state,
        &mut ScriptedInput::hops([0, 10]).quit_at(12),
        &mut fb,
        &mut Unpaced,
        None,
    );
    assert_eq!(summary.phase, GamePhase::Quit);
    assert_eq!(summary.ticks, 12);
}

#[test]
fn test_same_seed_same_session() {
    let play = |seed| {
        let mut state = GameState::new(seed);
        let mut fb = Framebuffer::new(500, 500);
        let summary = run_session(&mut state, &mut AutopilotInput, &mut fb, &mut Unpaced, Some(900));
        let mut image = Vec::new();
        fb.write_ppm(&mut image).unwrap();
        (summary, state.pairs, image)
    };

    let (a_summary, a_pairs, a_image) = play(1234);
    let (b_summary, b_pairs, b_image) = play(1234);
    assert_eq!(a_summary, b_summary);
    assert_eq!(a_pairs, b_pairs);
    assert_eq!(a_image, b_image);
}

#[test]
fn test_snapshot_resumes_identically() {
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut live = GameState::new(42);
    for _ in 0..200 {
        tick(&mut live, &input, SIM_DT);
    }

    let json = serde_json::to_string(&live).unwrap();
    let mut resumed: GameState = serde_json::from_str(&json).unwrap();

    for _ in 0..400 {
        tick(&mut live, &input, SIM_DT);
        tick(&mut resumed, &input, SIM_DT);
    }
    assert_eq!(live.score, resumed.score);
    assert_eq!(live.pairs, resumed.pairs);
    assert_eq!(live.player, resumed.player);
    assert_eq!(live.phase, resumed.phase);
}

#[test]
fn test_custom_tuning_session() {
    let tuning = Tuning::from_json(r#"{ "gravity": 0.0 }"#).unwrap();
    let mut state = GameState::with_tuning(5, tuning).unwrap();
    let mut fb = Framebuffer::new(500, 500);

    // Without gravity the player just hovers until the first pair arrives
    let summary = run_session(
        &mut state,
        &mut ScriptedInput::default(),
        &mut fb,
        &mut Unpaced,
        Some(30),
    );
    assert_eq!(summary.phase, GamePhase::Playing);
    assert_eq!(state.player.top(), 250.0);

    let bad = Tuning {
        initial_obstacle_speed: 50.0,
        ..Tuning::default()
    };
    assert!(GameState::with_tuning(5, bad).is_err());
}
