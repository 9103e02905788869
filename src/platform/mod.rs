//! Platform abstraction layer
//!
//! The simulation never polls devices or waits on clocks itself. Platforms
//! supply:
//! - Input ([`InputSource`])
//! - Frame pacing ([`FramePacer`])
//! - A drawing surface ([`Canvas`](crate::renderer::Canvas))
//!
//! [`run_session`] ties them together for loop-driven platforms (native). The
//! browser is callback-driven and steps the simulation from `main.rs`.

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

use std::collections::BTreeSet;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::renderer::{Canvas, draw_scene};
use crate::sim::{GamePhase, GameState, TickInput, tick};

/// Supplies one frame's worth of input
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// Blocks until the next frame is due
pub trait FramePacer {
    fn wait(&mut self);
}

impl<P: FramePacer + ?Sized> FramePacer for Box<P> {
    fn wait(&mut self) {
        (**self).wait();
    }
}

/// Never blocks; runs the simulation as fast as possible
#[derive(Debug, Default)]
pub struct Unpaced;

impl FramePacer for Unpaced {
    fn wait(&mut self) {}
}

/// Lets the simulation fly itself
#[derive(Debug, Default)]
pub struct AutopilotInput;

impl InputSource for AutopilotInput {
    fn poll(&mut self) -> TickInput {
        TickInput {
            autopilot: true,
            ..Default::default()
        }
    }
}

/// Replays hops (and optionally a quit) on fixed frame numbers
#[derive(Debug, Default)]
pub struct ScriptedInput {
    hops: BTreeSet<u64>,
    quit_at: Option<u64>,
    frame: u64,
}

impl ScriptedInput {
    /// Hop on each listed frame (0-based)
    pub fn hops(frames: impl IntoIterator<Item = u64>) -> Self {
        Self {
            hops: frames.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Request quit on `frame`
    pub fn quit_at(mut self, frame: u64) -> Self {
        self.quit_at = Some(frame);
        self
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        let frame = self.frame;
        self.frame += 1;
        TickInput {
            hop: self.hops.contains(&frame),
            quit: self.quit_at == Some(frame),
            autopilot: false,
        }
    }
}

/// Turns variable frame deltas into whole fixed ticks
///
/// At most [`MAX_SUBSTEPS`] ticks run per frame. Time beyond what the next
/// frame could absorb is dropped, so a stalled tab resumes at normal speed.
#[derive(Debug, Default)]
pub struct StepAccumulator {
    accumulator: f32,
}

impl StepAccumulator {
    /// Add `frame_dt` seconds and return how many ticks to run now
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }

        self.accumulator = self.accumulator.min(MAX_SUBSTEPS as f32 * SIM_DT);
        steps
    }

    /// Unspent time carried into the next frame
    pub fn backlog(&self) -> f32 {
        self.accumulator
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    pub ticks: u64,
    /// `Playing` if the tick limit was reached first
    pub phase: GamePhase,
}

/// Run frames until a crash, a quit, or `max_ticks` frames
///
/// Each frame: wait for pacing, poll input, tick, then redraw.
pub fn run_session(
    state: &mut GameState,
    input: &mut impl InputSource,
    canvas: &mut impl Canvas,
    pacer: &mut impl FramePacer,
    max_ticks: Option<u64>,
) -> SessionSummary {
    let mut frames = 0u64;

    while !state.phase.is_over() && max_ticks.is_none_or(|max| frames < max) {
        pacer.wait();
        let frame_input = input.poll();
        tick(state, &frame_input, SIM_DT);
        frames += 1;

        if state.phase == GamePhase::Quit {
            break;
        }
        draw_scene(state, canvas);
    }

    SessionSummary {
        score: state.score,
        ticks: state.time_ticks,
        phase: state.phase,
    }
}
