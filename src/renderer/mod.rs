//! Rendering module
//!
//! The simulation only ever asks to clear the canvas and fill rectangles.
//! [`Canvas`] is that seam; [`Framebuffer`] renders in software (native,
//! tests) and [`QuadBatch`] feeds the WebGPU pipeline.

pub mod framebuffer;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use framebuffer::Framebuffer;
pub use pipeline::RenderState;
pub use shapes::QuadBatch;

use crate::Rgb;
use crate::colors;
use crate::sim::GameState;

/// Axis-aligned rectangle in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

/// Drawing surface the game renders onto
pub trait Canvas {
    /// Fill the whole surface with `color`
    fn clear(&mut self, color: Rgb);
    /// Fill `rect` with `color`, clipped to the surface
    fn fill_rect(&mut self, rect: PixelRect, color: Rgb);
}

/// Clear to the background and draw every body
pub fn draw_scene(state: &GameState, canvas: &mut impl Canvas) {
    canvas.clear(colors::BACKGROUND);
    for body in state.bodies() {
        body.draw(canvas);
    }
}
