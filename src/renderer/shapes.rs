//! Rectangle batching for the GPU path
//!
//! [`QuadBatch`] is a [`Canvas`] that records filled rectangles as triangle
//! pairs in normalized device coordinates, ready for upload.

use glam::Vec2;

use super::vertex::Vertex;
use super::{Canvas, PixelRect};
use crate::Rgb;
use crate::colors;

pub struct QuadBatch {
    /// Logical canvas size in pixels
    width: f32,
    height: f32,
    background: Rgb,
    vertices: Vec<Vertex>,
}

impl QuadBatch {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            background: colors::BACKGROUND,
            vertices: Vec::with_capacity(7 * 6),
        }
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Pixel coordinates (y down) to NDC (y up)
    fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x / self.width * 2.0 - 1.0, 1.0 - y / self.height * 2.0)
    }
}

impl Canvas for QuadBatch {
    fn clear(&mut self, color: Rgb) {
        self.background = color;
        self.vertices.clear();
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgb) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        let top_left = self.to_ndc(rect.left as f32, rect.top as f32);
        let bottom_right = self.to_ndc(
            rect.left as f32 + rect.width as f32,
            rect.top as f32 + rect.height as f32,
        );
        let top_right = Vec2::new(bottom_right.x, top_left.y);
        let bottom_left = Vec2::new(top_left.x, bottom_right.y);

        // Two triangles
        for corner in [top_left, bottom_left, top_right, top_right, bottom_left, bottom_right] {
            self.vertices.push(Vertex::new(corner, color));
        }
    }
}
