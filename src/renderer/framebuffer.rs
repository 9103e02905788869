//! Software RGB framebuffer
//!
//! Used by the headless native runner and by tests. Can dump itself as a
//! binary PPM for a quick look at a frame.

use std::io::{self, Write};

use super::{Canvas, PixelRect};
use crate::Rgb;
use crate::colors;

pub struct Framebuffer {
    width: usize,
    height: usize,
    px: Vec<Rgb>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            px: vec![colors::BACKGROUND; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at (x, y), `None` outside the buffer
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.px[y * self.width + x])
        } else {
            None
        }
    }

    /// Write the frame as a binary PPM (P6)
    pub fn write_ppm(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        let bytes: Vec<u8> = self.px.iter().flat_map(|c| [c.0, c.1, c.2]).collect();
        out.write_all(&bytes)?;
        out.flush()
    }
}

impl Canvas for Framebuffer {
    fn clear(&mut self, color: Rgb) {
        self.px.fill(color);
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgb) {
        // Clip in i64 so huge rects can't overflow
        let x0 = (rect.left as i64).clamp(0, self.width as i64) as usize;
        let y0 = (rect.top as i64).clamp(0, self.height as i64) as usize;
        let x1 = (rect.left as i64 + rect.width as i64).clamp(0, self.width as i64) as usize;
        let y1 = (rect.top as i64 + rect.height as i64).clamp(0, self.height as i64) as usize;

        for y in y0..y1 {
            let row = y * self.width;
            self.px[row + x0..row + x1].fill(color);
        }
    }
}
