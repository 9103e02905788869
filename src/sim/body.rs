//! Kinematic body: an axis-aligned rectangle with velocity and gravity
//!
//! Bodies are created once per session and then only moved, resized and
//! repositioned. Obstacles are recycled, never rebuilt.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Rgb;
use crate::renderer::{Canvas, PixelRect};

/// An axis-aligned rectangle with physical state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner (pixels, y grows downward)
    pub pos: Vec2,
    /// Width and height (pixels, never negative)
    pub size: Vec2,
    /// Velocity (pixels/s)
    pub vel: Vec2,
    /// Vertical acceleration (pixels/s²), zero unless gravity is enabled
    pub accel_y: f32,
    /// Fractional vertical pixels not yet applied to `pos`
    pub carry_y: f32,
    /// Display color, ignored by physics
    pub color: Rgb,
}

impl Body {
    pub fn new(left: f32, top: f32, width: f32, height: f32, xvel: f32, color: Rgb) -> Self {
        Self {
            pos: Vec2::new(left, top),
            size: Vec2::new(width.max(0.0), height.max(0.0)),
            vel: Vec2::new(xvel, 0.0),
            accel_y: 0.0,
            carry_y: 0.0,
            color,
        }
    }

    /// Turn on a constant downward acceleration
    pub fn enable_gravity(&mut self, accel: f32) {
        self.accel_y = accel;
    }

    /// Add `delta_v` to the vertical velocity. Callers clamp the result.
    pub fn apply_impulse(&mut self, delta_v: f32) {
        self.vel.y += delta_v;
    }

    /// Advance one fixed timestep of `dt` seconds
    ///
    /// Vertical moves smaller than a pixel accumulate in `carry_y` and are
    /// released one whole pixel at a time, so slow motion near the apex of a
    /// hop is delayed rather than lost. A tick either moves directly or works
    /// the carry, never both.
    pub fn tick(&mut self, dt: f32) {
        self.pos.x += self.vel.x * dt;

        self.vel.y += self.accel_y * dt;
        let dy = self.vel.y * dt;

        if dy.abs() < 1.0 {
            self.carry_y += dy;
            if self.carry_y.abs() >= 1.0 {
                // |carry| < 2 here, so the whole-pixel part is exactly ±1
                let step = self.carry_y.signum();
                self.pos.y += step;
                self.carry_y -= step;
            }
        } else {
            self.pos.y += dy;
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Resize vertically, keeping the top edge
    pub fn set_height(&mut self, height: f32) {
        self.size.y = height.max(0.0);
    }

    /// Rectangle snapped to whole pixels for drawing
    pub fn pixel_rect(&self) -> PixelRect {
        PixelRect {
            left: self.pos.x as i32,
            top: self.pos.y as i32,
            width: self.size.x as u32,
            height: self.size.y as u32,
        }
    }

    /// Fill this body's rectangle with its color
    pub fn draw(&self, canvas: &mut impl Canvas) {
        canvas.fill_rect(self.pixel_rect(), self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::consts::{GRAVITY, SIM_DT};
    use proptest::prelude::*;

    fn resting_player() -> Body {
        let mut body = Body::new(100.0, 250.0, 20.0, 20.0, 0.0, colors::PLAYER);
        body.enable_gravity(GRAVITY);
        body
    }

    #[test]
    fn test_static_body_does_not_move() {
        let mut body = Body::new(0.0, 0.0, 500.0, 50.0, 0.0, colors::BORDER);
        for _ in 0..100 {
            body.tick(SIM_DT);
        }
        assert_eq!(body.pos, Vec2::ZERO);
        assert_eq!(body.carry_y, 0.0);
    }

    #[test]
    fn test_horizontal_motion_every_tick() {
        let mut body = Body::new(480.0, 50.0, 20.0, 100.0, -90.0, colors::HIGH_BLOCK);
        body.tick(SIM_DT);
        assert!((body.left() - 477.0).abs() < 1e-4);
        assert_eq!(body.top(), 50.0);
    }

    #[test]
    fn test_small_moves_go_to_carry() {
        let mut body = resting_player();

        // First tick: v = 343/30, dy = 0.381 px -> carried, no movement
        body.tick(SIM_DT);
        assert_eq!(body.top(), 250.0);
        assert!((body.carry_y - 0.381).abs() < 1e-3);

        // Second tick: dy = 0.762, carry reaches 1.143 -> one pixel released
        body.tick(SIM_DT);
        assert_eq!(body.top(), 251.0);
        assert!((body.carry_y - 0.143).abs() < 1e-3);
    }

    #[test]
    fn test_large_moves_skip_carry() {
        let mut body = resting_player();
        body.vel.y = 60.0; // 2 px per tick
        body.carry_y = 0.5;
        body.tick(SIM_DT);
        assert!(body.top() > 252.0);
        assert_eq!(body.carry_y, 0.5);
    }

    #[test]
    fn test_negative_carry_keeps_sign() {
        let mut body = Body::new(0.0, 100.0, 10.0, 10.0, 0.0, colors::PLAYER);
        body.vel.y = -15.0; // -0.5 px per tick
        body.tick(SIM_DT);
        assert_eq!(body.top(), 100.0);
        body.tick(SIM_DT);
        // carry hit -1.0 -> moved up one pixel, carry back to ~0
        assert_eq!(body.top(), 99.0);
        assert!(body.carry_y.abs() < 1e-4);
    }

    #[test]
    fn test_hop_then_fall_velocity() {
        let mut body = resting_player();
        body.apply_impulse(-250.0);

        let mut crossed_zero_at = None;
        for i in 1..=30 {
            body.tick(SIM_DT);
            if crossed_zero_at.is_none() && body.vel.y >= 0.0 {
                crossed_zero_at = Some(i as f32 * SIM_DT);
            }
        }

        assert!((body.vel.y - 93.0).abs() < 0.01, "vel.y = {}", body.vel.y);
        let t = crossed_zero_at.unwrap();
        assert!((t - 0.73).abs() < 0.05, "apex at {t}");
        // Rose before falling back
        assert!(body.top() < 250.0);
    }

    #[test]
    fn test_draw_truncates_to_pixels() {
        struct Recorder(Vec<(PixelRect, Rgb)>);
        impl Canvas for Recorder {
            fn clear(&mut self, _color: Rgb) {}
            fn fill_rect(&mut self, rect: PixelRect, color: Rgb) {
                self.0.push((rect, color));
            }
        }

        let body = Body::new(99.7, 250.2, 20.0, 20.0, 0.0, colors::PLAYER);
        let mut recorder = Recorder(Vec::new());
        body.draw(&mut recorder);
        assert_eq!(
            recorder.0,
            vec![(
                PixelRect {
                    left: 99,
                    top: 250,
                    width: 20,
                    height: 20
                },
                colors::PLAYER
            )]
        );
    }

    proptest! {
        /// The carry never loses displacement: after N ticks from rest the
        /// body has moved the discrete kinematic distance, minus less than
        /// one pixel still held in the carry.
        #[test]
        fn prop_carry_preserves_displacement(
            accel in 0.0f32..600.0,
            ticks in 1usize..200,
        ) {
            let dt = SIM_DT;
            let mut body = Body::new(0.0, 0.0, 10.0, 10.0, 0.0, colors::PLAYER);
            body.enable_gravity(accel);

            let mut last = 0.0f32;
            for _ in 0..ticks {
                body.tick(dt);
                prop_assert!(body.top() >= last);
                last = body.top();
            }

            // v_n = a·dt·n, moved v_n·dt each tick
            let n = ticks as f32;
            let expected = 0.5 * accel * dt * dt * n * (n + 1.0);
            let moved = body.top() + body.carry_y;
            let tolerance = 1e-3 * expected.max(1.0);
            prop_assert!((moved - expected).abs() <= tolerance,
                "moved {} expected {}", moved, expected);
            prop_assert!(body.carry_y.abs() < 1.0);
        }
    }

    #[test]
    fn test_hundred_ticks_of_gravity() {
        let mut body = Body::new(0.0, 0.0, 10.0, 10.0, 0.0, colors::PLAYER);
        body.enable_gravity(GRAVITY);
        for _ in 0..100 {
            body.tick(SIM_DT);
        }
        // Velocity is updated before position, so after N ticks the body has
        // fallen a·dt²·N(N+1)/2. That exceeds the continuous ½·a·t² by
        // ½·a·dt·t (about 57 px here), so "within 1 px of ½·a·t²" cannot hold
        // for this integration order. Compare against the discrete result.
        let t = 100.0 * SIM_DT;
        let expected = 0.5 * GRAVITY * t * t + 0.5 * GRAVITY * SIM_DT * t;
        assert!((body.top() - expected).abs() < 1.0, "top {}", body.top());
    }
}
