//! Axis-aligned collision test
//!
//! The test is one-directional: it only asks whether one of `a`'s corners lies
//! strictly inside `b`. A `b` fully inside `a`, or a cross-shaped overlap with
//! no corner of `a` inside `b`, is not reported. Game difficulty is tuned
//! around this, so callers always pass the player as `a`.

use super::body::Body;

#[inline]
fn inside(v: f32, lo: f32, hi: f32) -> bool {
    v > lo && v < hi
}

/// True if any corner of `a` lies strictly inside `b`
///
/// Edge contact is not a collision.
pub fn intersects(a: &Body, b: &Body) -> bool {
    let in_x = |x: f32| inside(x, b.left(), b.right());
    let in_y = |y: f32| inside(y, b.top(), b.bottom());

    // top-right, top-left, bottom-right, bottom-left
    (in_x(a.right()) && in_y(a.top()))
        || (in_x(a.left()) && in_y(a.top()))
        || (in_x(a.right()) && in_y(a.bottom()))
        || (in_x(a.left()) && in_y(a.bottom()))
}

/// First body in `others` that `a` collides with
pub fn first_hit<'a, T>(a: &Body, others: impl IntoIterator<Item = (T, &'a Body)>) -> Option<T> {
    others
        .into_iter()
        .find(|(_, other)| intersects(a, other))
        .map(|(tag, _)| tag)
}
