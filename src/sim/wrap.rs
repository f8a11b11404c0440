//! Toroidal playfield topology
//!
//! Leaving one edge re-enters from the opposite edge. Correction is a single
//! step per axis, so a body must move less than one screen extent per tick.

use glam::Vec2;

/// Wrap a position onto `[0, width) x [0, height)`
#[inline]
pub fn wrap(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, width), wrap_axis(pos.y, height))
}

#[inline]
fn wrap_axis(mut v: f32, extent: f32) -> f32 {
    if v < 0.0 {
        v += extent;
    }
    if v >= extent {
        v -= extent;
    }
    v
}
