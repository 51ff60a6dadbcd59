use crate::constants::{POINTER_LIGHT_SPREAD_X, POINTER_LIGHT_SPREAD_Y, POINTER_LIGHT_Z};
use glam::{Vec2, Vec3};

/// Latest pointer sample, in normalized device coordinates (y up).
#[derive(Default, Clone, Copy, Debug)]
pub struct PointerState {
    pub ndc: Vec2,
}

/// Canvas bounding rect in CSS pixels.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct CssRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Map a client-space pointer position to NDC over `rect`.
///
/// Positions outside the canvas map outside `[-1, 1]`; a collapsed rect maps
/// to the centre.
#[inline]
pub fn client_to_ndc(client: Vec2, rect: CssRect) -> Vec2 {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Vec2::ZERO;
    }
    let u = (client.x - rect.left) / rect.width;
    let v = (client.y - rect.top) / rect.height;
    Vec2::new(u * 2.0 - 1.0, 1.0 - v * 2.0)
}

/// Where the point light sits for a pointer at `ndc`.
#[inline]
pub fn pointer_light_position(ndc: Vec2) -> Vec3 {
    Vec3::new(
        ndc.x * POINTER_LIGHT_SPREAD_X,
        ndc.y * POINTER_LIGHT_SPREAD_Y,
        POINTER_LIGHT_Z,
    )
}
