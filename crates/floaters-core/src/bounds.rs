use crate::constants::{DEPTH_BACK, DEPTH_FRONT};
use crate::state::{Camera, Viewport};

/// Box visible through the camera at the z = 0 plane, plus a fixed depth range.
///
/// Derived fresh every frame; the viewport can change between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub front: f32,
    pub back: f32,
}

impl Bounds {
    /// `distance` is the camera z, `fov_degrees` the vertical field of view.
    pub fn from_view(distance: f32, fov_degrees: f32, viewport: Viewport) -> Self {
        let fov = fov_degrees.to_radians();
        let height = 2.0 * (fov / 2.0).tan() * distance;
        let width = height * viewport.aspect();
        Self {
            left: -width / 2.0,
            right: width / 2.0,
            top: height / 2.0,
            bottom: -height / 2.0,
            front: DEPTH_FRONT,
            back: DEPTH_BACK,
        }
    }

    pub fn for_camera(camera: &Camera) -> Self {
        Self::from_view(camera.distance(), camera.fov_degrees(), camera.viewport)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// `(min, max)` along axis 0 = x, 1 = y, 2 = z.
    #[inline]
    pub fn axis(&self, axis: usize) -> (f32, f32) {
        match axis {
            0 => (self.left, self.right),
            1 => (self.bottom, self.top),
            _ => (self.front, self.back),
        }
    }
}
