//! Camera and viewport descriptions shared with the front-ends.
//!
//! Nothing here touches a platform API. The web front-end rebuilds the
//! viewport from the canvas every frame and asks the camera to turn pointer
//! coordinates into world positions.

use glam::{Mat4, Vec2, Vec3, Vec4};

/// Pixel size of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height. A zero height counts as one pixel.
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub viewport: Viewport,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera on the +Z axis at `distance`, looking at the origin.
    pub fn looking_at_origin(distance: f32, fov_degrees: f32, viewport: Viewport) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            viewport,
            fovy_radians: fov_degrees.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Distance from the eye to the z = 0 plane.
    #[inline]
    pub fn distance(&self) -> f32 {
        self.eye.z
    }

    #[inline]
    pub fn fov_degrees(&self) -> f32 {
        self.fovy_radians.to_degrees()
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy_radians,
            self.viewport.aspect(),
            self.znear,
            self.zfar,
        )
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a normalized device coordinate.
    ///
    /// Returns `(ray_origin, ray_direction)`; the origin is the eye.
    pub fn ndc_ray(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let ro = self.eye;
        let rd = (p1 - ro).normalize();
        (ro, rd)
    }

    /// Intersect the pointer ray with the plane `z = plane_z`.
    ///
    /// `None` when the ray runs parallel to the plane or the plane lies
    /// behind the eye.
    pub fn project_to_plane(&self, ndc: Vec2, plane_z: f32) -> Option<Vec3> {
        let (ro, rd) = self.ndc_ray(ndc);
        if rd.z.abs() <= 1e-6 {
            return None;
        }
        let t = (plane_z - ro.z) / rd.z;
        if t < 0.0 {
            return None;
        }
        let hit = ro + rd * t;
        hit.is_finite().then_some(hit)
    }
}
