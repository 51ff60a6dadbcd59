use glam::Vec3;

// Physics tuning shared by every front-end.

// Usable depth range of the volume (world z, independent of the camera)
pub const DEPTH_FRONT: f32 = 0.5;
pub const DEPTH_BACK: f32 = 2.0;

// Wall response
pub const WALL_BOUNCE: f32 = 0.8; // fraction of incoming speed kept
pub const MIN_BOUNCE_SPEED: f32 = 0.5; // a sprite resting on a wall still leaves it

// Integration
pub const VELOCITY_DECAY: f32 = 0.92; // applied once per frame
pub const VELOCITY_SCALE: f32 = 10.0; // velocity units -> world units per second
pub const FLOAT_LERP: f32 = 0.15;
pub const DRAG_LERP: f32 = 0.5;

// Pairwise repulsion
pub const REPULSION_FORCE: f32 = 0.8; // impulse per unit of overlap
pub const SEPARATION_SHARE: f32 = 0.5; // each sprite moves half the overlap
pub const MIN_CONTACT_DISTANCE: f32 = 0.01; // below this the normal is undefined

// Sprites
pub const SPRITE_RADIUS: f32 = 0.5;
pub const ROTATION_AMPLITUDE: f32 = 0.3;
pub const ROTATION_FREQUENCY: f32 = 0.3;

// Landing scene: "w", "cursor", "star"
pub const DEFAULT_SPRITE_NAMES: [&str; 3] = ["w", "cursor", "star"];
pub const DEFAULT_SPRITE_POSITIONS: [[f32; 3]; 3] =
    [[2.2, 1.5, 1.5], [-2.0, 0.2, 1.2], [2.5, -1.8, 0.9]];
pub const DEFAULT_BASE_DEPTHS: [f32; 3] = [1.0, 1.2, 0.9];
pub const DEFAULT_FLOAT_AMPLITUDES: [f32; 3] = [0.4, 0.2, 0.15];
pub const DEFAULT_FLOAT_FREQUENCIES: [f32; 3] = [0.4, 0.9, 0.4];
pub const DEFAULT_QUAD_HEIGHTS: [f32; 3] = [2.5, 2.0, 2.0];
// Texels with less alpha are discarded; the cursor keeps its soft edge
pub const DEFAULT_ALPHA_CUTOFFS: [f32; 3] = [0.1, 0.01, 0.1];

#[inline]
pub fn default_sprite_position(index: usize) -> Vec3 {
    Vec3::from_array(DEFAULT_SPRITE_POSITIONS[index % DEFAULT_SPRITE_POSITIONS.len()])
}
