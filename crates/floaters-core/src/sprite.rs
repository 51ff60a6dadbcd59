use crate::constants::*;
use glam::{Vec2, Vec3};
use std::borrow::{Borrow, BorrowMut};
use std::fmt;

/// Index of a sprite inside its scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(pub usize);

impl fmt::Display for SpriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sprite #{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Cosine,
}

impl Wave {
    #[inline]
    pub fn eval(self, x: f32) -> f32 {
        match self {
            Wave::Sine => x.sin(),
            Wave::Cosine => x.cos(),
        }
    }
}

/// `amplitude * wave(t * frequency + phase)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillation {
    pub wave: Wave,
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
}

impl Oscillation {
    pub const fn new(wave: Wave, amplitude: f32, frequency: f32) -> Self {
        Self {
            wave,
            amplitude,
            frequency,
            phase: 0.0,
        }
    }

    #[inline]
    pub fn sample(&self, elapsed_sec: f32) -> f32 {
        self.amplitude * self.wave.eval(elapsed_sec * self.frequency + self.phase)
    }
}

/// Static description of one sprite: where it starts and how it idles.
#[derive(Clone, Debug)]
pub struct SpriteConfig {
    pub name: &'static str,
    pub initial_position: Vec3,
    pub radius: f32,
    /// Rest depth the idle float oscillates around.
    pub base_z: f32,
    pub float: Oscillation,
    /// Visual tilt only; has no effect on collisions.
    pub rotation: Oscillation,
    /// World height of the textured quad; width follows the texture aspect.
    pub quad_height: f32,
    pub alpha_cutoff: f32,
}

impl SpriteConfig {
    /// One of the three landing sprites. Indices wrap.
    pub fn landing(index: usize) -> Self {
        let i = index % DEFAULT_SPRITE_NAMES.len();
        // "cursor" floats on a cosine so it never moves in step with the others
        let wave = if i == 1 { Wave::Cosine } else { Wave::Sine };
        Self {
            name: DEFAULT_SPRITE_NAMES[i],
            initial_position: default_sprite_position(i),
            radius: SPRITE_RADIUS,
            base_z: DEFAULT_BASE_DEPTHS[i],
            float: Oscillation::new(wave, DEFAULT_FLOAT_AMPLITUDES[i], DEFAULT_FLOAT_FREQUENCIES[i]),
            rotation: Oscillation::new(Wave::Cosine, ROTATION_AMPLITUDE, ROTATION_FREQUENCY),
            quad_height: DEFAULT_QUAD_HEIGHTS[i],
            alpha_cutoff: DEFAULT_ALPHA_CUTOFFS[i],
        }
    }

    /// Depth the idle float pulls toward at `elapsed_sec`.
    #[inline]
    pub fn float_z(&self, elapsed_sec: f32) -> f32 {
        self.base_z + self.float.sample(elapsed_sec)
    }
}

/// Mutable physics state of one sprite.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub base_position: Vec3,
    pub target_position: Vec3,
    pub radius: f32,
    pub is_dragging: bool,
    /// Latches on the first drag release. Nothing reads it yet.
    pub has_been_dragged: bool,
}

impl ObjectState {
    pub fn at_rest(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            base_position: position,
            target_position: position,
            radius,
            is_dragging: false,
            has_been_dragged: false,
        }
    }
}

/// Final placement handed to the render node each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteTransform {
    pub position: Vec3,
    pub rotation_z: f32,
}

/// Config, physics state and the visual bits picking needs.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub config: SpriteConfig,
    pub state: ObjectState,
    /// Texture width over height; 1 until the texture reports its size.
    pub aspect: f32,
    pub rotation_z: f32,
}

impl Sprite {
    pub fn new(config: SpriteConfig) -> Self {
        let state = ObjectState::at_rest(config.initial_position, config.radius);
        Self {
            config,
            state,
            aspect: 1.0,
            rotation_z: 0.0,
        }
    }

    /// World-space `(width, height)` of the textured quad.
    #[inline]
    pub fn quad_size(&self) -> Vec2 {
        let h = self.config.quad_height;
        Vec2::new(h * self.aspect, h)
    }

    pub fn transform(&self) -> SpriteTransform {
        SpriteTransform {
            position: self.state.position,
            rotation_z: self.rotation_z,
        }
    }

    /// Whether a world point on the sprite's plane falls inside its quad.
    pub fn quad_contains(&self, world: Vec3) -> bool {
        let d = world - self.state.position;
        let (sin, cos) = (-self.rotation_z).sin_cos();
        let lx = d.x * cos - d.y * sin;
        let ly = d.x * sin + d.y * cos;
        let half = self.quad_size() * 0.5;
        lx.abs() <= half.x && ly.abs() <= half.y
    }
}

impl Borrow<ObjectState> for Sprite {
    fn borrow(&self) -> &ObjectState {
        &self.state
    }
}

impl BorrowMut<ObjectState> for Sprite {
    fn borrow_mut(&mut self) -> &mut ObjectState {
        &mut self.state
    }
}
