//! Per-frame integrator for the floating sprites.
//!
//! The scene owns every sprite's state and an explicit map from sprite to its
//! render node. A sprite whose node is not attached yet is skipped for the
//! frame, but it still takes part in pairwise collisions.

use crate::bounds::Bounds;
use crate::collision::{self, Contact, PhysicsParams};
use crate::drag::DragController;
use crate::error::SceneError;
use crate::sprite::{Sprite, SpriteConfig, SpriteId, SpriteTransform};
use crate::state::Camera;
use fnv::FnvHashMap;
use glam::Vec2;
use smallvec::SmallVec;

/// Receives the final transform of one sprite once per frame.
pub trait SpriteNode {
    fn set_transform(&mut self, transform: SpriteTransform);
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub sprites: Vec<SpriteConfig>,
    pub physics: PhysicsParams,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sprites: (0..3).map(SpriteConfig::landing).collect(),
            physics: PhysicsParams::default(),
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), SceneError> {
        let first = self.sprites.first().ok_or(SceneError::Empty)?;
        let expected = first.radius;
        for (index, s) in self.sprites.iter().enumerate() {
            if !(s.radius.is_finite() && s.radius > 0.0) {
                return Err(SceneError::InvalidRadius {
                    index,
                    radius: s.radius,
                });
            }
            if s.radius != expected {
                return Err(SceneError::NonUniformRadius {
                    index,
                    radius: s.radius,
                    expected,
                });
            }
        }
        Ok(())
    }
}

/// Time and pointer input for one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub elapsed_sec: f32,
    pub delta_sec: f32,
    /// Live pointer in normalized device coordinates, y up.
    pub pointer_ndc: Vec2,
}

pub struct FloatingScene<N> {
    sprites: Vec<Sprite>,
    params: PhysicsParams,
    drag: DragController,
    nodes: FnvHashMap<SpriteId, N>,
}

impl<N: SpriteNode> FloatingScene<N> {
    pub fn new(config: SceneConfig) -> Result<Self, SceneError> {
        config.validate()?;
        let sprites = config.sprites.into_iter().map(Sprite::new).collect();
        Ok(Self {
            sprites,
            params: config.physics,
            drag: DragController::default(),
            nodes: FnvHashMap::default(),
        })
    }

    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(id.0)
    }

    pub fn sprite_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.get_mut(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = SpriteId> {
        (0..self.sprites.len()).map(SpriteId)
    }

    /// Bind `node` to `id`, returning the node it replaces.
    pub fn attach_node(&mut self, id: SpriteId, node: N) -> Result<Option<N>, SceneError> {
        if id.0 >= self.sprites.len() {
            return Err(SceneError::UnknownSprite(id));
        }
        Ok(self.nodes.insert(id, node))
    }

    pub fn detach_node(&mut self, id: SpriteId) -> Option<N> {
        self.nodes.remove(&id)
    }

    pub fn node(&self, id: SpriteId) -> Option<&N> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (SpriteId, &N)> {
        self.nodes.iter().map(|(id, n)| (*id, n))
    }

    /// Record the texture's width/height ratio so the quad and hit region match it.
    pub fn set_aspect(&mut self, id: SpriteId, aspect: f32) -> Result<(), SceneError> {
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(SceneError::InvalidAspect { id, aspect });
        }
        let sprite = self
            .sprites
            .get_mut(id.0)
            .ok_or(SceneError::UnknownSprite(id))?;
        sprite.aspect = aspect;
        Ok(())
    }

    /// Sprite under the pointer, nearest to the camera first. Sprites without
    /// a render node are not on screen and cannot be hit.
    pub fn pick(&self, camera: &Camera, ndc: Vec2) -> Option<SpriteId> {
        let mut best = None::<(SpriteId, f32)>;
        for (i, sprite) in self.sprites.iter().enumerate() {
            if !self.nodes.contains_key(&SpriteId(i)) {
                continue;
            }
            let Some(hit) = camera.project_to_plane(ndc, sprite.state.position.z) else {
                continue;
            };
            if !sprite.quad_contains(hit) {
                continue;
            }
            let dist = camera.eye.distance(hit);
            match best {
                Some((_, bd)) if dist >= bd => {}
                _ => best = Some((SpriteId(i), dist)),
            }
        }
        best.map(|(id, _)| id)
    }

    #[inline]
    pub fn dragging(&self) -> Option<SpriteId> {
        self.drag.active()
    }

    /// Start dragging `id` with the pointer at `ndc`. The sprite must have a
    /// render node attached.
    pub fn begin_drag(&mut self, id: SpriteId, camera: &Camera, ndc: Vec2) -> Result<(), SceneError> {
        let sprite = self
            .sprites
            .get_mut(id.0)
            .ok_or(SceneError::UnknownSprite(id))?;
        if !self.nodes.contains_key(&id) {
            return Err(SceneError::Detached(id));
        }
        let pointer_world = camera
            .project_to_plane(ndc, sprite.state.position.z)
            .unwrap_or(sprite.state.position);
        self.drag.begin(id, &mut sprite.state, pointer_world)
    }

    /// End the active drag, if any. Safe to call repeatedly.
    pub fn end_drag(&mut self) -> Option<SpriteId> {
        let id = self.drag.active()?;
        let sprite = self.sprites.get_mut(id.0)?;
        self.drag.end(&mut sprite.state)
    }

    /// Advance one frame and write transforms to the attached nodes.
    ///
    /// Per sprite: idle float or drag follow, velocity decay and integration,
    /// wall clamp, node write. Pairwise repulsion runs last, so it may leave a
    /// sprite slightly outside the walls until the next frame.
    pub fn step(&mut self, camera: &Camera, frame: FrameInput) -> SmallVec<[Contact; 3]> {
        let bounds = Bounds::for_camera(camera);
        let t = frame.elapsed_sec;
        let params = &self.params;

        for (i, sprite) in self.sprites.iter_mut().enumerate() {
            let Some(node) = self.nodes.get_mut(&SpriteId(i)) else {
                continue;
            };
            let state = &mut sprite.state;

            if state.is_dragging {
                let pointer = camera.project_to_plane(frame.pointer_ndc, state.position.z);
                self.drag.follow(state, pointer, params.drag_lerp);
            } else {
                state.target_position = state.position;
                state.target_position.z = sprite.config.float_z(t);
                state.position = state.position.lerp(state.target_position, params.float_lerp);
            }

            state.velocity *= params.velocity_decay;
            state.position += state.velocity * (frame.delta_sec * params.velocity_scale);

            collision::resolve_walls(state, &bounds, params);

            sprite.rotation_z = sprite.config.rotation.sample(t);
            node.set_transform(sprite.transform());
        }

        collision::resolve_pairs(&mut self.sprites, params)
    }
}
