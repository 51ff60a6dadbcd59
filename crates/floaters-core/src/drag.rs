//! Single-pointer drag: `Idle -> Dragging -> Idle`.
//!
//! The pointer is one exclusive grab, so at most one sprite is dragged at a
//! time. While dragging, the sprite chases the pointer projected onto its own
//! current depth plus the offset captured at press time.

use crate::error::SceneError;
use crate::sprite::{ObjectState, SpriteId};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
struct DragSession {
    sprite: SpriteId,
    offset: Vec3,
}

#[derive(Clone, Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    /// Sprite currently held, if any.
    #[inline]
    pub fn active(&self) -> Option<SpriteId> {
        self.session.map(|s| s.sprite)
    }

    /// Offset from the pointer's world position to the held sprite.
    #[inline]
    pub fn offset(&self) -> Option<Vec3> {
        self.session.map(|s| s.offset)
    }

    /// Grab `state`. `pointer_world` is the pointer on the sprite's depth plane.
    pub fn begin(
        &mut self,
        id: SpriteId,
        state: &mut ObjectState,
        pointer_world: Vec3,
    ) -> Result<(), SceneError> {
        if let Some(active) = self.active() {
            return Err(SceneError::DragInProgress { active });
        }
        state.is_dragging = true;
        state.velocity = Vec3::ZERO;
        let offset = state.position - pointer_world;
        self.session = Some(DragSession { sprite: id, offset });
        log::debug!(
            "[drag] begin {} offset=({:.2},{:.2},{:.2})",
            id,
            offset.x,
            offset.y,
            offset.z
        );
        Ok(())
    }

    /// Pull the held sprite toward the pointer. A `None` pointer (degenerate
    /// projection) holds the sprite where it is for this frame.
    pub fn follow(&self, state: &mut ObjectState, pointer_world: Option<Vec3>, lerp: f32) {
        let (Some(session), Some(pointer)) = (self.session, pointer_world) else {
            return;
        };
        let target = pointer + session.offset;
        state.target_position = target;
        state.position = state.position.lerp(target, lerp);
    }

    /// Release the grab. The sprite's current position becomes its new anchor.
    pub fn end(&mut self, state: &mut ObjectState) -> Option<SpriteId> {
        let session = self.session.take()?;
        state.is_dragging = false;
        state.has_been_dragged = true;
        state.base_position = state.position;
        state.target_position = state.position;
        log::debug!(
            "[drag] end {} at ({:.2},{:.2},{:.2})",
            session.sprite,
            state.position.x,
            state.position.y,
            state.position.z
        );
        Some(session.sprite)
    }
}
