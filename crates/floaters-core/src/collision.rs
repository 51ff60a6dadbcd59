//! Wall and sprite-to-sprite collision response.
//!
//! Both resolvers correct position immediately and leave an impulse in the
//! velocity so the response stays visible over the next frames.

use crate::bounds::Bounds;
use crate::constants::*;
use crate::sprite::{ObjectState, SpriteId};
use smallvec::SmallVec;
use std::borrow::BorrowMut;

/// Tunables for one scene. Defaults match the landing page.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsParams {
    pub bounce: f32,
    pub min_bounce_speed: f32,
    pub velocity_decay: f32,
    pub velocity_scale: f32,
    pub float_lerp: f32,
    pub drag_lerp: f32,
    pub repulsion: f32,
    pub separation_share: f32,
    pub min_contact_distance: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            bounce: WALL_BOUNCE,
            min_bounce_speed: MIN_BOUNCE_SPEED,
            velocity_decay: VELOCITY_DECAY,
            velocity_scale: VELOCITY_SCALE,
            float_lerp: FLOAT_LERP,
            drag_lerp: DRAG_LERP,
            repulsion: REPULSION_FORCE,
            separation_share: SEPARATION_SHARE,
            min_contact_distance: MIN_CONTACT_DISTANCE,
        }
    }
}

/// A resolved overlap between two sprites.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub a: SpriteId,
    pub b: SpriteId,
    pub overlap: f32,
}

/// Clamp `obj` inside `bounds` on every axis and bounce it back inward.
///
/// Returns true if any wall was touched.
pub fn resolve_walls(obj: &mut ObjectState, bounds: &Bounds, params: &PhysicsParams) -> bool {
    let mut hit = false;
    for axis in 0..3 {
        let (min, max) = bounds.axis(axis);
        hit |= bounce_axis(
            &mut obj.position[axis],
            &mut obj.velocity[axis],
            obj.radius,
            min,
            max,
            params,
        );
    }
    hit
}

// When the box is narrower than the sprite the lower wall wins.
#[inline]
fn bounce_axis(
    pos: &mut f32,
    vel: &mut f32,
    radius: f32,
    min: f32,
    max: f32,
    params: &PhysicsParams,
) -> bool {
    if *pos - radius < min {
        *pos = min + radius;
        *vel = (vel.abs() * params.bounce).max(params.min_bounce_speed);
        true
    } else if *pos + radius > max {
        *pos = max - radius;
        *vel = -(vel.abs() * params.bounce).max(params.min_bounce_speed);
        true
    } else {
        false
    }
}

/// Push two overlapping sprites apart. Returns the overlap that was resolved.
pub fn resolve_pair(
    a: &mut ObjectState,
    b: &mut ObjectState,
    params: &PhysicsParams,
) -> Option<f32> {
    let distance = a.position.distance(b.position);
    let min_distance = a.radius + b.radius;
    if distance >= min_distance || distance <= params.min_contact_distance {
        return None;
    }
    let direction = (a.position - b.position) / distance;
    let overlap = min_distance - distance;
    let push = direction * (overlap * params.repulsion);
    a.velocity += push;
    b.velocity -= push;
    let correction = direction * (overlap * params.separation_share);
    a.position += correction;
    b.position -= correction;
    Some(overlap)
}

/// Resolve every unordered pair once, in index order (0-1, 0-2, 1-2, ...).
pub fn resolve_pairs<S: BorrowMut<ObjectState>>(
    objects: &mut [S],
    params: &PhysicsParams,
) -> SmallVec<[Contact; 3]> {
    let mut contacts = SmallVec::new();
    for i in 0..objects.len() {
        let (head, tail) = objects.split_at_mut(i + 1);
        let a: &mut ObjectState = head[i].borrow_mut();
        for (k, other) in tail.iter_mut().enumerate() {
            let j = i + 1 + k;
            let b: &mut ObjectState = other.borrow_mut();
            if let Some(overlap) = resolve_pair(a, b, params) {
                log::trace!("[collision] {} <-> {} overlap={:.3}", i, j, overlap);
                contacts.push(Contact {
                    a: SpriteId(i),
                    b: SpriteId(j),
                    overlap,
                });
            }
        }
    }
    contacts
}
