use floaters_core::{FloatingScene, SpriteId, SpriteNode, SpriteTransform};
use glam::{Vec2, Vec3};

/// Render-side node for one sprite: holds the last transform the scene wrote.
#[derive(Default, Clone, Copy, Debug)]
pub struct SpriteSlot {
    transform: Option<SpriteTransform>,
}

impl SpriteSlot {
    #[inline]
    pub fn transform(&self) -> Option<SpriteTransform> {
        self.transform
    }
}

impl SpriteNode for SpriteSlot {
    fn set_transform(&mut self, transform: SpriteTransform) {
        self.transform = Some(transform);
    }
}

/// One textured quad to draw this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteDraw {
    pub id: SpriteId,
    pub transform: SpriteTransform,
    pub size: Vec2,
    pub alpha_cutoff: f32,
}

/// Draw list for every sprite that has received a transform, farthest from
/// `eye` first so alpha blending composites correctly.
pub fn collect_draws(scene: &FloatingScene<SpriteSlot>, eye: Vec3) -> Vec<SpriteDraw> {
    let mut draws: Vec<SpriteDraw> = scene
        .nodes()
        .filter_map(|(id, slot)| {
            let transform = slot.transform()?;
            let sprite = scene.sprite(id)?;
            Some(SpriteDraw {
                id,
                transform,
                size: sprite.quad_size(),
                alpha_cutoff: sprite.config.alpha_cutoff,
            })
        })
        .collect();
    sort_back_to_front(&mut draws, eye);
    draws
}

pub fn sort_back_to_front(draws: &mut [SpriteDraw], eye: Vec3) {
    draws.sort_by(|a, b| {
        let da = eye.distance_squared(a.transform.position);
        let db = eye.distance_squared(b.transform.position);
        db.total_cmp(&da).then(a.id.cmp(&b.id))
    });
}
