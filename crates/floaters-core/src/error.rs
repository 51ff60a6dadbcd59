use crate::sprite::SpriteId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("scene has no sprites")]
    Empty,
    #[error("sprite {index} has invalid radius {radius}")]
    InvalidRadius { index: usize, radius: f32 },
    #[error("sprite {index} radius {radius} differs from shared radius {expected}")]
    NonUniformRadius {
        index: usize,
        radius: f32,
        expected: f32,
    },
    #[error("unknown {0}")]
    UnknownSprite(SpriteId),
    #[error("{0} has no render node yet")]
    Detached(SpriteId),
    #[error("{active} is already being dragged")]
    DragInProgress { active: SpriteId },
    #[error("invalid aspect ratio {aspect} for {id}")]
    InvalidAspect { id: SpriteId, aspect: f32 },
}
