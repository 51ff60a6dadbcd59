pub mod bounds;
pub mod collision;
pub mod constants;
pub mod drag;
pub mod error;
pub mod scene;
pub mod sprite;
pub mod state;

pub use bounds::*;
pub use collision::{Contact, PhysicsParams};
pub use constants::*;
pub use drag::DragController;
pub use error::SceneError;
pub use scene::*;
pub use sprite::*;
pub use state::*;
