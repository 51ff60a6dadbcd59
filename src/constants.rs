// Front-end tuning constants: camera, lighting and assets.
//
// Physics tuning lives in `floaters_core::constants`; this file only covers
// what the browser and the renderer need.
// Camera
// Z distance of the eye; bounds and picking both derive from it.
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_FOV_DEG: f32 = 80.0;

// Clamp per-frame delta so a backgrounded tab does not fling sprites on return
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Lighting
pub const AMBIENT_INTENSITY: f32 = 0.7;
pub const POINTER_LIGHT_INTENSITY: f32 = 1.0;
pub const POINTER_LIGHT_SPREAD_X: f32 = 2.0; // ndc -> world x
pub const POINTER_LIGHT_SPREAD_Y: f32 = 1.5; // ndc -> world y
pub const POINTER_LIGHT_Z: f32 = 3.0;
pub const POINTER_LIGHT_DISTANCE: f32 = 8.0; // falloff reaches zero here
pub const POINTER_LIGHT_DECAY: f32 = 2.0;

// DOM
pub const CANVAS_ID: &str = "floaters-canvas";

// Sprite textures, in scene order ("w", "cursor", "star")
pub const SPRITE_TEXTURE_URLS: [&str; 3] = [
    "assets/w-3d.png",
    "assets/click-3d.png",
    "assets/santa-3d.png",
];
