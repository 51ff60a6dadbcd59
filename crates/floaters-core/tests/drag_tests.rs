use floaters_core::*;
use glam::{Vec2, Vec3};

#[derive(Default)]
struct NullNode;

impl SpriteNode for NullNode {
    fn set_transform(&mut self, _transform: SpriteTransform) {}
}

const DT: f32 = 1.0 / 60.0;

fn camera() -> Camera {
    Camera::looking_at_origin(5.0, 80.0, Viewport::new(800.0, 800.0))
}

fn ndc_of(cam: &Camera, p: Vec3) -> Vec2 {
    let clip = cam.view_projection() * p.extend(1.0);
    Vec2::new(clip.x / clip.w, clip.y / clip.w)
}

fn single_sprite_scene(at: Vec3) -> FloatingScene<NullNode> {
    let cfg = SceneConfig {
        sprites: vec![SpriteConfig::landing(1)],
        physics: PhysicsParams::default(),
    };
    let mut scene = FloatingScene::new(cfg).unwrap();
    scene.attach_node(SpriteId(0), NullNode).unwrap();
    scene.sprite_mut(SpriteId(0)).unwrap().state.position = at;
    scene
}

fn attached_landing_scene() -> FloatingScene<NullNode> {
    let mut scene = FloatingScene::new(SceneConfig::default()).unwrap();
    let ids: Vec<_> = scene.ids().collect();
    for id in ids {
        scene.attach_node(id, NullNode).unwrap();
    }
    scene
}

fn drive(scene: &mut FloatingScene<NullNode>, cam: &Camera, pointer: Vec2, frames: std::ops::Range<u32>) {
    for n in frames {
        scene.step(
            cam,
            FrameInput {
                elapsed_sec: n as f32 * DT,
                delta_sec: DT,
                pointer_ndc: pointer,
            },
        );
    }
}

#[test]
fn press_grabs_and_zeroes_velocity() {
    let cam = camera();
    let mut scene = single_sprite_scene(Vec3::new(0.0, 0.0, 1.2));
    scene.sprite_mut(SpriteId(0)).unwrap().state.velocity = Vec3::new(1.0, -1.0, 0.5);
    scene.begin_drag(SpriteId(0), &cam, Vec2::ZERO).unwrap();
    let s = &scene.sprites()[0].state;
    assert!(s.is_dragging);
    assert_eq!(s.velocity, Vec3::ZERO);
    assert!(!s.has_been_dragged);
    assert_eq!(scene.dragging(), Some(SpriteId(0)));
}

#[test]
fn drag_then_release_sets_new_anchor() {
    let cam = camera();
    let mut scene = single_sprite_scene(Vec3::new(0.0, 0.0, 1.2));
    scene.begin_drag(SpriteId(0), &cam, Vec2::ZERO).unwrap();

    let goal = Vec3::new(1.0, 1.0, 1.2);
    drive(&mut scene, &cam, ndc_of(&cam, goal), 0..60);
    assert!(scene.sprites()[0].state.position.distance(goal) < 1e-3);

    assert_eq!(scene.end_drag(), Some(SpriteId(0)));
    let s = &scene.sprites()[0].state;
    assert!(!s.is_dragging);
    assert!(s.has_been_dragged);
    assert_eq!(s.base_position, s.position);
    assert_eq!(s.target_position, s.position);
    assert!(s.base_position.distance(goal) < 1e-3);
    assert!(scene.dragging().is_none());
}

#[test]
fn drag_keeps_grab_offset() {
    let cam = camera();
    let mut scene = single_sprite_scene(Vec3::new(0.0, 0.0, 1.2));
    // grab 0.5 left of centre
    let press = ndc_of(&cam, Vec3::new(-0.5, 0.0, 1.2));
    scene.begin_drag(SpriteId(0), &cam, press).unwrap();
    let pointer = ndc_of(&cam, Vec3::new(0.5, 0.5, 1.2));
    drive(&mut scene, &cam, pointer, 0..60);
    let p = scene.sprites()[0].state.position;
    assert!(p.distance(Vec3::new(1.0, 0.5, 1.2)) < 1e-3, "{p:?}");
}

#[test]
fn drag_follow_is_a_half_step_per_frame() {
    let cam = camera();
    let mut scene = single_sprite_scene(Vec3::new(0.0, 0.0, 1.2));
    scene.begin_drag(SpriteId(0), &cam, Vec2::ZERO).unwrap();
    let pointer = ndc_of(&cam, Vec3::new(2.0, 0.0, 1.2));
    drive(&mut scene, &cam, pointer, 0..1);
    let s = &scene.sprites()[0].state;
    assert!((s.position.x - 1.0).abs() < 1e-3);
    assert!((s.target_position.x - 2.0).abs() < 1e-3);
}

#[test]
fn has_been_dragged_latches() {
    let cam = camera();
    let mut scene = single_sprite_scene(Vec3::new(0.0, 0.0, 1.2));
    scene.begin_drag(SpriteId(0), &cam, Vec2::ZERO).unwrap();
    for n in 0..10 {
        drive(&mut scene, &cam, Vec2::new(0.1, 0.0), n..n + 1);
        assert!(!scene.sprites()[0].state.has_been_dragged);
    }
    scene.end_drag();
    assert!(scene.sprites()[0].state.has_been_dragged);
    drive(&mut scene, &cam, Vec2::ZERO, 10..40);
    assert!(scene.sprites()[0].state.has_been_dragged);

    scene.begin_drag(SpriteId(0), &cam, Vec2::ZERO).unwrap();
    assert!(scene.sprites()[0].state.has_been_dragged);
    scene.end_drag();
    assert!(scene.sprites()[0].state.has_been_dragged);
}

#[test]
fn only_one_sprite_can_be_held() {
    let cam = camera();
    let mut scene = attached_landing_scene();
    scene.begin_drag(SpriteId(0), &cam, Vec2::ZERO).unwrap();
    assert_eq!(
        scene.begin_drag(SpriteId(1), &cam, Vec2::ZERO),
        Err(SceneError::DragInProgress {
            active: SpriteId(0)
        })
    );
    assert!(!scene.sprites()[1].state.is_dragging);
    let held = scene.sprites().iter().filter(|s| s.state.is_dragging).count();
    assert_eq!(held, 1);
}

#[test]
fn release_without_drag_is_a_no_op() {
    let mut scene = attached_landing_scene();
    let before: Vec<_> = scene.sprites().iter().map(|s| s.state.clone()).collect();
    assert_eq!(scene.end_drag(), None);
    assert_eq!(scene.end_drag(), None);
    let after: Vec<_> = scene.sprites().iter().map(|s| s.state.clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn unknown_sprite_cannot_be_grabbed() {
    let cam = camera();
    let mut scene: FloatingScene<NullNode> = FloatingScene::new(SceneConfig::default()).unwrap();
    assert_eq!(
        scene.begin_drag(SpriteId(5), &cam, Vec2::ZERO),
        Err(SceneError::UnknownSprite(SpriteId(5)))
    );
    assert!(scene.dragging().is_none());
}

#[test]
fn sprite_without_node_cannot_be_grabbed() {
    let cam = camera();
    let mut scene: FloatingScene<NullNode> = FloatingScene::new(SceneConfig::default()).unwrap();
    scene.attach_node(SpriteId(0), NullNode).unwrap();
    assert_eq!(
        scene.begin_drag(SpriteId(1), &cam, Vec2::ZERO),
        Err(SceneError::Detached(SpriteId(1)))
    );
    assert!(!scene.sprites()[1].state.is_dragging);
    assert!(scene.dragging().is_none());
}
