use crate::constants::{CAMERA_FOV_DEG, CAMERA_Z, MAX_FRAME_DT_SEC};
use crate::draws::{self, SpriteSlot};
use crate::events::ReleaseListener;
use crate::input;
use crate::render;
use crate::scope::DragScope;
use floaters_core::{Camera, FloatingScene, FrameInput, SpriteId, Viewport};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SceneHandle = Rc<RefCell<FloatingScene<SpriteSlot>>>;

/// A sprite whose texture load finished (or failed) and is waiting for the
/// next frame to be installed.
pub struct PendingSprite {
    pub id: SpriteId,
    pub image: Option<render::LoadedImage>,
}

pub struct FrameContext {
    pub scene: SceneHandle,
    pub camera: Rc<RefCell<Camera>>,
    pub pointer: Rc<RefCell<input::PointerState>>,
    pub release: Rc<RefCell<DragScope<ReleaseListener>>>,
    pub pending: Rc<RefCell<Vec<PendingSprite>>>,

    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState>,

    pub stopped: Rc<Cell<bool>>,
    pub last_instant: Instant,
    pub elapsed_sec: f32,
}

impl FrameContext {
    pub fn frame(&mut self) {
        if self.stopped.get() {
            return;
        }
        let now = Instant::now();
        let dt_sec = (now - self.last_instant)
            .as_secs_f32()
            .min(MAX_FRAME_DT_SEC);
        self.last_instant = now;
        self.elapsed_sec += dt_sec;

        self.install_pending_sprites();

        let (width, height) = (self.canvas.width(), self.canvas.height());
        self.camera
            .borrow_mut()
            .set_viewport(Viewport::new(width as f32, height as f32));
        let camera = *self.camera.borrow();
        let pointer_ndc = self.pointer.borrow().ndc;

        let draws = {
            let mut scene = self.scene.borrow_mut();
            let contacts = scene.step(
                &camera,
                FrameInput {
                    elapsed_sec: self.elapsed_sec,
                    delta_sec: dt_sec,
                    pointer_ndc,
                },
            );
            for c in &contacts {
                log::trace!("[frame] contact {} / {} overlap={:.3}", c.a, c.b, c.overlap);
            }
            if self.release.borrow_mut().sync(scene.dragging()) {
                log::debug!("[frame] drag over; release listener dropped");
            }
            draws::collect_draws(&scene, camera.eye)
        };

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(width, height);
            g.set_pointer_light(input::pointer_light_position(pointer_ndc));
            match g.render(&camera, &draws) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("[frame] surface lost; reconfiguring");
                    g.reconfigure();
                }
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }

    /// Upload textures that arrived since the last frame and hand each sprite
    /// its render node. Sprites stay out of the simulation until this runs.
    fn install_pending_sprites(&mut self) {
        let arrived: Vec<PendingSprite> = self.pending.borrow_mut().drain(..).collect();
        if arrived.is_empty() {
            return;
        }
        let mut scene = self.scene.borrow_mut();
        for p in arrived {
            let aspect = match &mut self.gpu {
                Some(g) => g.install_sprite(p.id, p.image.as_ref()),
                None => p.image.as_ref().map_or(1.0, |img| img.aspect()),
            };
            if let Err(e) = scene.set_aspect(p.id, aspect) {
                log::warn!("[frame] {}", e);
            }
            match scene.attach_node(p.id, SpriteSlot::default()) {
                Ok(_) => log::info!("[frame] {} ready (aspect {:.2})", p.id, aspect),
                Err(e) => log::error!("[frame] {}", e),
            }
        }
    }

    /// Stop the loop and release the drag listener and GPU resources.
    pub fn shutdown(&mut self) {
        self.stopped.set(true);
        if let Ok(mut scene) = self.scene.try_borrow_mut() {
            scene.end_drag();
        }
        if self.release.borrow_mut().disarm() {
            log::debug!("[frame] release listener dropped on shutdown");
        }
        self.pending.borrow_mut().clear();
        self.gpu = None;
        log::info!("[frame] shut down after {:.1}s", self.elapsed_sec);
    }
}

pub fn initial_camera(canvas: &web::HtmlCanvasElement) -> Camera {
    Camera::looking_at_origin(
        CAMERA_Z,
        CAMERA_FOV_DEG,
        Viewport::new(canvas.width() as f32, canvas.height() as f32),
    )
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState> {
    match render::GpuState::new(canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    let stopped = frame_ctx.borrow().stopped.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if stopped.get() {
            return;
        }
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref().map(|c| c.as_ref().clone()))
    else {
        return;
    };
    _ = w.request_animation_frame(cb.unchecked_ref());
}
