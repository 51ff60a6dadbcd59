use crate::dom;
use crate::frame::SceneHandle;
use crate::input;
use crate::scope::DragScope;
use floaters_core::Camera;
use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// Events that end a drag wherever the pointer is.
const RELEASE_EVENTS: [&str; 2] = ["pointerup", "pointercancel"];

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: SceneHandle,
    pub camera: Rc<RefCell<Camera>>,
    pub pointer: Rc<RefCell<input::PointerState>>,
    pub release: Rc<RefCell<DragScope<ReleaseListener>>>,
    pub stopped: Rc<Cell<bool>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
}

#[inline]
fn event_ndc(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
    input::client_to_ndc(client, dom::css_rect(canvas))
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if w.stopped.get() {
            return;
        }
        w.pointer.borrow_mut().ndc = event_ndc(&ev, &w.canvas);
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if w.stopped.get() {
            return;
        }
        let ndc = event_ndc(&ev, &w.canvas);
        w.pointer.borrow_mut().ndc = ndc;

        let camera = w.camera.borrow();
        let mut scene = w.scene.borrow_mut();
        let Some(id) = scene.pick(&camera, ndc) else {
            return;
        };
        if let Err(e) = scene.begin_drag(id, &camera, ndc) {
            log::warn!("[pointer] {}", e);
            return;
        }
        match ReleaseListener::acquire(w.scene.clone()) {
            Ok(listener) => {
                // replacing a stale guard removes its listener first
                w.release.borrow_mut().arm(listener);
                log::info!("[pointer] begin drag on {}", id);
            }
            Err(e) => {
                log::error!("[pointer] release listener: {:?}", e);
                scene.end_drag();
            }
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Window-level release listener that lives exactly as long as one drag.
///
/// Registered when a drag starts; dropping the guard unregisters it. The
/// frame loop drops it once the scene reports no active drag, and unmount
/// drops it unconditionally.
pub struct ReleaseListener {
    window: web::Window,
    closure: Closure<dyn FnMut(web::PointerEvent)>,
}

impl ReleaseListener {
    pub fn acquire(scene: SceneHandle) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            if let Ok(mut scene) = scene.try_borrow_mut() {
                if let Some(id) = scene.end_drag() {
                    log::info!("[pointer] release {}", id);
                }
            }
        }) as Box<dyn FnMut(web::PointerEvent)>);
        // on a partial failure the guard's drop unregisters whatever got added
        let listener = Self { window, closure };
        for kind in RELEASE_EVENTS {
            listener
                .window
                .add_event_listener_with_callback(kind, listener.closure.as_ref().unchecked_ref())
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }
        Ok(listener)
    }
}

impl Drop for ReleaseListener {
    fn drop(&mut self) {
        for kind in RELEASE_EVENTS {
            _ = self
                .window
                .remove_event_listener_with_callback(kind, self.closure.as_ref().unchecked_ref());
        }
        log::debug!("[pointer] release listener removed");
    }
}
