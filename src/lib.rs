#![cfg(target_arch = "wasm32")]
use floaters_core::{FloatingScene, SceneConfig, SpriteId};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod draws;
mod events;
mod frame;
mod input;
mod render;
mod scope;

use constants::{CANVAS_ID, SPRITE_TEXTURE_URLS};

thread_local! {
    static APP: RefCell<Option<Rc<RefCell<frame::FrameContext>>>> = const { RefCell::new(None) };
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Fetch each sprite texture in the background. Results are queued for the
/// frame loop; a failed load still queues the sprite so it shows untextured.
fn spawn_texture_loads(pending: &Rc<RefCell<Vec<frame::PendingSprite>>>, count: usize) {
    for (i, url) in SPRITE_TEXTURE_URLS.iter().copied().enumerate().take(count) {
        let pending = pending.clone();
        spawn_local(async move {
            let image = match render::load_image(url).await {
                Ok(img) => {
                    log::info!("[textures] {} {}x{}", url, img.width, img.height);
                    Some(img)
                }
                Err(e) => {
                    log::warn!("[textures] {:?}; using a blank quad", e);
                    None
                }
            };
            pending.borrow_mut().push(frame::PendingSprite {
                id: SpriteId(i),
                image,
            });
        });
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("floaters starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Stop the frame loop and release the drag listener and GPU state.
#[wasm_bindgen]
pub fn unmount() {
    let app = APP.with(|a| a.borrow_mut().take());
    match app {
        Some(ctx) => ctx.borrow_mut().shutdown(),
        None => log::warn!("unmount: not mounted"),
    }
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let config = SceneConfig::default();
    let sprite_count = config.sprites.len();
    let scene: frame::SceneHandle = Rc::new(RefCell::new(FloatingScene::new(config)?));
    let camera = Rc::new(RefCell::new(frame::initial_camera(&canvas)));
    let pointer = Rc::new(RefCell::new(input::PointerState::default()));
    let release = Rc::new(RefCell::new(scope::DragScope::default()));
    let pending = Rc::new(RefCell::new(Vec::new()));
    let stopped = Rc::new(Cell::new(false));

    let gpu = frame::init_gpu(&canvas).await;

    spawn_texture_loads(&pending, sprite_count);

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        scene: scene.clone(),
        camera: camera.clone(),
        pointer: pointer.clone(),
        release: release.clone(),
        stopped: stopped.clone(),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        camera,
        pointer,
        release,
        pending,
        canvas,
        gpu,
        stopped,
        last_instant: Instant::now(),
        elapsed_sec: 0.0,
    }));
    APP.with(|a| *a.borrow_mut() = Some(frame_ctx.clone()));
    frame::start_loop(frame_ctx);
    Ok(())
}
