use crate::constants::{
    AMBIENT_INTENSITY, POINTER_LIGHT_DECAY, POINTER_LIGHT_DISTANCE, POINTER_LIGHT_INTENSITY,
};
use crate::draws::SpriteDraw;
use floaters_core::{Camera, SpriteId};
use fnv::FnvHashMap;
use glam::Vec3;
use web_sys as web;

mod helpers;
mod sprites;
mod textures;

pub use textures::{load_image, LoadedImage};

use sprites::{SceneUniforms, SpriteMaterial, SpriteResources, SpriteUniforms};

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sprites: SpriteResources,
    materials: FnvHashMap<SpriteId, SpriteMaterial>,
    width: u32,
    height: u32,
    pointer_light: Vec3,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // the page shows through wherever no sprite is drawn
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[gpu] surface {}x{} format={:?} alpha={:?}",
            width,
            height,
            format,
            alpha_mode
        );

        let sprites = sprites::create_sprite_resources(&device, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            sprites,
            materials: FnvHashMap::default(),
            width,
            height,
            pointer_light: Vec3::ZERO,
        })
    }

    /// Upload a sprite's texture and return its width/height ratio. Without an
    /// image the sprite is drawn with a plain white square.
    pub fn install_sprite(&mut self, id: SpriteId, image: Option<&LoadedImage>) -> f32 {
        let (view, aspect) = match image {
            Some(img) => (
                textures::upload_image(&self.device, &self.queue, img),
                img.aspect(),
            ),
            None => (helpers::create_white_texture(&self.device, &self.queue), 1.0),
        };
        let label = format!("sprite_{}", id.0);
        let material = sprites::create_material(&self.device, &self.sprites, &label, &view);
        self.materials.insert(id, material);
        aspect
    }

    pub fn set_pointer_light(&mut self, position: Vec3) {
        self.pointer_light = position;
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reapply the current configuration after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, camera: &Camera, draws: &[SpriteDraw]) -> Result<(), wgpu::SurfaceError> {
        let scene = SceneUniforms {
            view_proj: camera.view_projection().to_cols_array_2d(),
            pointer_light: self.pointer_light.extend(POINTER_LIGHT_INTENSITY).to_array(),
            light_params: [
                AMBIENT_INTENSITY,
                POINTER_LIGHT_DISTANCE,
                POINTER_LIGHT_DECAY,
                0.0,
            ],
        };
        self.queue
            .write_buffer(&self.sprites.scene_buffer, 0, bytemuck::bytes_of(&scene));
        for draw in draws {
            if let Some(mat) = self.materials.get(&draw.id) {
                let u = SpriteUniforms::for_draw(draw);
                self.queue
                    .write_buffer(&mat.uniform_buffer, 0, bytemuck::bytes_of(&u));
            }
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sprite_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.sprites.pipeline);
            rpass.set_bind_group(0, &self.sprites.scene_bind_group, &[]);
            for draw in draws {
                let Some(mat) = self.materials.get(&draw.id) else {
                    continue;
                };
                rpass.set_bind_group(1, &mat.bind_group, &[]);
                rpass.draw(0..6, 0..1);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
