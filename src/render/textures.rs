use super::helpers;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// A decoded image ready for upload.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    pub url: String,
    pub image: web::HtmlImageElement,
    pub width: u32,
    pub height: u32,
}

impl LoadedImage {
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

pub async fn load_image(url: &str) -> anyhow::Result<LoadedImage> {
    let image = web::HtmlImageElement::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    image.set_cross_origin(Some("anonymous"));
    image.set_src(url);
    JsFuture::from(image.decode())
        .await
        .map_err(|e| anyhow::anyhow!("decode {}: {:?}", url, e))?;
    let (width, height) = (image.natural_width(), image.natural_height());
    if width == 0 || height == 0 {
        anyhow::bail!("{} decoded to an empty image", url);
    }
    Ok(LoadedImage {
        url: url.to_string(),
        image,
        width,
        height,
    })
}

pub fn upload_image(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    img: &LoadedImage,
) -> wgpu::TextureView {
    let texture = helpers::create_sprite_texture(device, &img.url, img.width, img.height);
    queue.copy_external_image_to_texture(
        &wgpu::CopyExternalImageSourceInfo {
            source: wgpu::ExternalImageSource::HTMLImageElement(img.image.clone()),
            origin: wgpu::Origin2d::ZERO,
            flip_y: false,
        },
        wgpu::CopyExternalImageDestInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
            color_space: wgpu::PredefinedColorSpace::Srgb,
            // the shader premultiplies after lighting
            premultiplied_alpha: false,
        },
        wgpu::Extent3d {
            width: img.width,
            height: img.height,
            depth_or_array_layers: 1,
        },
    );
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
