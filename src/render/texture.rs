//! GPU Texture Arena
//!
//! [`TextureSet`] owns one GPU texture per scene texture descriptor,
//! addressed by the scene's integer texture IDs, plus the engine-lifetime
//! resources shared by every bind group: the three samplers and the blank
//! (neutral white) textures substituted into unused or disabled slots.

use crate::errors::{EngineError, Result};
use crate::scene::{TextureData, TextureFilter, TextureKind};

/// The three engine-lifetime samplers; per-texture filtering modes resolve
/// to one of these at bind-group build time.
pub struct Samplers {
    pub nearest: wgpu::Sampler,
    pub linear: wgpu::Sampler,
    pub anisotropic: wgpu::Sampler,
}

impl Samplers {
    pub fn new(device: &wgpu::Device) -> Self {
        let base = wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            ..Default::default()
        };
        Self {
            nearest: device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("Nearest Sampler"),
                ..base.clone()
            }),
            linear: device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("Linear Sampler"),
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                mipmap_filter: wgpu::MipmapFilterMode::Linear,
                ..base.clone()
            }),
            anisotropic: device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("Anisotropic Sampler"),
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                mipmap_filter: wgpu::MipmapFilterMode::Linear,
                anisotropy_clamp: crate::render::MAX_ANISOTROPY,
                ..base
            }),
        }
    }

    #[must_use]
    pub fn get(&self, filter: TextureFilter) -> &wgpu::Sampler {
        match filter {
            TextureFilter::Nearest => &self.nearest,
            TextureFilter::Linear => &self.linear,
            TextureFilter::Anisotropic => &self.anisotropic,
        }
    }
}

/// One uploaded scene texture.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub filter: TextureFilter,
}

impl GpuTexture {
    fn create(device: &wgpu::Device, queue: &wgpu::Queue, data: &TextureData) -> Result<Self> {
        if data.pixels.len() != data.expected_len() {
            return Err(EngineError::InvalidScene(format!(
                "texture '{}': {} bytes of pixel data, expected {}",
                data.name,
                data.pixels.len(),
                data.expected_len()
            )));
        }

        let layers = match data.kind {
            TextureKind::Flat => 1,
            TextureKind::Cube => 6,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&data.name),
            size: wgpu::Extent3d {
                width: data.width,
                height: data.height,
                depth_or_array_layers: layers,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        Self::upload(queue, &texture, data, layers);

        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            dimension: Some(match data.kind {
                TextureKind::Flat => wgpu::TextureViewDimension::D2,
                TextureKind::Cube => wgpu::TextureViewDimension::Cube,
            }),
            ..Default::default()
        });

        Ok(Self {
            texture,
            view,
            filter: data.filter,
        })
    }

    fn upload(queue: &wgpu::Queue, texture: &wgpu::Texture, data: &TextureData, layers: u32) {
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &data.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(data.width * 4),
                rows_per_image: Some(data.height),
            },
            wgpu::Extent3d {
                width: data.width,
                height: data.height,
                depth_or_array_layers: layers,
            },
        );
    }
}

/// Arena of scene textures plus the shared blank textures and samplers.
pub struct TextureSet {
    textures: Vec<GpuTexture>,
    blank: GpuTexture,
    blank_cube: GpuTexture,
    pub samplers: Samplers,
}

impl TextureSet {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Result<Self> {
        let blank = GpuTexture::create(device, queue, &blank_data(TextureKind::Flat))?;
        let blank_cube = GpuTexture::create(device, queue, &blank_data(TextureKind::Cube))?;
        Ok(Self {
            textures: Vec::new(),
            blank,
            blank_cube,
            samplers: Samplers::new(device),
        })
    }

    /// Drops and re-uploads the whole arena from the scene table.
    pub fn build(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[TextureData],
    ) -> Result<()> {
        self.textures = data
            .iter()
            .map(|d| GpuTexture::create(device, queue, d))
            .collect::<Result<_>>()?;
        Ok(())
    }

    /// Re-uploads a single texture in place (editor hot-reload).
    pub fn reload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        index: usize,
        data: &TextureData,
    ) -> Result<()> {
        if index >= self.textures.len() {
            return Err(EngineError::IndexOutOfBounds {
                context: "texture reload",
                index,
            });
        }
        self.textures[index] = GpuTexture::create(device, queue, data)?;
        Ok(())
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&GpuTexture> {
        self.textures.get(index)
    }

    /// Resolves a flat slot: the texture's view, or blank when unassigned.
    #[must_use]
    pub fn view_or_blank(&self, index: Option<usize>) -> &wgpu::TextureView {
        index
            .and_then(|i| self.textures.get(i))
            .map_or(&self.blank.view, |t| &t.view)
    }

    /// Resolves the environment slot against the blank cube.
    #[must_use]
    pub fn cube_view_or_blank(&self, index: Option<usize>) -> &wgpu::TextureView {
        index
            .and_then(|i| self.textures.get(i))
            .map_or(&self.blank_cube.view, |t| &t.view)
    }

    #[must_use]
    pub fn blank_view(&self) -> &wgpu::TextureView {
        &self.blank.view
    }

    /// Sampler for a slot, defaulting to anisotropic for blank fills.
    #[must_use]
    pub fn sampler_for(&self, index: Option<usize>) -> &wgpu::Sampler {
        let filter = index
            .and_then(|i| self.textures.get(i))
            .map_or(TextureFilter::Anisotropic, |t| t.filter);
        self.samplers.get(filter)
    }
}

fn blank_data(kind: TextureKind) -> TextureData {
    let faces = match kind {
        TextureKind::Flat => 1,
        TextureKind::Cube => 6,
    };
    TextureData {
        name: "blank".to_string(),
        kind,
        filter: TextureFilter::Linear,
        width: 1,
        height: 1,
        pixels: vec![0xff; 4 * faces],
    }
}
