//! Offscreen Render Targets
//!
//! A [`RenderTarget`] is one or two HDR color attachments plus an optional
//! depth buffer, sized to the window and recreated only on resize. Targets
//! double as texture inputs for the pass that follows them. A target can
//! additionally carry a copy texture, used by the separable blur to sample
//! the previous pass result while writing back into the same target.

use crate::render::{DEPTH_FORMAT, HDR_FORMAT};

pub struct RenderTarget {
    label: &'static str,
    textures: Vec<wgpu::Texture>,
    views: Vec<wgpu::TextureView>,
    depth_view: Option<wgpu::TextureView>,
    copy_texture: Option<wgpu::Texture>,
    copy_view: Option<wgpu::TextureView>,
    color_count: usize,
    with_depth: bool,
    with_copy: bool,
    width: u32,
    height: u32,
}

impl RenderTarget {
    pub fn new(
        device: &wgpu::Device,
        label: &'static str,
        width: u32,
        height: u32,
        color_count: usize,
        with_depth: bool,
        with_copy: bool,
    ) -> Self {
        let mut target = Self {
            label,
            textures: Vec::new(),
            views: Vec::new(),
            depth_view: None,
            copy_texture: None,
            copy_view: None,
            color_count,
            with_depth,
            with_copy,
            width,
            height,
        };
        target.create(device);
        target
    }

    fn create(&mut self, device: &wgpu::Device) {
        let size = wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        };
        let base = wgpu::TextureDescriptor {
            label: Some(self.label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: HDR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        };

        self.textures = (0..self.color_count)
            .map(|_| device.create_texture(&base))
            .collect();
        self.views = self
            .textures
            .iter()
            .map(|t| t.create_view(&wgpu::TextureViewDescriptor::default()))
            .collect();

        self.depth_view = self.with_depth.then(|| {
            device
                .create_texture(&wgpu::TextureDescriptor {
                    format: DEPTH_FORMAT,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                        | wgpu::TextureUsages::TEXTURE_BINDING,
                    ..base
                })
                .create_view(&wgpu::TextureViewDescriptor::default())
        });

        if self.with_copy {
            let copy = device.create_texture(&wgpu::TextureDescriptor {
                usage: wgpu::TextureUsages::COPY_DST | wgpu::TextureUsages::TEXTURE_BINDING,
                ..base
            });
            self.copy_view = Some(copy.create_view(&wgpu::TextureViewDescriptor::default()));
            self.copy_texture = Some(copy);
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width > 0 && height > 0 && (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.create(device);
        }
    }

    /// Snapshots color attachment 0 into the copy texture.
    pub fn snapshot(&self, encoder: &mut wgpu::CommandEncoder) {
        let Some(copy) = &self.copy_texture else {
            return;
        };
        encoder.copy_texture_to_texture(
            self.textures[0].as_image_copy(),
            copy.as_image_copy(),
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }

    #[inline]
    pub fn color_view(&self, index: usize) -> &wgpu::TextureView {
        &self.views[index]
    }

    #[inline]
    pub fn depth_view(&self) -> Option<&wgpu::TextureView> {
        self.depth_view.as_ref()
    }

    /// The snapshot view; only present when built `with_copy`.
    #[inline]
    pub fn copy_view(&self) -> Option<&wgpu::TextureView> {
        self.copy_view.as_ref()
    }

    #[inline]
    pub fn color_count(&self) -> usize {
        self.color_count
    }
}
