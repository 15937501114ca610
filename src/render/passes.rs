//! Frame Plan & Fullscreen Passes
//!
//! [`FramePlan`] is the pure, GPU-free statement of the frame's pass order.
//! [`FullscreenPass`] carries the recurring plumbing of the three
//! post-geometry stages: a constant buffer, a bind group over up to four
//! input textures, and a fullscreen-triangle draw.

use crate::render::pipeline::{BindLayouts, FULLSCREEN_INPUTS};

/// One stage of the frame, in plan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    Scene,
    PreEffects,
    BlurHorizontal,
    BlurVertical,
    PostComposite,
}

/// The fixed pass sequence executed every frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePlan {
    passes: [PassKind; 5],
}

impl FramePlan {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            passes: [
                PassKind::Scene,
                PassKind::PreEffects,
                PassKind::BlurHorizontal,
                PassKind::BlurVertical,
                PassKind::PostComposite,
            ],
        }
    }

    #[must_use]
    pub fn passes(&self) -> &[PassKind] {
        &self.passes
    }
}

impl Default for FramePlan {
    fn default() -> Self {
        Self::standard()
    }
}

/// GPU plumbing for one fullscreen stage.
///
/// The bind group references target views, so it is rebuilt whenever the
/// targets are recreated (resize, reinitialization).
pub struct FullscreenPass {
    label: String,
    pub shader: usize,
    uniform_buffer: wgpu::Buffer,
    bind_group: Option<wgpu::BindGroup>,
}

impl FullscreenPass {
    pub fn new(
        device: &wgpu::Device,
        label: impl Into<String>,
        shader: usize,
        uniform_size: u64,
    ) -> Self {
        let label = label.into();
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} Constants")),
            size: uniform_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            label,
            shader,
            uniform_buffer,
            bind_group: None,
        }
    }

    /// Rebuilds the bind group over the stage's input views. Unused inputs
    /// repeat the first view; the shader simply never samples them.
    pub fn bind(
        &mut self,
        device: &wgpu::Device,
        layouts: &BindLayouts,
        inputs: &[&wgpu::TextureView],
        sampler: &wgpu::Sampler,
    ) {
        debug_assert!(!inputs.is_empty() && inputs.len() <= FULLSCREEN_INPUTS);
        let slot = |i: usize| *inputs.get(i).unwrap_or(&inputs[0]);

        self.bind_group = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} BindGroup", self.label)),
            layout: &layouts.fullscreen,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(slot(0)),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(slot(1)),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(slot(2)),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::TextureView(slot(3)),
                },
                wgpu::BindGroupEntry {
                    binding: 5,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }));
    }

    pub fn write_constants(&self, queue: &wgpu::Queue, bytes: &[u8]) {
        queue.write_buffer(&self.uniform_buffer, 0, bytes);
    }

    /// Records the fullscreen triangle; a no-op if `bind` has not run yet.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if let Some(bind_group) = &self.bind_group {
            pass.set_bind_group(0, bind_group, &[]);
            pass.draw(0..3, 0..1);
        }
    }
}
