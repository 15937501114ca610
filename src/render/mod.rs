//! GPU Rendering Core
//!
//! Everything below the [`Engine`] that touches the device lives here:
//! context creation, render targets, shader compilation, the pipeline
//! cache, the render-state machine, GPU renderables and the frame plan.
//!
//! [`Engine`]: crate::Engine

pub mod context;
pub mod emitter;
pub mod mesh;
pub mod passes;
pub mod pipeline;
pub mod shader;
pub mod state;
pub mod target;
pub mod terrain;
pub mod texture;
pub mod uniforms;
pub mod water;

pub use context::GpuContext;
pub use passes::{FramePlan, PassKind};
pub use state::{DrawState, RenderState};

/// Near clip plane distance.
pub const FRUSTRUM_NEAR: f32 = 1.0;
/// Far clip plane distance.
pub const FRUSTRUM_FAR: f32 = 2000.0;
/// Vertical field of view in degrees.
pub const FIELD_OF_VIEW: f32 = 60.0;
/// Anisotropy level for the anisotropic sampler.
pub const MAX_ANISOTROPY: u16 = 16;

/// Fixed light slot count in the scene constant block.
pub const MAX_LIGHTS: usize = 8;
/// Fixed wave slot count in the water constant block.
pub const MAX_WAVES: usize = 4;

/// Format of the offscreen scene/effects/blur targets.
pub const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
/// Depth buffer format.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
