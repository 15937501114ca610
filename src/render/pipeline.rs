//! Pipeline Cache
//!
//! Central owner of every `wgpu::RenderPipeline`. Blend, depth-write and
//! rasterizer state are baked into pipelines, so the render-state machine's
//! "create once, select thereafter" rule maps to a cache keyed by the full
//! state tuple: pipelines live in a contiguous `Vec` addressed by
//! [`RenderPipelineId`], with an `FxHashMap` lookup from [`PipelineKey`].
//! The cache is cleared when shaders are recompiled.

use rustc_hash::FxHashMap;

use crate::render::shader::{scene_constant_layout, ShaderProgram};
use crate::render::state::DrawState;
use crate::render::uniforms::ParticleInstance;
use crate::render::{DEPTH_FORMAT, HDR_FORMAT};
use crate::scene::MESH_VERTEX_FLOATS;

const MESH_ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    0 => Float32x3, // position
    1 => Float32x2, // uv
    2 => Float32x3, // normal
    3 => Float32x3, // tangent
    4 => Float32x3, // bitangent
];

const PARTICLE_QUAD_ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
    0 => Float32x2, // corner
    1 => Float32x2, // uv
];

const PARTICLE_INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    2 => Float32x3, // center
    3 => Float32,   // size
    4 => Float32,   // alpha
];

/// Vertex input family of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexKind {
    /// Interleaved mesh layout.
    Mesh,
    /// Quad corners plus a per-particle instance buffer.
    Particle,
    /// No vertex buffers; positions generated from the vertex index.
    Fullscreen,
}

/// Attachment family of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetLayout {
    /// Scene target: color + normal MRT with depth.
    SceneMrt,
    /// One HDR color attachment, no depth.
    SingleHdr,
    /// The window surface, no depth.
    Surface,
}

/// Full state tuple identifying one pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub shader: usize,
    pub draw_state: DrawState,
    pub alpha_blend: bool,
    pub depth_write: bool,
    pub vertex: VertexKind,
    pub target: TargetLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderPipelineId(u32);

/// The bind group layouts shared by every pipeline: scene constants
/// (group 0), per-draw constants (group 1), textures (group 2) for
/// geometry; a single combined group for fullscreen passes.
pub struct BindLayouts {
    pub scene: wgpu::BindGroupLayout,
    pub object: wgpu::BindGroupLayout,
    pub textures: wgpu::BindGroupLayout,
    pub fullscreen: wgpu::BindGroupLayout,
}

/// Number of texture inputs in the fullscreen bind group.
pub const FULLSCREEN_INPUTS: usize = 4;

impl BindLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let texture_entry = |binding, dimension| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: dimension,
                multisampled: false,
            },
            count: None,
        };
        let sampler_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        };

        let object = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object Constants Layout"),
            entries: &[uniform_entry(0)],
        });

        // Semantic slots: diffuse, normal, specular, environment (cube),
        // caustics; one sampler resolved from the diffuse filter.
        let textures = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Material Textures Layout"),
            entries: &[
                texture_entry(0, wgpu::TextureViewDimension::D2),
                texture_entry(1, wgpu::TextureViewDimension::D2),
                texture_entry(2, wgpu::TextureViewDimension::D2),
                texture_entry(3, wgpu::TextureViewDimension::Cube),
                texture_entry(4, wgpu::TextureViewDimension::D2),
                sampler_entry(5),
            ],
        });

        let fullscreen = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Fullscreen Pass Layout"),
            entries: &[
                uniform_entry(0),
                texture_entry(1, wgpu::TextureViewDimension::D2),
                texture_entry(2, wgpu::TextureViewDimension::D2),
                texture_entry(3, wgpu::TextureViewDimension::D2),
                texture_entry(4, wgpu::TextureViewDimension::D2),
                sampler_entry(5),
            ],
        });

        Self {
            scene: scene_constant_layout(device),
            object,
            textures,
            fullscreen,
        }
    }
}

pub struct PipelineCache {
    pipelines: Vec<wgpu::RenderPipeline>,
    lookup: FxHashMap<PipelineKey, RenderPipelineId>,
    geometry_layout: wgpu::PipelineLayout,
    fullscreen_layout: wgpu::PipelineLayout,
    surface_format: wgpu::TextureFormat,
    /// Wireframe fill requires a device feature; fall back to solid fill
    /// when the adapter lacks it.
    line_mode: bool,
}

impl PipelineCache {
    pub fn new(
        device: &wgpu::Device,
        layouts: &BindLayouts,
        surface_format: wgpu::TextureFormat,
        features: wgpu::Features,
    ) -> Self {
        let geometry_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Geometry Pipeline Layout"),
            bind_group_layouts: &[
                Some(&layouts.scene),
                Some(&layouts.object),
                Some(&layouts.textures),
            ],
            immediate_size: 0,
        });
        let fullscreen_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Fullscreen Pipeline Layout"),
            bind_group_layouts: &[Some(&layouts.fullscreen)],
            immediate_size: 0,
        });
        let line_mode = features.contains(wgpu::Features::POLYGON_MODE_LINE);
        if !line_mode {
            log::warn!("polygon line mode unsupported; wireframe renders solid");
        }
        Self {
            pipelines: Vec::new(),
            lookup: FxHashMap::default(),
            geometry_layout,
            fullscreen_layout,
            surface_format,
            line_mode,
        }
    }

    /// Drops every pipeline; used after shader recompilation.
    pub fn clear(&mut self) {
        self.pipelines.clear();
        self.lookup.clear();
    }

    /// Looks up the pipeline for `key`, creating it on first use.
    pub fn get(
        &mut self,
        device: &wgpu::Device,
        key: PipelineKey,
        shader: &ShaderProgram,
    ) -> RenderPipelineId {
        if let Some(&id) = self.lookup.get(&key) {
            return id;
        }
        let pipeline = self.build(device, &key, shader);
        let id = RenderPipelineId(self.pipelines.len() as u32);
        self.pipelines.push(pipeline);
        self.lookup.insert(key, id);
        id
    }

    #[inline]
    #[must_use]
    pub fn pipeline(&self, id: RenderPipelineId) -> &wgpu::RenderPipeline {
        &self.pipelines[id.0 as usize]
    }

    fn build(
        &self,
        device: &wgpu::Device,
        key: &PipelineKey,
        shader: &ShaderProgram,
    ) -> wgpu::RenderPipeline {
        let blend = if key.alpha_blend {
            wgpu::BlendState::ALPHA_BLENDING
        } else {
            wgpu::BlendState::REPLACE
        };
        let color_target = |format, blend| {
            Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })
        };

        // Normals never blend; alpha blending only affects the color
        // attachment.
        let targets: Vec<Option<wgpu::ColorTargetState>> = match key.target {
            TargetLayout::SceneMrt => vec![
                color_target(HDR_FORMAT, blend),
                color_target(HDR_FORMAT, wgpu::BlendState::REPLACE),
            ],
            TargetLayout::SingleHdr => vec![color_target(HDR_FORMAT, blend)],
            TargetLayout::Surface => vec![color_target(self.surface_format, blend)],
        };

        let depth_stencil = matches!(key.target, TargetLayout::SceneMrt).then(|| {
            wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: Some(key.depth_write),
                depth_compare: Some(wgpu::CompareFunction::LessEqual),
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }
        });

        let mesh_stride = (MESH_VERTEX_FLOATS * std::mem::size_of::<f32>()) as u64;
        let buffers: Vec<wgpu::VertexBufferLayout> = match key.vertex {
            VertexKind::Mesh => vec![wgpu::VertexBufferLayout {
                array_stride: mesh_stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &MESH_ATTRIBUTES,
            }],
            VertexKind::Particle => vec![
                wgpu::VertexBufferLayout {
                    array_stride: 16,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &PARTICLE_QUAD_ATTRIBUTES,
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<ParticleInstance>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &PARTICLE_INSTANCE_ATTRIBUTES,
                },
            ],
            VertexKind::Fullscreen => Vec::new(),
        };

        let layout = match key.vertex {
            VertexKind::Fullscreen => &self.fullscreen_layout,
            _ => &self.geometry_layout,
        };

        let polygon_mode = if key.draw_state.wireframe() && self.line_mode {
            wgpu::PolygonMode::Line
        } else {
            wgpu::PolygonMode::Fill
        };
        let cull_mode = key
            .draw_state
            .culls()
            .then_some(wgpu::Face::Back);

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{} Pipeline", shader.name)),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &shader.module,
                entry_point: Some("vs_main"),
                buffers: &buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader.module,
                entry_point: Some("fs_main"),
                targets: &targets,
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                cull_mode,
                polygon_mode,
                ..Default::default()
            },
            depth_stencil,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }
}
