//! GPU Mesh
//!
//! Buffer-backed geometry shared by meshes, terrain and water: vertex and
//! index buffers, the per-draw uniform buffer, and the material texture
//! bind groups. Two texture bind groups are prebuilt per mesh, the normal
//! one and one with a blank diffuse slot, so the global diffuse-display
//! toggle is a per-draw bind group choice rather than a rebuild.

use wgpu::util::DeviceExt;

use crate::render::pipeline::BindLayouts;
use crate::render::texture::TextureSet;
use crate::scene::{MeshData, TextureSlot};

pub struct GpuMesh {
    pub name: String,
    pub shader: usize,
    pub backface_cull: bool,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    pub uniform_buffer: wgpu::Buffer,
    pub object_bind_group: wgpu::BindGroup,
    pub texture_bind_group: wgpu::BindGroup,
    pub blank_diffuse_bind_group: wgpu::BindGroup,
    texture_slots: [Option<usize>; TextureSlot::COUNT],
}

impl GpuMesh {
    pub fn new(
        device: &wgpu::Device,
        layouts: &BindLayouts,
        textures: &TextureSet,
        mesh: &MeshData,
        uniform_size: u64,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertices", mesh.name)),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Indices", mesh.name)),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} Constants", mesh.name)),
            size: uniform_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let object_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Object BindGroup", mesh.name)),
            layout: &layouts.object,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let (texture_bind_group, blank_diffuse_bind_group) =
            Self::build_texture_groups(device, layouts, textures, mesh);

        Self {
            name: mesh.name.clone(),
            shader: mesh.shader,
            backface_cull: mesh.backface_cull,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            uniform_buffer,
            object_bind_group,
            texture_bind_group,
            blank_diffuse_bind_group,
            texture_slots: mesh.textures,
        }
    }

    fn build_texture_groups(
        device: &wgpu::Device,
        layouts: &BindLayouts,
        textures: &TextureSet,
        mesh: &MeshData,
    ) -> (wgpu::BindGroup, wgpu::BindGroup) {
        let slots = &mesh.textures;
        let group = |diffuse: &wgpu::TextureView, label: &str| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &layouts.textures,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(diffuse),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(
                            textures.view_or_blank(slots[TextureSlot::Normal as usize]),
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::TextureView(
                            textures.view_or_blank(slots[TextureSlot::Specular as usize]),
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: wgpu::BindingResource::TextureView(
                            textures.cube_view_or_blank(slots[TextureSlot::Environment as usize]),
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 4,
                        resource: wgpu::BindingResource::TextureView(
                            textures.view_or_blank(slots[TextureSlot::Caustics as usize]),
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 5,
                        resource: wgpu::BindingResource::Sampler(
                            textures.sampler_for(slots[TextureSlot::Diffuse as usize]),
                        ),
                    },
                ],
            })
        };

        let normal = group(
            textures.view_or_blank(slots[TextureSlot::Diffuse as usize]),
            &format!("{} Textures", mesh.name),
        );
        let blanked = group(
            textures.blank_view(),
            &format!("{} Textures (blank diffuse)", mesh.name),
        );
        (normal, blanked)
    }

    /// Recreates geometry and texture bindings from a fresh descriptor; the
    /// hot-reload path for geometry and texture edits.
    pub fn reload(
        &mut self,
        device: &wgpu::Device,
        layouts: &BindLayouts,
        textures: &TextureSet,
        mesh: &MeshData,
    ) {
        self.vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertices", mesh.name)),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        self.index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Indices", mesh.name)),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        self.index_count = mesh.indices.len() as u32;
        self.shader = mesh.shader;
        self.backface_cull = mesh.backface_cull;
        self.texture_slots = mesh.textures;
        let (normal, blanked) = Self::build_texture_groups(device, layouts, textures, mesh);
        self.texture_bind_group = normal;
        self.blank_diffuse_bind_group = blanked;
    }

    /// Rebuilds only the texture bind groups; the texture hot-reload path.
    pub fn rebind_textures(
        &mut self,
        device: &wgpu::Device,
        layouts: &BindLayouts,
        textures: &TextureSet,
        mesh: &MeshData,
    ) {
        let (normal, blanked) = Self::build_texture_groups(device, layouts, textures, mesh);
        self.texture_bind_group = normal;
        self.blank_diffuse_bind_group = blanked;
        self.texture_slots = mesh.textures;
    }

    /// Number of texture slots this mesh actually assigns.
    #[must_use]
    pub fn assigned_textures(&self) -> usize {
        self.texture_slots.iter().flatten().count()
    }

    pub fn write_constants(&self, queue: &wgpu::Queue, bytes: &[u8]) {
        queue.write_buffer(&self.uniform_buffer, 0, bytes);
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
