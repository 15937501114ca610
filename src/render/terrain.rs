//! GPU Terrain
//!
//! Terrain shares the mesh vertex layout; only its constant block differs
//! (uv scaling and caustics). Geometry re-uploads go through
//! `Engine::reload_terrain`.

use crate::render::mesh::GpuMesh;
use crate::render::pipeline::BindLayouts;
use crate::render::texture::TextureSet;
use crate::render::uniforms::MeshConstants;
use crate::scene::Terrain;

pub struct GpuTerrain {
    pub mesh: GpuMesh,
}

impl GpuTerrain {
    pub fn new(
        device: &wgpu::Device,
        layouts: &BindLayouts,
        textures: &TextureSet,
        terrain: &Terrain,
    ) -> Self {
        Self {
            mesh: GpuMesh::new(
                device,
                layouts,
                textures,
                &terrain.mesh,
                std::mem::size_of::<MeshConstants>() as u64,
            ),
        }
    }

    /// Sends this frame's terrain constants.
    pub fn update(&self, queue: &wgpu::Queue, terrain: &Terrain) {
        let constants = MeshConstants::for_terrain(terrain);
        self.mesh.write_constants(queue, bytemuck::bytes_of(&constants));
    }
}
