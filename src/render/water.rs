//! GPU Water
//!
//! Water draws with the mesh vertex layout but a larger constant block:
//! wave table, surface colours and bump scrolling, refreshed every frame
//! from the timer.

use crate::render::mesh::GpuMesh;
use crate::render::pipeline::BindLayouts;
use crate::render::texture::TextureSet;
use crate::render::uniforms::WaterConstants;
use crate::scene::Water;

pub struct GpuWater {
    pub mesh: GpuMesh,
}

impl GpuWater {
    pub fn new(
        device: &wgpu::Device,
        layouts: &BindLayouts,
        textures: &TextureSet,
        water: &Water,
    ) -> Self {
        Self {
            mesh: GpuMesh::new(
                device,
                layouts,
                textures,
                &water.mesh,
                std::mem::size_of::<WaterConstants>() as u64,
            ),
        }
    }

    /// Sends this frame's water constants; waves animate from `time`.
    pub fn update(&self, queue: &wgpu::Queue, water: &Water, time: f32) {
        let constants = WaterConstants::pack(water, time);
        self.mesh.write_constants(queue, bytemuck::bytes_of(&constants));
    }
}
