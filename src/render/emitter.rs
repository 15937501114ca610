//! Particle Emitters
//!
//! [`ParticleSystem`] is the CPU side: per-particle spawn state, wave
//! motion and the end-of-life alpha ramp, ticked from the frame timer. The
//! scene's emitter descriptor stays read-only; live state belongs here.
//! [`GpuEmitter`] owns the quad geometry and the per-particle instance
//! buffer, rewritten each frame. Billboarding happens in the particle
//! shader from the camera basis in the scene constants.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use wgpu::util::DeviceExt;

use crate::render::mesh::GpuMesh;
use crate::render::pipeline::BindLayouts;
use crate::render::texture::TextureSet;
use crate::render::uniforms::{ParticleConstants, ParticleInstance};
use crate::scene::{Emitter, MeshData, TextureSlot};

#[derive(Debug, Clone, Copy)]
struct Particle {
    spawn: Vec3,
    position: Vec3,
    speed: f32,
    wave_speed: f32,
    amplitude: f32,
    frequency: f32,
    size: f32,
    age: f32,
    alpha: f32,
}

fn range(rng: &mut StdRng, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

/// Live particle state for one emitter.
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleSystem {
    /// Spawns `emitter.amount` particles with staggered ages so the system
    /// does not pulse. Seeded per emitter for reproducibility.
    #[must_use]
    pub fn new(emitter: &Emitter, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = (0..emitter.amount)
            .map(|_| {
                let mut p = Self::spawn(&mut rng, emitter);
                p.age = range(&mut rng, 0.0, emitter.life_time);
                p
            })
            .collect();
        Self { particles, rng }
    }

    fn spawn(rng: &mut StdRng, emitter: &Emitter) -> Particle {
        let spawn = emitter.position
            + Vec3::new(
                range(rng, -emitter.width, emitter.width),
                0.0,
                range(rng, -emitter.length, emitter.length),
            );
        Particle {
            spawn,
            position: spawn,
            speed: range(rng, emitter.min_speed, emitter.max_speed),
            wave_speed: range(rng, emitter.min_wave_speed, emitter.max_wave_speed),
            amplitude: range(rng, emitter.min_amplitude, emitter.max_amplitude),
            frequency: range(rng, emitter.min_frequency, emitter.max_frequency),
            size: range(rng, emitter.min_size, emitter.max_size),
            age: 0.0,
            alpha: 1.0,
        }
    }

    /// Advances every particle by `dt` seconds, respawning the expired.
    pub fn tick(&mut self, emitter: &Emitter, dt: f32) {
        for particle in &mut self.particles {
            particle.age += dt;
            if particle.age >= emitter.life_time {
                *particle = Self::spawn(&mut self.rng, emitter);
                continue;
            }

            let travelled = emitter.direction * particle.speed * particle.age;
            let sway =
                particle.amplitude * (particle.frequency * particle.wave_speed * particle.age).sin();
            particle.position = particle.spawn + travelled + Vec3::new(sway, 0.0, sway);

            let remaining = emitter.life_time - particle.age;
            particle.alpha = if emitter.life_fade > 0.0 {
                (remaining / emitter.life_fade).clamp(0.0, 1.0)
            } else {
                1.0
            };
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Packs the live particles into instance attributes.
    pub fn write_instances(&self, out: &mut Vec<ParticleInstance>) {
        out.clear();
        out.extend(self.particles.iter().map(|p| ParticleInstance {
            position: p.position.to_array(),
            size: p.size,
            alpha: p.alpha,
        }));
    }
}

/// GPU resources for one emitter: a unit quad, the instance buffer and the
/// emitter constant block. The texture bind groups reuse the mesh layout
/// with only the diffuse slot assigned.
pub struct GpuEmitter {
    pub name: String,
    pub shader: usize,
    pub system: ParticleSystem,
    quad: GpuMesh,
    quad_vertices: wgpu::Buffer,
    quad_indices: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    staging: Vec<ParticleInstance>,
}

impl GpuEmitter {
    pub fn new(
        device: &wgpu::Device,
        layouts: &BindLayouts,
        textures: &TextureSet,
        emitter: &Emitter,
        seed: u64,
    ) -> Self {
        // Corner offsets and uvs; expanded along the camera basis in the
        // particle shader.
        let vertices: [f32; 16] = [
            -0.5, -0.5, 0.0, 1.0, //
            0.5, -0.5, 1.0, 1.0, //
            0.5, 0.5, 1.0, 0.0, //
            -0.5, 0.5, 0.0, 0.0,
        ];
        let indices: [u32; 6] = [0, 1, 2, 0, 2, 3];
        let quad_vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Quad Vertices", emitter.name)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Quad Indices", emitter.name)),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} Instances", emitter.name)),
            size: (emitter.amount.max(1) * std::mem::size_of::<ParticleInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Reuse the mesh path for the uniform/texture bind groups.
        let mut descriptor = MeshData::new(emitter.name.clone(), emitter.shader);
        descriptor.textures[TextureSlot::Diffuse as usize] = emitter.texture;
        let quad = GpuMesh::new(
            device,
            layouts,
            textures,
            &descriptor,
            std::mem::size_of::<ParticleConstants>() as u64,
        );

        Self {
            name: emitter.name.clone(),
            shader: emitter.shader,
            system: ParticleSystem::new(emitter, seed),
            quad,
            quad_vertices,
            quad_indices,
            instance_buffer,
            staging: Vec::with_capacity(emitter.amount),
        }
    }

    /// Ticks the particle system and uploads instances and constants.
    pub fn update(&mut self, queue: &wgpu::Queue, emitter: &Emitter, dt: f32) {
        self.system.tick(emitter, dt);
        self.system.write_instances(&mut self.staging);
        if !self.staging.is_empty() {
            queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&self.staging),
            );
        }
        let constants = ParticleConstants::pack(emitter);
        self.quad
            .write_constants(queue, bytemuck::bytes_of(&constants));
    }

    /// Rebuilds the quad's texture bind groups after a texture reload.
    pub fn rebind_textures(
        &mut self,
        device: &wgpu::Device,
        layouts: &BindLayouts,
        textures: &TextureSet,
        emitter: &Emitter,
    ) {
        let mut descriptor = MeshData::new(emitter.name.clone(), emitter.shader);
        descriptor.textures[TextureSlot::Diffuse as usize] = emitter.texture;
        self.quad
            .rebind_textures(device, layouts, textures, &descriptor);
    }

    /// Number of texture slots the emitter assigns (diffuse only).
    #[must_use]
    pub fn assigned_textures(&self) -> usize {
        self.quad.assigned_textures()
    }

    #[must_use]
    pub fn object_bind_group(&self) -> &wgpu::BindGroup {
        &self.quad.object_bind_group
    }

    #[must_use]
    pub fn texture_bind_group(&self, use_diffuse: bool) -> &wgpu::BindGroup {
        if use_diffuse {
            &self.quad.texture_bind_group
        } else {
            &self.quad.blank_diffuse_bind_group
        }
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.system.is_empty() {
            return;
        }
        pass.set_vertex_buffer(0, self.quad_vertices.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.set_index_buffer(self.quad_indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..6, 0, 0..self.system.len() as u32);
    }
}
