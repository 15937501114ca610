//! Shader Constant Blocks
//!
//! `#[repr(C)]` + `bytemuck::Pod` structs uploaded with
//! `queue.write_buffer`. Light and wave tables pack one scalar field per
//! 16-byte slot (uniform-buffer array stride) regardless of natural width,
//! so the WGSL side declares plain `array<vec4f, N>` fields.

use glam::{Mat4, Vec3};

use crate::render::{FRUSTRUM_FAR, FRUSTRUM_NEAR, MAX_LIGHTS, MAX_WAVES};
use crate::scene::{Emitter, Light, MeshData, PostMap, PostProcessing, Terrain, Water};

/// Per-light fields, struct-of-arrays so each light's entry for a field
/// lands at `i * 16` within that field's table.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightConstants {
    /// xyz position, w = active.
    pub position: [[f32; 4]; MAX_LIGHTS],
    /// rgb diffuse, w = specularity.
    pub diffuse: [[f32; 4]; MAX_LIGHTS],
    /// rgb specular, w = specular size.
    pub specular: [[f32; 4]; MAX_LIGHTS],
    /// xyz attenuation coefficients.
    pub attenuation: [[f32; 4]; MAX_LIGHTS],
}

impl LightConstants {
    #[must_use]
    pub fn pack(lights: &[Light]) -> Self {
        let mut packed = Self::zeroed();
        for (i, light) in lights.iter().take(MAX_LIGHTS).enumerate() {
            packed.position[i] = [
                light.position.x,
                light.position.y,
                light.position.z,
                light.active,
            ];
            packed.diffuse[i] = [
                light.diffuse.x,
                light.diffuse.y,
                light.diffuse.z,
                light.specularity,
            ];
            packed.specular[i] = [
                light.specular.x,
                light.specular.y,
                light.specular.z,
                light.specular_size,
            ];
            packed.attenuation[i] = [
                light.attenuation.x,
                light.attenuation.y,
                light.attenuation.z,
                0.0,
            ];
        }
        packed
    }

    fn zeroed() -> Self {
        bytemuck::Zeroable::zeroed()
    }
}

/// Per-frame constants shared by every shader, re-sent on shader switch or
/// when the view/lights changed.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneConstants {
    pub view_projection: [[f32; 4]; 4],
    /// xyz camera position.
    pub camera_position: [f32; 4],
    /// xyz camera right vector, used for particle billboarding.
    pub camera_right: [f32; 4],
    /// xyz camera up vector.
    pub camera_up: [f32; 4],
    pub depth_near: f32,
    pub depth_far: f32,
    pub time: f32,
    pub light_count: f32,
    pub lights: LightConstants,
}

impl SceneConstants {
    #[must_use]
    pub fn new(
        view_projection: Mat4,
        camera_position: Vec3,
        camera_right: Vec3,
        camera_up: Vec3,
        time: f32,
        lights: &[Light],
    ) -> Self {
        Self {
            view_projection: view_projection.to_cols_array_2d(),
            camera_position: camera_position.extend(1.0).to_array(),
            camera_right: camera_right.extend(0.0).to_array(),
            camera_up: camera_up.extend(0.0).to_array(),
            depth_near: FRUSTRUM_NEAR,
            depth_far: FRUSTRUM_FAR,
            time,
            light_count: lights.len().min(MAX_LIGHTS) as f32,
            lights: LightConstants::pack(lights),
        }
    }
}

/// Per-draw constants for meshes and terrain.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshConstants {
    pub world: [[f32; 4]; 4],
    pub ambience: f32,
    pub bump: f32,
    pub glow: f32,
    pub specularity: f32,
    pub uv_scale: [f32; 2],
    pub caustics_amount: f32,
    pub caustics_scale: f32,
}

impl MeshConstants {
    #[must_use]
    pub fn for_mesh(mesh: &MeshData) -> Self {
        Self {
            world: mesh.world.to_cols_array_2d(),
            ambience: mesh.ambience,
            bump: mesh.bump,
            glow: mesh.glow,
            specularity: mesh.specularity,
            uv_scale: [1.0, 1.0],
            caustics_amount: 0.0,
            caustics_scale: 1.0,
        }
    }

    #[must_use]
    pub fn for_terrain(terrain: &Terrain) -> Self {
        Self {
            uv_scale: terrain.uv_scale.to_array(),
            caustics_amount: terrain.caustics_amount,
            caustics_scale: terrain.caustics_scale,
            ..Self::for_mesh(&terrain.mesh)
        }
    }
}

/// Per-draw constants for water, wave table packed like the light table.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct WaterConstants {
    pub world: [[f32; 4]; 4],
    pub shallow_colour: [f32; 4],
    pub deep_colour: [f32; 4],
    /// xyz fresnal factors, w = reflection intensity.
    pub fresnal: [f32; 4],
    /// rgb reflection tint, w = wave speed.
    pub reflection_tint: [f32; 4],
    /// xy bump velocity, zw uv scale.
    pub bump_velocity: [f32; 4],
    pub bump: f32,
    pub time: f32,
    pub wave_count: f32,
    pub _pad: f32,
    /// Scalar in x, one wave per 16-byte slot.
    pub wave_frequency: [[f32; 4]; MAX_WAVES],
    pub wave_amplitude: [[f32; 4]; MAX_WAVES],
    pub wave_phase: [[f32; 4]; MAX_WAVES],
    /// Wave direction: x and z in the first two components.
    pub wave_direction: [[f32; 4]; MAX_WAVES],
}

impl WaterConstants {
    #[must_use]
    pub fn pack(water: &Water, time: f32) -> Self {
        let mut constants = Self {
            world: water.mesh.world.to_cols_array_2d(),
            shallow_colour: water.shallow_colour.to_array(),
            deep_colour: water.deep_colour.to_array(),
            fresnal: water.fresnal.extend(water.reflection).to_array(),
            reflection_tint: water.reflection_tint.extend(water.speed).to_array(),
            bump_velocity: [
                water.bump_velocity.x,
                water.bump_velocity.y,
                water.uv_scale.x,
                water.uv_scale.y,
            ],
            bump: water.mesh.bump,
            time,
            wave_count: water.waves.len().min(MAX_WAVES) as f32,
            _pad: 0.0,
            wave_frequency: [[0.0; 4]; MAX_WAVES],
            wave_amplitude: [[0.0; 4]; MAX_WAVES],
            wave_phase: [[0.0; 4]; MAX_WAVES],
            wave_direction: [[0.0; 4]; MAX_WAVES],
        };
        for (i, wave) in water.waves.iter().take(MAX_WAVES).enumerate() {
            constants.wave_frequency[i][0] = wave.frequency;
            constants.wave_amplitude[i][0] = wave.amplitude;
            constants.wave_phase[i][0] = wave.phase;
            constants.wave_direction[i][0] = wave.direction_x;
            constants.wave_direction[i][1] = wave.direction_z;
        }
        constants
    }
}

/// Per-emitter constants; per-particle data rides in the instance buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleConstants {
    pub tint: [f32; 4],
}

impl ParticleConstants {
    #[must_use]
    pub fn pack(emitter: &Emitter) -> Self {
        Self {
            tint: emitter.tint.to_array(),
        }
    }
}

/// Per-particle instance attributes (vertex buffer, step mode Instance).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub alpha: f32,
}

/// Constants for the pre-effects (bloom extraction) pass.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PreEffectsConstants {
    pub bloom_intensity: f32,
    pub bloom_start: f32,
    pub bloom_fade: f32,
    pub _pad: f32,
}

impl PreEffectsConstants {
    #[must_use]
    pub fn pack(post: &PostProcessing) -> Self {
        Self {
            bloom_intensity: post.bloom_intensity,
            bloom_start: post.bloom_start,
            bloom_fade: post.bloom_fade,
            _pad: 0.0,
        }
    }
}

/// Constants for one direction of the separable blur.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BlurConstants {
    pub blur_step: f32,
    pub _pad: [f32; 3],
}

/// Constants for the post-processing composite; the mask table packs one
/// weight per 16-byte slot.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PostConstants {
    pub masks: [[f32; 4]; PostMap::COUNT],
    pub fog_colour: [f32; 3],
    pub fog_start: f32,
    pub minimum_colour: [f32; 3],
    pub fog_fade: f32,
    pub maximum_colour: [f32; 3],
    pub fade: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub dof_start: f32,
    pub dof_fade: f32,
    pub depth_near: f32,
    pub depth_far: f32,
    pub _pad: [f32; 2],
}

impl PostConstants {
    /// `fade` comes from the engine fade controller, overriding the block's
    /// stored value.
    #[must_use]
    pub fn pack(post: &PostProcessing, fade: f32) -> Self {
        let mut masks = [[0.0; 4]; PostMap::COUNT];
        for (slot, weight) in masks.iter_mut().zip(post.masks) {
            slot[0] = weight;
        }
        Self {
            masks,
            fog_colour: post.fog_colour.to_array(),
            fog_start: post.fog_start,
            minimum_colour: post.minimum_colour.to_array(),
            fog_fade: post.fog_fade,
            maximum_colour: post.maximum_colour.to_array(),
            fade,
            contrast: post.contrast,
            saturation: post.saturation,
            dof_start: post.dof_start,
            dof_fade: post.dof_fade,
            depth_near: post.depth_near,
            depth_far: post.depth_far,
            _pad: [0.0; 2],
        }
    }
}
