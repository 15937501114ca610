//! Uniform Layout Tests
//!
//! Tests for:
//! - LightConstants: 16-byte slot stride per field, packing of scene
//!   lights into slots
//! - WaterConstants: wave table stride and packing
//! - PostConstants: mask table stride, fade override
//! - struct sizes staying 16-byte aligned for uniform buffers

use std::mem::{offset_of, size_of};

use glam::Vec3;

use glaze::render::uniforms::{
    LightConstants, MeshConstants, ParticleInstance, PostConstants, SceneConstants,
    WaterConstants,
};
use glaze::render::{MAX_LIGHTS, MAX_WAVES};
use glaze::scene::{Light, PostMap, PostProcessing, Water, Wave};

const EPSILON: f32 = 1e-6;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// Light Packing Tests
// ============================================================================

#[test]
fn light_fields_use_sixteen_byte_slots() {
    assert_eq!(offset_of!(LightConstants, position), 0);
    assert_eq!(offset_of!(LightConstants, diffuse), MAX_LIGHTS * 16);
    assert_eq!(offset_of!(LightConstants, specular), MAX_LIGHTS * 32);
    assert_eq!(offset_of!(LightConstants, attenuation), MAX_LIGHTS * 48);
    assert_eq!(size_of::<LightConstants>(), MAX_LIGHTS * 64);
}

#[test]
fn each_light_lands_at_its_slot_offset() {
    let mut lights = Vec::new();
    for i in 0..MAX_LIGHTS {
        let mut light = Light::new(format!("light{i}"));
        light.position = Vec3::splat(i as f32 + 1.0);
        light.specularity = 10.0 + i as f32;
        lights.push(light);
    }
    let packed = LightConstants::pack(&lights);
    let bytes: &[u8] = bytemuck::bytes_of(&packed);
    let floats: &[f32] = bytemuck::cast_slice(bytes);

    for (i, light) in lights.iter().enumerate() {
        // field of light i sits at byte offset i * 16 within its table
        let base = (offset_of!(LightConstants, position) + i * 16) / 4;
        assert!(approx(floats[base], light.position.x));
        let base = (offset_of!(LightConstants, diffuse) + i * 16) / 4;
        assert!(approx(floats[base + 3], light.specularity));
    }
}

#[test]
fn lights_beyond_the_table_are_dropped() {
    let lights: Vec<Light> = (0..MAX_LIGHTS + 4)
        .map(|i| {
            let mut light = Light::new("l");
            light.position = Vec3::splat(i as f32);
            light
        })
        .collect();
    let packed = LightConstants::pack(&lights);
    assert!(approx(
        packed.position[MAX_LIGHTS - 1][0],
        (MAX_LIGHTS - 1) as f32
    ));
}

#[test]
fn inactive_slots_are_zeroed() {
    let packed = LightConstants::pack(&[Light::new("only")]);
    for i in 1..MAX_LIGHTS {
        assert!(approx(packed.position[i][3], 0.0), "slot {i} active flag");
    }
}

// ============================================================================
// Wave Packing Tests
// ============================================================================

#[test]
fn wave_fields_use_sixteen_byte_slots() {
    let base = offset_of!(WaterConstants, wave_frequency);
    assert_eq!(offset_of!(WaterConstants, wave_amplitude), base + MAX_WAVES * 16);
    assert_eq!(offset_of!(WaterConstants, wave_phase), base + MAX_WAVES * 32);
    assert_eq!(offset_of!(WaterConstants, wave_direction), base + MAX_WAVES * 48);
}

#[test]
fn wave_scalars_land_in_the_x_component() {
    let mut water = Water::default();
    water.waves = vec![
        Wave {
            frequency: 2.0,
            amplitude: 0.5,
            phase: 1.0,
            direction_x: 1.0,
            direction_z: -1.0,
        },
        Wave {
            frequency: 4.0,
            amplitude: 0.25,
            phase: 0.0,
            direction_x: 0.0,
            direction_z: 1.0,
        },
    ];
    let packed = WaterConstants::pack(&water, 3.0);
    assert!(approx(packed.wave_frequency[0][0], 2.0));
    assert!(approx(packed.wave_frequency[1][0], 4.0));
    assert!(approx(packed.wave_amplitude[1][0], 0.25));
    assert!(approx(packed.wave_direction[0][1], -1.0));
    assert!(approx(packed.wave_count, 2.0));
    assert!(approx(packed.time, 3.0));
}

// ============================================================================
// Struct Size & Alignment Tests
// ============================================================================

#[test]
fn uniform_blocks_are_sixteen_byte_multiples() {
    assert_eq!(size_of::<SceneConstants>() % 16, 0);
    assert_eq!(size_of::<MeshConstants>() % 16, 0);
    assert_eq!(size_of::<WaterConstants>() % 16, 0);
    assert_eq!(size_of::<PostConstants>() % 16, 0);
}

#[test]
fn particle_instance_stride_matches_attributes() {
    // vec3 position + size + alpha, tightly packed for the vertex buffer
    assert_eq!(size_of::<ParticleInstance>(), 20);
}

// ============================================================================
// Post Constants Tests
// ============================================================================

#[test]
fn post_masks_pack_one_weight_per_slot() {
    let mut post = PostProcessing::default();
    post.set_post_map(PostMap::Blur);
    let packed = PostConstants::pack(&post, 1.0);
    for (i, slot) in packed.masks.iter().enumerate() {
        let expected = if i == PostMap::Blur as usize { 1.0 } else { 0.0 };
        assert!(approx(slot[0], expected), "mask slot {i}");
    }
}

#[test]
fn engine_fade_overrides_the_block_value() {
    let mut post = PostProcessing::default();
    post.fade = 1.0;
    let packed = PostConstants::pack(&post, 0.25);
    assert!(approx(packed.fade, 0.25));
}
