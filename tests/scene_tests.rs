//! Scene Validation Tests
//!
//! Tests for:
//! - Scene::validate: reserved shader table, foreign key ranges, vertex
//!   data shape
//! - PostProcessing: one-hot map selection

use glaze::scene::{
    Emitter, MeshData, PostMap, PostProcessing, Scene, ShaderData, ShaderIndex, TextureData,
    TextureSlot, MESH_VERTEX_FLOATS,
};
use glaze::shaders;

fn valid_scene() -> Scene {
    let mut scene = Scene::default();
    scene.shaders = shaders::reserved();
    scene.shaders.push(ShaderData::inline("mesh", shaders::MESH));
    scene.textures.push(TextureData {
        name: "checker".to_string(),
        width: 2,
        height: 2,
        pixels: vec![0xff; 16],
        ..TextureData::default()
    });

    let mut mesh = MeshData::new("cube", ShaderIndex::RESERVED);
    mesh.vertices = vec![0.0; MESH_VERTEX_FLOATS * 3];
    mesh.indices = vec![0, 1, 2];
    mesh.textures[TextureSlot::Diffuse as usize] = Some(0);
    scene.meshes.push(mesh);
    scene
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test]
fn valid_scene_passes_validation() {
    assert!(valid_scene().validate().is_ok());
}

#[test]
fn missing_reserved_shaders_are_rejected() {
    let mut scene = valid_scene();
    scene.shaders.truncate(ShaderIndex::RESERVED - 1);
    let err = scene.validate().unwrap_err();
    assert!(err.to_string().contains("reserved"));
}

#[test]
fn empty_scene_is_rejected_for_missing_shaders() {
    assert!(Scene::default().validate().is_err());
}

#[test]
fn out_of_range_shader_key_is_rejected() {
    let mut scene = valid_scene();
    scene.meshes[0].shader = scene.shaders.len();
    assert!(scene.validate().is_err());
}

#[test]
fn out_of_range_texture_key_is_rejected() {
    let mut scene = valid_scene();
    scene.meshes[0].textures[TextureSlot::Normal as usize] = Some(99);
    assert!(scene.validate().is_err());
}

#[test]
fn emitter_keys_are_checked_too() {
    let mut scene = valid_scene();
    let mut emitter = Emitter::new("spray");
    emitter.texture = Some(42);
    scene.emitters.push(emitter);
    assert!(scene.validate().is_err());
}

#[test]
fn vertex_count_follows_the_interleaved_stride() {
    let mesh = &valid_scene().meshes[0];
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(MeshData::new("empty", ShaderIndex::RESERVED).vertex_count(), 0);
}

#[test]
fn ragged_vertex_data_is_rejected() {
    let mut scene = valid_scene();
    scene.meshes[0].vertices.push(1.0);
    let err = scene.validate().unwrap_err();
    assert!(err.to_string().contains("multiple"));
}

// ============================================================================
// Post-Processing Block Tests
// ============================================================================

#[test]
fn default_post_block_shows_the_final_image() {
    let post = PostProcessing::default();
    assert_eq!(post.mask(PostMap::Final), 1.0);
    let sum: f32 = post.masks.iter().sum();
    assert_eq!(sum, 1.0);
}

#[test]
fn set_post_map_is_one_hot() {
    let mut post = PostProcessing::default();
    post.set_post_map(PostMap::Depth);
    assert_eq!(post.mask(PostMap::Depth), 1.0);
    assert_eq!(post.mask(PostMap::Final), 0.0);
    let sum: f32 = post.masks.iter().sum();
    assert_eq!(sum, 1.0);

    post.set_post_map(PostMap::Final);
    assert_eq!(post.mask(PostMap::Depth), 0.0);
    assert_eq!(post.mask(PostMap::Final), 1.0);
}
