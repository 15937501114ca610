//! Built-in Shader Programs
//!
//! WGSL sources for the engine-owned pipeline stages, embedded at build
//! time, plus a default lit mesh program. Scenes are free to replace any
//! of them with their own source text; these fill the reserved slots for
//! scenes that do not.

use crate::scene::{ShaderData, ShaderIndex};

pub const POST: &str = include_str!("shaders/post.wgsl");
pub const PRE_EFFECTS: &str = include_str!("shaders/pre_effects.wgsl");
pub const BLUR_HORIZONTAL: &str = include_str!("shaders/blur_horizontal.wgsl");
pub const BLUR_VERTICAL: &str = include_str!("shaders/blur_vertical.wgsl");
pub const WATER: &str = include_str!("shaders/water.wgsl");
pub const PARTICLE: &str = include_str!("shaders/particle.wgsl");
/// Default lit mesh program for scene geometry.
pub const MESH: &str = include_str!("shaders/mesh.wgsl");

/// The reserved shader table in index order, ready to seed
/// `Scene::shaders`.
#[must_use]
pub fn reserved() -> Vec<ShaderData> {
    let shaders = vec![
        ShaderData::inline("post", POST),
        ShaderData::inline("pre_effects", PRE_EFFECTS),
        ShaderData::inline("blur_horizontal", BLUR_HORIZONTAL),
        ShaderData::inline("blur_vertical", BLUR_VERTICAL),
        ShaderData::inline("water", WATER),
        ShaderData::inline("particle", PARTICLE),
    ];
    debug_assert_eq!(shaders.len(), ShaderIndex::RESERVED);
    shaders
}
