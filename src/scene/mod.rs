//! Scene Data Contract
//!
//! Descriptor tables produced by the external scene builder and consumed by
//! the rendering core. Every table is ordered and addressed by a stable
//! integer index which acts as the foreign key from renderables to textures
//! and shaders.
//!
//! The scene is read-only from the rendering core's perspective during a
//! frame; the GUI front-end mutates it between frames and triggers
//! [`Engine::re_initialise_scene`] for changes that touch GPU resources.
//!
//! [`Engine::re_initialise_scene`]: crate::Engine::re_initialise_scene

pub mod camera;
pub mod emitter;
pub mod light;
pub mod mesh;
pub mod post;
pub mod shader;
pub mod texture;

pub use camera::Camera;
pub use emitter::Emitter;
pub use light::Light;
pub use mesh::{MeshData, Terrain, TextureSlot, Water, Wave, MESH_VERTEX_FLOATS};
pub use post::{PostMap, PostProcessing};
pub use shader::{ShaderData, ShaderIndex, ShaderSource};
pub use texture::{TextureData, TextureFilter, TextureKind};

use crate::errors::{EngineError, Result};

/// Aggregate of all scene descriptor tables plus the post-processing block.
#[derive(Default)]
pub struct Scene {
    pub meshes: Vec<MeshData>,
    pub terrain: Vec<Terrain>,
    pub water: Vec<Water>,
    pub emitters: Vec<Emitter>,
    pub lights: Vec<Light>,
    pub textures: Vec<TextureData>,
    pub shaders: Vec<ShaderData>,
    pub post: PostProcessing,
}

impl Scene {
    /// Checks the descriptor tables for consistency: the reserved shaders
    /// must be present in their fixed slots and every foreign key must be in
    /// range. Called by [`Engine::initialise_scene`] before any GPU resource
    /// is created.
    ///
    /// [`Engine::initialise_scene`]: crate::Engine::initialise_scene
    pub fn validate(&self) -> Result<()> {
        if self.shaders.len() < ShaderIndex::RESERVED {
            return Err(EngineError::InvalidScene(format!(
                "scene must provide the {} reserved shaders, found {}",
                ShaderIndex::RESERVED,
                self.shaders.len()
            )));
        }

        for (kind, mesh) in self
            .meshes
            .iter()
            .map(|m| ("mesh", m))
            .chain(self.terrain.iter().map(|t| ("terrain", &t.mesh)))
            .chain(self.water.iter().map(|w| ("water", &w.mesh)))
        {
            if mesh.shader >= self.shaders.len() {
                return Err(EngineError::InvalidScene(format!(
                    "{kind} '{}' references shader {} of {}",
                    mesh.name,
                    mesh.shader,
                    self.shaders.len()
                )));
            }
            if !mesh.vertices.len().is_multiple_of(MESH_VERTEX_FLOATS) {
                return Err(EngineError::InvalidScene(format!(
                    "{kind} '{}' vertex data is not a multiple of {MESH_VERTEX_FLOATS} floats",
                    mesh.name
                )));
            }
            for id in mesh.textures.iter().flatten() {
                if *id >= self.textures.len() {
                    return Err(EngineError::InvalidScene(format!(
                        "{kind} '{}' references texture {} of {}",
                        mesh.name,
                        id,
                        self.textures.len()
                    )));
                }
            }
        }

        for emitter in &self.emitters {
            if emitter.shader >= self.shaders.len() {
                return Err(EngineError::InvalidScene(format!(
                    "emitter '{}' references shader {} of {}",
                    emitter.name,
                    emitter.shader,
                    self.shaders.len()
                )));
            }
            if let Some(id) = emitter.texture
                && id >= self.textures.len()
            {
                return Err(EngineError::InvalidScene(format!(
                    "emitter '{}' references texture {} of {}",
                    emitter.name,
                    id,
                    self.textures.len()
                )));
            }
        }

        Ok(())
    }
}
