use glam::{Mat4, Vec2, Vec3, Vec4};

/// Interleaved vertex layout shared by every mesh-like renderable:
/// position (3), uv (2), normal (3), tangent (3), bitangent (3).
pub const MESH_VERTEX_FLOATS: usize = 14;

/// Semantic texture slots. A renderable addresses the texture table through
/// these positions; shaders declare the slots they actually sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSlot {
    Diffuse = 0,
    Normal = 1,
    Specular = 2,
    Environment = 3,
    Caustics = 4,
}

impl TextureSlot {
    pub const COUNT: usize = 5;
}

/// Geometry plus material scalars for a single mesh.
///
/// `vertices` is interleaved per [`MESH_VERTEX_FLOATS`]; `textures` holds
/// indices into the scene texture table by semantic slot.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub name: String,
    pub shader: usize,
    pub textures: [Option<usize>; TextureSlot::COUNT],
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    pub world: Mat4,
    pub backface_cull: bool,
    pub ambience: f32,
    pub bump: f32,
    pub glow: f32,
    pub specularity: f32,
}

impl Default for MeshData {
    fn default() -> Self {
        Self {
            name: String::new(),
            shader: 0,
            textures: [None; TextureSlot::COUNT],
            vertices: Vec::new(),
            indices: Vec::new(),
            world: Mat4::IDENTITY,
            backface_cull: true,
            ambience: 1.0,
            bump: 1.0,
            glow: 1.0,
            specularity: 1.0,
        }
    }
}

impl MeshData {
    #[must_use]
    pub fn new(name: impl Into<String>, shader: usize) -> Self {
        Self {
            name: name.into(),
            shader,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / MESH_VERTEX_FLOATS
    }
}

/// One Gerstner-style wave contributing to the water surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wave {
    pub frequency: f32,
    pub amplitude: f32,
    pub phase: f32,
    pub direction_x: f32,
    pub direction_z: f32,
}

/// An animated water body: a mesh plus the wave table and shading colours
/// consumed by the water shader.
#[derive(Debug, Clone)]
pub struct Water {
    pub mesh: MeshData,
    pub waves: Vec<Wave>,
    pub speed: f32,
    pub bump_velocity: Vec2,
    pub uv_scale: Vec2,
    pub fresnal: Vec3,
    pub shallow_colour: Vec4,
    pub deep_colour: Vec4,
    pub reflection_tint: Vec3,
    pub reflection: f32,
}

impl Default for Water {
    fn default() -> Self {
        Self {
            mesh: MeshData::default(),
            waves: Vec::new(),
            speed: 1.0,
            bump_velocity: Vec2::ZERO,
            uv_scale: Vec2::ONE,
            fresnal: Vec3::new(0.5, 0.5, 0.5),
            shallow_colour: Vec4::ONE,
            deep_colour: Vec4::new(0.0, 0.0, 0.1, 1.0),
            reflection_tint: Vec3::ONE,
            reflection: 1.0,
        }
    }
}

/// A terrain patch: flat-table mesh geometry plus caustics parameters.
/// Geometry re-uploads go through `Engine::reload_terrain`.
#[derive(Debug, Clone)]
pub struct Terrain {
    pub mesh: MeshData,
    pub uv_scale: Vec2,
    pub caustics_amount: f32,
    pub caustics_scale: f32,
}

impl Default for Terrain {
    fn default() -> Self {
        Self {
            mesh: MeshData::default(),
            uv_scale: Vec2::ONE,
            caustics_amount: 1.0,
            caustics_scale: 1.0,
        }
    }
}
