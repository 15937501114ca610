use glam::{Vec3, Vec4};

/// A particle emitter descriptor: a spawn area on the XZ plane plus the
/// parameter ranges each particle randomizes within at spawn time.
///
/// The emitter itself stays read-only during a frame; live particle state
/// belongs to the engine-side particle system.
#[derive(Debug, Clone)]
pub struct Emitter {
    pub name: String,
    pub shader: usize,
    pub texture: Option<usize>,
    pub position: Vec3,
    pub direction: Vec3,
    pub tint: Vec4,
    /// Spawn area half-extents on the XZ plane.
    pub width: f32,
    pub length: f32,
    /// Number of live particles maintained by the system.
    pub amount: usize,
    pub life_time: f32,
    /// Seconds over which a particle fades out at end of life.
    pub life_fade: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub min_amplitude: f32,
    pub max_amplitude: f32,
    pub min_frequency: f32,
    pub max_frequency: f32,
    pub min_wave_speed: f32,
    pub max_wave_speed: f32,
}

impl Default for Emitter {
    fn default() -> Self {
        Self {
            name: String::new(),
            shader: crate::scene::ShaderIndex::PARTICLE,
            texture: None,
            position: Vec3::ZERO,
            direction: Vec3::Y,
            tint: Vec4::ONE,
            width: 1.0,
            length: 1.0,
            amount: 0,
            life_time: 1.0,
            life_fade: 0.5,
            min_speed: 1.0,
            max_speed: 1.0,
            min_size: 1.0,
            max_size: 1.0,
            min_amplitude: 0.0,
            max_amplitude: 0.0,
            min_frequency: 1.0,
            max_frequency: 1.0,
            min_wave_speed: 1.0,
            max_wave_speed: 1.0,
        }
    }
}

impl Emitter {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
