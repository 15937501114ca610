use glam::Vec3;

/// A point light as authored in the editor.
///
/// Attenuation follows `1 / (constant + linear*d + quadratic*d^2)`; the
/// specular response is scaled by `specularity` and `specular_size` controls
/// the exponent used by lit shaders.
#[derive(Debug, Clone)]
pub struct Light {
    pub name: String,
    pub position: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub attenuation: Vec3,
    pub specularity: f32,
    pub specular_size: f32,
    pub active: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: Vec3::ZERO,
            diffuse: Vec3::ONE,
            specular: Vec3::ONE,
            attenuation: Vec3::new(1.0, 0.0, 0.0),
            specularity: 5.0,
            specular_size: 1.0,
            active: 1.0,
        }
    }
}

impl Light {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
