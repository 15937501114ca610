//! Render Settings & Backend Selection
//!
//! [`RenderSettings`] is consumed once during [`Engine::initialize`] to set
//! up the GPU context. The central choice is the [`Backend`]: the engine
//! supports a Direct3D and an OpenGL rendering backend which must produce
//! equivalent visual output, selected exactly once at startup — never per
//! call.
//!
//! [`Engine::initialize`]: crate::Engine::initialize

/// GPU backend selector, resolved once at instance creation.
///
/// Both backends drive the same frame-composition and state-management
/// logic; the selection only decides which native API the device speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Pick the best backend available on the platform.
    #[default]
    Auto,
    /// Direct3D 12.
    Direct3D,
    /// OpenGL / GLES.
    OpenGl,
}

impl Backend {
    /// Maps the selector onto the wgpu backend mask.
    #[must_use]
    pub fn to_wgpu(self) -> wgpu::Backends {
        match self {
            Self::Auto => wgpu::Backends::all(),
            Self::Direct3D => wgpu::Backends::DX12,
            Self::OpenGl => wgpu::Backends::GL,
        }
    }

    /// Human-readable backend name, used in startup logging.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Direct3D => "Direct3D",
            Self::OpenGl => "OpenGL",
        }
    }
}

/// Global configuration for engine initialization.
///
/// Consumed once by [`Engine::initialize`]; runtime state changes go through
/// the engine API (wireframe toggle, fade, diffuse-texture toggle), not
/// through settings.
///
/// [`Engine::initialize`]: crate::Engine::initialize
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// The rendering backend. See [`Backend`].
    pub backend: Backend,

    /// Enable vertical synchronization.
    pub vsync: bool,

    /// GPU adapter selection preference.
    ///
    /// - `HighPerformance`: Prefer discrete / dedicated GPU
    /// - `LowPower`: Prefer integrated GPU
    pub power_preference: wgpu::PowerPreference,

    /// Background clear color for the scene target.
    pub clear_color: wgpu::Color,

    /// Required wgpu features.
    ///
    /// Defaults to `POLYGON_MODE_LINE` because the wireframe toggle is part
    /// of the core render-state machine.
    pub required_features: wgpu::Features,

    /// Required wgpu limits.
    pub required_limits: wgpu::Limits,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            vsync: true,
            power_preference: wgpu::PowerPreference::HighPerformance,
            clear_color: wgpu::Color {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: 1.0,
            },
            required_features: wgpu::Features::POLYGON_MODE_LINE,
            required_limits: wgpu::Limits::default(),
        }
    }
}
