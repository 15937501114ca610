use std::path::PathBuf;

/// Fixed indices of the engine-owned shaders. Every scene must provide
/// these in their reserved slots; mesh shaders follow from `RESERVED`.
pub struct ShaderIndex;

impl ShaderIndex {
    pub const POST: usize = 0;
    pub const PRE_EFFECTS: usize = 1;
    pub const BLUR_HORIZONTAL: usize = 2;
    pub const BLUR_VERTICAL: usize = 3;
    pub const WATER: usize = 4;
    pub const PARTICLE: usize = 5;
    /// Number of reserved slots; the first free index for scene shaders.
    pub const RESERVED: usize = 6;
}

/// Extension used by the on-disk shader naming convention (`{name}.wgsl`).
pub const SHADER_EXTENSION: &str = "wgsl";

/// Where a shader's source text comes from.
#[derive(Debug, Clone)]
pub enum ShaderSource {
    /// Inline source text, used for hot-reload from the editor and in tests.
    Text(String),
    /// Load from the given path on (re)initialization.
    File(PathBuf),
}

impl ShaderSource {
    /// Path following the `{name}.wgsl` convention under `dir`.
    #[must_use]
    pub fn conventional(dir: &std::path::Path, name: &str) -> Self {
        Self::File(dir.join(format!("{name}.{SHADER_EXTENSION}")))
    }
}

/// A shader program as authored: a name (used to prefix compiler
/// diagnostics) and its WGSL source.
#[derive(Debug, Clone)]
pub struct ShaderData {
    pub name: String,
    pub source: ShaderSource,
}

impl ShaderData {
    #[must_use]
    pub fn inline(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: ShaderSource::Text(text.into()),
        }
    }
}
