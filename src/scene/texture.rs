/// Filtering mode requested by a texture, resolved to one of the three
/// engine-lifetime samplers at bind-group build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFilter {
    Nearest,
    Linear,
    #[default]
    Anisotropic,
}

/// Shape of the texture payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureKind {
    /// A flat 2D texture.
    #[default]
    Flat,
    /// Six faces of equal size concatenated in +X -X +Y -Y +Z -Z order.
    Cube,
}

/// A texture as delivered by the asset pipeline: pixels are already decoded
/// to tightly packed RGBA8.
#[derive(Debug, Clone, Default)]
pub struct TextureData {
    pub name: String,
    pub kind: TextureKind,
    pub filter: TextureFilter,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// Expected byte length of `pixels` for the declared dimensions.
    #[must_use]
    pub fn expected_len(&self) -> usize {
        let faces = match self.kind {
            TextureKind::Flat => 1,
            TextureKind::Cube => 6,
        };
        self.width as usize * self.height as usize * 4 * faces
    }
}
