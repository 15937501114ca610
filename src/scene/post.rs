use glam::Vec3;

/// Diagnostic output maps selectable in the composite shader. `Final` is the
/// fully composited image; the rest visualize one intermediate each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostMap {
    Final = 0,
    Scene = 1,
    Normal = 2,
    Depth = 3,
    Blur = 4,
    DepthOfField = 5,
    Fog = 6,
    Bloom = 7,
    Ambience = 8,
}

impl PostMap {
    pub const COUNT: usize = 9;
}

/// Parameter block for the post-processing composite pass.
///
/// `masks` weights each [`PostMap`] contribution; during normal operation
/// only `Final` is 1.0. The GUI flips maps through
/// [`set_post_map`](Self::set_post_map) for debugging intermediates.
#[derive(Debug, Clone)]
pub struct PostProcessing {
    pub masks: [f32; PostMap::COUNT],
    pub fog_colour: Vec3,
    pub fog_start: f32,
    pub fog_fade: f32,
    pub minimum_colour: Vec3,
    pub maximum_colour: Vec3,
    pub contrast: f32,
    pub saturation: f32,
    pub dof_start: f32,
    pub dof_fade: f32,
    pub bloom_intensity: f32,
    pub bloom_start: f32,
    pub bloom_fade: f32,
    pub blur_step: f32,
    pub depth_near: f32,
    pub depth_far: f32,
    pub fade: f32,
}

impl Default for PostProcessing {
    fn default() -> Self {
        let mut masks = [0.0; PostMap::COUNT];
        masks[PostMap::Final as usize] = 1.0;
        Self {
            masks,
            fog_colour: Vec3::new(0.5, 0.6, 0.7),
            fog_start: 500.0,
            fog_fade: 500.0,
            minimum_colour: Vec3::ZERO,
            maximum_colour: Vec3::ONE,
            contrast: 0.0,
            saturation: 1.0,
            dof_start: 0.95,
            dof_fade: 0.01,
            bloom_intensity: 1.0,
            bloom_start: 0.95,
            bloom_fade: 0.35,
            blur_step: 0.003,
            depth_near: 1.0,
            depth_far: 1000.0,
            fade: 1.0,
        }
    }
}

impl PostProcessing {
    /// Selects a single output map: its weight goes to 1.0, all others to 0.
    pub fn set_post_map(&mut self, map: PostMap) {
        self.masks = [0.0; PostMap::COUNT];
        self.masks[map as usize] = 1.0;
    }

    #[must_use]
    pub fn mask(&self, map: PostMap) -> f32 {
        self.masks[map as usize]
    }
}
