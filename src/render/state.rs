//! Render State Machine
//!
//! Cached selector over the four state axes every draw goes through:
//! draw state (cull x wireframe), alpha blending, depth writing and the
//! selected shader. A transition is reported only when the requested value
//! differs from the cached one; callers skip the GPU work otherwise.
//!
//! Pure CPU state, no device handles. Applied-transition counters are the
//! instrumentation point for the idempotence tests.

/// Rasterizer draw state: culling and fill mode combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawState {
    #[default]
    NoCull,
    Cull,
    CullWire,
    NoCullWire,
}

impl DrawState {
    /// Folds the engine-level wireframe toggle into a requested state.
    #[must_use]
    pub fn with_wireframe(self, wireframe: bool) -> Self {
        match (self.culls(), wireframe) {
            (false, false) => Self::NoCull,
            (true, false) => Self::Cull,
            (true, true) => Self::CullWire,
            (false, true) => Self::NoCullWire,
        }
    }

    #[must_use]
    pub fn culls(self) -> bool {
        matches!(self, Self::Cull | Self::CullWire)
    }

    #[must_use]
    pub fn wireframe(self) -> bool {
        matches!(self, Self::CullWire | Self::NoCullWire)
    }
}

/// Counts of applied (non-redundant) transitions since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateCounters {
    pub draw_state: u32,
    pub alpha_blend: u32,
    pub depth_write: u32,
    pub shader: u32,
}

/// The cached render state owned by the engine.
///
/// Starts with nothing bound: the first request on each axis always
/// applies.
#[derive(Debug, Default)]
pub struct RenderState {
    draw_state: Option<DrawState>,
    alpha_blend: bool,
    depth_write: bool,
    selected_shader: Option<usize>,
    counters: StateCounters,
}

impl RenderState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a draw state; returns whether a GPU transition is needed.
    pub fn set_draw_state(&mut self, requested: DrawState) -> bool {
        let changed = self.draw_state != Some(requested);
        self.draw_state = Some(requested);
        if changed {
            self.counters.draw_state += 1;
        }
        changed
    }

    pub fn enable_alpha_blending(&mut self, enable: bool) -> bool {
        let changed = self.alpha_blend != enable;
        self.alpha_blend = enable;
        if changed {
            self.counters.alpha_blend += 1;
        }
        changed
    }

    pub fn enable_depth_write(&mut self, enable: bool) -> bool {
        let changed = self.depth_write != enable;
        self.depth_write = enable;
        if changed {
            self.counters.depth_write += 1;
        }
        changed
    }

    /// Selects the active shader; `true` means the selection changed and the
    /// shader's scene constants must be re-sent.
    pub fn select_shader(&mut self, index: usize) -> bool {
        let changed = self.selected_shader != Some(index);
        self.selected_shader = Some(index);
        if changed {
            self.counters.shader += 1;
        }
        changed
    }

    /// Frame start: forgets the shader selection so the first draw of the
    /// frame re-sends its scene constants.
    pub fn begin_frame(&mut self) {
        self.selected_shader = None;
    }

    #[must_use]
    pub fn draw_state(&self) -> Option<DrawState> {
        self.draw_state
    }

    #[must_use]
    pub fn alpha_blending(&self) -> bool {
        self.alpha_blend
    }

    #[must_use]
    pub fn depth_writing(&self) -> bool {
        self.depth_write
    }

    #[must_use]
    pub fn selected_shader(&self) -> Option<usize> {
        self.selected_shader
    }

    #[must_use]
    pub fn counters(&self) -> StateCounters {
        self.counters
    }
}
