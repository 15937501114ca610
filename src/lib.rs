#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod engine;
pub mod errors;
pub mod render;
pub mod scene;
pub mod settings;
pub mod shaders;
pub mod utils;

pub use engine::{Engine, Fade};
pub use errors::{EngineError, Result};
pub use render::passes::{FramePlan, PassKind};
pub use render::state::{DrawState, RenderState};
pub use scene::{
    Emitter, Light, MeshData, PostMap, PostProcessing, Scene, ShaderData, ShaderIndex,
    ShaderSource, Terrain, TextureData, TextureFilter, TextureKind, Water, Wave,
};
pub use settings::{Backend, RenderSettings};
pub use utils::time::Timer;
