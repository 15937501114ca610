//! Error Types
//!
//! The main error type [`EngineError`] covers all failure modes of the
//! rendering core: GPU initialization failures, shader compilation errors
//! and scene validation problems.
//!
//! All public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, EngineError>`. Errors are values; nothing in the
//! core panics across the API boundary.

use thiserror::Error;

/// The main error type for the rendering core.
#[derive(Error, Debug)]
pub enum EngineError {
    // ========================================================================
    // GPU & Initialization Errors
    // ========================================================================
    /// Failed to request a compatible GPU adapter.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// Window system error.
    #[error("Window system error: {0}")]
    WindowError(#[from] raw_window_handle::HandleError),

    /// The window surface could not be configured.
    #[error("Surface configuration failed: {0}")]
    SurfaceConfigFailed(String),

    /// An operation was attempted before [`Engine::initialize`] succeeded.
    ///
    /// [`Engine::initialize`]: crate::Engine::initialize
    #[error("Engine not initialized: {0}")]
    NotInitialized(&'static str),

    // ========================================================================
    // Shader Errors
    // ========================================================================
    /// A shader failed to compile. The log carries the full compiler
    /// diagnostic, already annotated with source spans.
    #[error("Shader '{name}' failed to compile: {log}")]
    ShaderCompile {
        /// Name of the failing shader
        name: String,
        /// Compiler diagnostic text
        log: String,
    },

    // ========================================================================
    // Scene Errors
    // ========================================================================
    /// The scene descriptor tables are inconsistent.
    #[error("Invalid scene: {0}")]
    InvalidScene(String),

    /// A descriptor index was out of range for its table.
    #[error("Index out of bounds: {context} (index: {index})")]
    IndexOutOfBounds {
        /// Description of what was being accessed
        context: &'static str,
        /// The invalid index
        index: usize,
    },

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error (shader source loading).
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Alias for `Result<T, EngineError>`.
pub type Result<T> = std::result::Result<T, EngineError>;
