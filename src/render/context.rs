//! wgpu Context
//!
//! [`GpuContext`] holds the core GPU handles: instance, device, queue,
//! surface and surface configuration. The backend is selected exactly once
//! here, when the instance is created; everything above this module is
//! backend-neutral.

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::errors::{EngineError, Result};
use crate::settings::RenderSettings;

/// Core wgpu context holding GPU handles.
///
/// Owns the device, the command queue, the window surface and its
/// configuration. Depth buffers belong to the offscreen targets; the
/// window surface is only ever the destination of the composite pass.
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub config: wgpu::SurfaceConfiguration,
    pub clear_color: wgpu::Color,
}

impl GpuContext {
    pub async fn new<W>(
        window: W,
        settings: &RenderSettings,
        width: u32,
        height: u32,
    ) -> Result<Self>
    where
        W: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static,
    {
        let mut descriptor = wgpu::InstanceDescriptor::new_without_display_handle();
        descriptor.backends = settings.backend.to_wgpu();
        let instance = wgpu::Instance::new(descriptor);
        log::info!("requesting adapter ({} backend)", settings.backend.name());

        let surface = instance
            .create_surface(window)
            .map_err(|e| EngineError::AdapterRequestFailed(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: settings.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| EngineError::AdapterRequestFailed(e.to_string()))?;
        log::info!("adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: settings.required_features
                    & adapter.features(),
                required_limits: settings.required_limits.clone(),
                memory_hints: wgpu::MemoryHints::Performance,
                ..Default::default()
            })
            .await?;

        let mut config = surface
            .get_default_config(&adapter, width, height)
            .ok_or_else(|| {
                EngineError::SurfaceConfigFailed(
                    "surface not supported by adapter".to_string(),
                )
            })?;
        config.present_mode = if settings.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        surface.configure(&device, &config);

        Ok(Self {
            device,
            queue,
            surface,
            config,
            clear_color: settings.clear_color,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigures the surface after a lost/outdated frame.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// The surface color format.
    #[inline]
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }
}
