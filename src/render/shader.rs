//! Shader Programs
//!
//! WGSL programs are parsed and validated on the CPU with `naga` before the
//! device ever sees them, so compile diagnostics are complete strings the
//! editor can display. The validated module also provides texture-slot
//! introspection and the back-end listing for the assembly view.
//!
//! Each compiled program owns its scene-constant uniform buffer; the buffer
//! is rewritten whenever the program becomes the active shader and the
//! view or lights changed.

use std::borrow::Cow;

use naga::valid::{Capabilities, ModuleInfo, ValidationFlags, Validator};

use crate::errors::{EngineError, Result};
use crate::render::uniforms::SceneConstants;
use crate::scene::{ShaderData, ShaderSource};

/// Parses and validates WGSL without touching the device. Returns the
/// module and its validation info, or the full diagnostic text prefixed
/// with the shader name.
pub fn validate_wgsl(
    name: &str,
    source: &str,
) -> std::result::Result<(naga::Module, ModuleInfo), String> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| format!("{name}: {}", e.emit_to_string(source)))?;
    let info = Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .map_err(|e| format!("{name}: {}", e.emit_to_string(source)))?;
    Ok((module, info))
}

/// Compile check for the editor: empty string on success, diagnostics
/// otherwise.
#[must_use]
pub fn compile_diagnostics(name: &str, source: &str) -> String {
    match validate_wgsl(name, source) {
        Ok(_) => String::new(),
        Err(log) => log,
    }
}

fn count_texture_slots(module: &naga::Module) -> usize {
    module
        .global_variables
        .iter()
        .filter(|(_, var)| {
            matches!(
                module.types[var.ty].inner,
                naga::TypeInner::Image { .. }
            )
        })
        .count()
}

/// A validated, device-compiled shader program.
pub struct ShaderProgram {
    pub name: String,
    text: String,
    pub module: wgpu::ShaderModule,
    naga_module: naga::Module,
    naga_info: ModuleInfo,
    texture_slots: usize,
    pub scene_buffer: wgpu::Buffer,
    pub scene_bind_group: wgpu::BindGroup,
}

impl ShaderProgram {
    /// Resolves the source (reading the file for path-based shaders),
    /// validates it and creates the device module. Nothing is mutated on
    /// failure, so the caller can keep a previously compiled program.
    pub fn compile(
        device: &wgpu::Device,
        scene_layout: &wgpu::BindGroupLayout,
        data: &ShaderData,
    ) -> Result<Self> {
        let text = match &data.source {
            ShaderSource::Text(text) => text.clone(),
            ShaderSource::File(path) => std::fs::read_to_string(path)?,
        };

        let (naga_module, naga_info) =
            validate_wgsl(&data.name, &text).map_err(|log| EngineError::ShaderCompile {
                name: data.name.clone(),
                log,
            })?;
        let texture_slots = count_texture_slots(&naga_module);

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&data.name),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(&text)),
        });

        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} Scene Constants", data.name)),
            size: std::mem::size_of::<SceneConstants>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Scene BindGroup", data.name)),
            layout: scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        log::debug!(
            "compiled shader '{}' ({} texture slots)",
            data.name,
            texture_slots
        );

        Ok(Self {
            name: data.name.clone(),
            text,
            module,
            naga_module,
            naga_info,
            texture_slots,
            scene_buffer,
            scene_bind_group,
        })
    }

    /// The resolved source text, as shown in the editor.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of texture bindings the program declares.
    #[must_use]
    pub fn texture_slots(&self) -> usize {
        self.texture_slots
    }

    /// Re-emits the validated module as canonical WGSL, the closest thing
    /// to a backend assembly listing.
    pub fn assembly(&self) -> Result<String> {
        naga::back::wgsl::write_string(
            &self.naga_module,
            &self.naga_info,
            naga::back::wgsl::WriterFlags::empty(),
        )
        .map_err(|e| EngineError::ShaderCompile {
            name: self.name.clone(),
            log: e.to_string(),
        })
    }

    /// Writes this program's scene constants.
    pub fn send_scene_constants(&self, queue: &wgpu::Queue, constants: &SceneConstants) {
        queue.write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(constants));
    }
}

/// The bind group layout shared by every scene-constant buffer (group 0).
pub fn scene_constant_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Scene Constants Layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}
