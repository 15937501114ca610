//! Engine Core
//!
//! [`Engine`] is the central coordinator: it owns the GPU context, the
//! render targets, the compiled shaders, the GPU-side renderables and the
//! render-state machine, and drives the fixed multi-pass frame. It has no
//! window management of its own; any frontend that can hand over raw
//! window handles can drive it.
//!
//! # Lifecycle
//!
//! 1. Create with [`Engine::new`]
//! 2. Allocate GPU resources with [`Engine::initialize`]
//! 3. Load scene data with [`Engine::initialise_scene`]
//! 4. Call [`Engine::render`] each frame, [`Engine::update_view`] on
//!    camera movement

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::errors::{EngineError, Result};
use crate::render::emitter::GpuEmitter;
use crate::render::mesh::GpuMesh;
use crate::render::passes::{FramePlan, FullscreenPass, PassKind};
use crate::render::pipeline::{
    BindLayouts, PipelineCache, PipelineKey, RenderPipelineId, TargetLayout, VertexKind,
};
use crate::render::shader::{compile_diagnostics, ShaderProgram};
use crate::render::state::{DrawState, RenderState};
use crate::render::target::RenderTarget;
use crate::render::terrain::GpuTerrain;
use crate::render::texture::TextureSet;
use crate::render::uniforms::{
    BlurConstants, MeshConstants, PostConstants, PreEffectsConstants, SceneConstants,
};
use crate::render::water::GpuWater;
use crate::render::GpuContext;
use crate::scene::{Camera, Scene, ShaderIndex, ShaderSource};
use crate::settings::RenderSettings;
use crate::utils::Timer;

/// Screen fade accumulator feeding the composite pass.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    amount: f32,
}

impl Default for Fade {
    fn default() -> Self {
        Self { amount: 1.0 }
    }
}

impl Fade {
    /// Steps toward the requested end of the range; returns `true` exactly
    /// when that boundary is reached.
    pub fn fade(&mut self, fade_in: bool, amount: f32) -> bool {
        let step = if fade_in { amount } else { -amount };
        self.amount = (self.amount + step).clamp(0.0, 1.0);
        if fade_in {
            self.amount >= 1.0
        } else {
            self.amount <= 0.0
        }
    }

    pub fn set(&mut self, value: f32) {
        self.amount = value.clamp(0.0, 1.0);
    }

    #[must_use]
    pub fn value(&self) -> f32 {
        self.amount
    }
}

/// Which renderable a scene-pass command draws.
#[derive(Clone, Copy)]
enum SceneDraw {
    Terrain(usize),
    Mesh(usize),
    Water(usize),
    Emitter(usize),
}

#[derive(Clone, Copy)]
struct SceneCommand {
    pipeline: RenderPipelineId,
    shader: usize,
    draw: SceneDraw,
}

/// Everything that exists only after [`Engine::initialize`].
struct Gpu {
    context: GpuContext,
    layouts: BindLayouts,
    textures: TextureSet,
    pipelines: PipelineCache,
    camera: Camera,
    state: RenderState,
    scene_target: RenderTarget,
    effects_target: RenderTarget,
    blur_target: RenderTarget,
    shaders: Vec<ShaderProgram>,
    meshes: Vec<GpuMesh>,
    terrain: Vec<GpuTerrain>,
    water: Vec<GpuWater>,
    emitters: Vec<GpuEmitter>,
    pre_effects: FullscreenPass,
    blur_horizontal: FullscreenPass,
    blur_vertical: FullscreenPass,
    post: FullscreenPass,
    /// Per-shader "scene constants sent this frame" flags.
    constants_sent: Vec<bool>,
    lights_updated: bool,
}

pub struct Engine {
    settings: RenderSettings,
    plan: FramePlan,
    fade: Fade,
    wireframe: bool,
    diffuse_textures: bool,
    gpu: Option<Gpu>,
}

impl Engine {
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            plan: FramePlan::standard(),
            fade: Fade::default(),
            wireframe: false,
            diffuse_textures: true,
            gpu: None,
        }
    }

    /// Creates the device, surface, render targets and engine-lifetime
    /// state objects. Must succeed before anything else runs.
    ///
    /// # Errors
    ///
    /// Any adapter, device or surface failure aborts startup.
    pub fn initialize<W>(&mut self, window: W, width: u32, height: u32) -> Result<()>
    where
        W: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static,
    {
        let context = pollster::block_on(GpuContext::new(window, &self.settings, width, height))?;
        let device = &context.device;

        let layouts = BindLayouts::new(device);
        let textures = TextureSet::new(device, &context.queue)?;
        let pipelines = PipelineCache::new(
            device,
            &layouts,
            context.surface_format(),
            device.features(),
        );

        let scene_target = RenderTarget::new(device, "Scene Target", width, height, 2, true, false);
        let effects_target =
            RenderTarget::new(device, "Effects Target", width, height, 1, false, false);
        let blur_target = RenderTarget::new(device, "Blur Target", width, height, 1, false, true);

        let pre_effects = FullscreenPass::new(
            device,
            "Pre Effects",
            ShaderIndex::PRE_EFFECTS,
            std::mem::size_of::<PreEffectsConstants>() as u64,
        );
        let blur_horizontal = FullscreenPass::new(
            device,
            "Blur Horizontal",
            ShaderIndex::BLUR_HORIZONTAL,
            std::mem::size_of::<BlurConstants>() as u64,
        );
        let blur_vertical = FullscreenPass::new(
            device,
            "Blur Vertical",
            ShaderIndex::BLUR_VERTICAL,
            std::mem::size_of::<BlurConstants>() as u64,
        );
        let post = FullscreenPass::new(
            device,
            "Post Composite",
            ShaderIndex::POST,
            std::mem::size_of::<PostConstants>() as u64,
        );

        let mut state = RenderState::new();
        state.enable_depth_write(true);

        let mut gpu = Gpu {
            camera: Camera::new(width, height),
            state,
            layouts,
            textures,
            pipelines,
            scene_target,
            effects_target,
            blur_target,
            shaders: Vec::new(),
            meshes: Vec::new(),
            terrain: Vec::new(),
            water: Vec::new(),
            emitters: Vec::new(),
            pre_effects,
            blur_horizontal,
            blur_vertical,
            post,
            constants_sent: Vec::new(),
            lights_updated: true,
            context,
        };
        gpu.bind_fullscreen_passes();

        log::info!("engine initialized {width}x{height}");
        self.gpu = Some(gpu);
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };
        gpu.context.resize(width, height);
        let device = &gpu.context.device;
        gpu.scene_target.resize(device, width, height);
        gpu.effects_target.resize(device, width, height);
        gpu.blur_target.resize(device, width, height);
        gpu.camera.projection = crate::scene::camera::projection_matrix(width, height);
        gpu.camera.view_updated = true;
        gpu.bind_fullscreen_passes();
    }

    /// Validates the scene and builds every GPU-side object, then runs the
    /// reinitialization path to compile shaders and upload data.
    pub fn initialise_scene(&mut self, scene: &Scene) -> Result<()> {
        scene.validate()?;
        let gpu = self.gpu_mut("initialise_scene")?;
        gpu.shaders.clear();
        gpu.meshes.clear();
        gpu.terrain.clear();
        gpu.water.clear();
        gpu.emitters.clear();
        self.re_initialise_scene(scene)
    }

    /// The hot-reload path: recompiles every shader in index order
    /// (fail-fast, previously compiled programs stay in place on error),
    /// then re-uploads textures and renderable geometry.
    pub fn re_initialise_scene(&mut self, scene: &Scene) -> Result<()> {
        let gpu = self.gpu_mut("re_initialise_scene")?;
        let device = &gpu.context.device;

        for (index, data) in scene.shaders.iter().enumerate() {
            let program = ShaderProgram::compile(device, &gpu.layouts.scene, data)?;
            if index < gpu.shaders.len() {
                gpu.shaders[index] = program;
            } else {
                gpu.shaders.push(program);
            }
        }
        gpu.shaders.truncate(scene.shaders.len());
        gpu.constants_sent = vec![false; gpu.shaders.len()];
        gpu.pipelines.clear();

        gpu.textures
            .build(device, &gpu.context.queue, &scene.textures)?;

        gpu.meshes = scene
            .meshes
            .iter()
            .map(|m| {
                GpuMesh::new(
                    device,
                    &gpu.layouts,
                    &gpu.textures,
                    m,
                    std::mem::size_of::<MeshConstants>() as u64,
                )
            })
            .collect();
        gpu.terrain = scene
            .terrain
            .iter()
            .map(|t| GpuTerrain::new(device, &gpu.layouts, &gpu.textures, t))
            .collect();
        gpu.water = scene
            .water
            .iter()
            .map(|w| GpuWater::new(device, &gpu.layouts, &gpu.textures, w))
            .collect();
        gpu.emitters = scene
            .emitters
            .iter()
            .enumerate()
            .map(|(i, e)| GpuEmitter::new(device, &gpu.layouts, &gpu.textures, e, i as u64))
            .collect();

        gpu.warn_texture_mismatches();
        gpu.lights_updated = true;
        log::info!(
            "scene initialized: {} shaders, {} meshes, {} terrain, {} water, {} emitters",
            gpu.shaders.len(),
            gpu.meshes.len(),
            gpu.terrain.len(),
            gpu.water.len(),
            gpu.emitters.len()
        );
        Ok(())
    }

    /// Renders one frame through the standard pass plan and presents it.
    /// A lost surface reconfigures and skips the frame.
    pub fn render(&mut self, scene: &Scene, timer: &Timer) -> Result<()> {
        let wireframe = self.wireframe;
        let use_diffuse = self.diffuse_textures;
        let fade = self.fade.value();
        let plan = self.plan.clone();
        let gpu = self.gpu_mut("render")?;

        let frame = match gpu.context.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(frame)
            | wgpu::CurrentSurfaceTexture::Suboptimal(frame) => frame,
            wgpu::CurrentSurfaceTexture::Lost
            | wgpu::CurrentSurfaceTexture::Outdated => {
                log::warn!("surface lost, reconfiguring");
                gpu.context.reconfigure();
                return Ok(());
            }
            wgpu::CurrentSurfaceTexture::Timeout
            | wgpu::CurrentSurfaceTexture::Occluded
            | wgpu::CurrentSurfaceTexture::Validation => {
                log::warn!("skipping frame: surface texture unavailable");
                return Ok(());
            }
        };
        let surface_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let time = timer.total_seconds();
        let dt = timer.dt_seconds();

        gpu.state.begin_frame();
        gpu.constants_sent.iter_mut().for_each(|sent| *sent = false);

        gpu.update_renderables(scene, time, dt, fade);
        let commands = gpu.record_scene_commands(scene, time, wireframe);
        let fullscreen_pipelines = gpu.resolve_fullscreen_pipelines();

        let mut encoder =
            gpu.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Frame Encoder"),
                });

        for pass in plan.passes() {
            match pass {
                PassKind::Scene => gpu.run_scene_pass(&mut encoder, &commands, use_diffuse),
                PassKind::PreEffects => gpu.run_pre_effects_pass(&mut encoder, fullscreen_pipelines[0]),
                PassKind::BlurHorizontal => {
                    gpu.run_blur_horizontal_pass(&mut encoder, fullscreen_pipelines[1]);
                }
                PassKind::BlurVertical => {
                    // Snapshot the horizontal result so the vertical pass
                    // samples a copy while writing the same target.
                    gpu.blur_target.snapshot(&mut encoder);
                    gpu.run_blur_vertical_pass(&mut encoder, fullscreen_pipelines[2]);
                }
                PassKind::PostComposite => {
                    gpu.run_post_pass(&mut encoder, fullscreen_pipelines[3], &surface_view);
                }
            }
        }

        gpu.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        gpu.camera.view_updated = false;
        gpu.lights_updated = false;
        Ok(())
    }

    /// Ingests a new camera world matrix; a no-op before initialization.
    pub fn update_view(&mut self, world: glam::Mat4) {
        if let Some(gpu) = &mut self.gpu {
            gpu.camera.update(&world);
        }
    }

    pub fn set_fade(&mut self, value: f32) {
        self.fade.set(value);
    }

    /// See [`Fade::fade`].
    pub fn fade_view(&mut self, fade_in: bool, amount: f32) -> bool {
        self.fade.fade(fade_in, amount)
    }

    pub fn toggle_wireframe(&mut self) {
        self.wireframe = !self.wireframe;
        log::debug!("wireframe: {}", self.wireframe);
    }

    /// Globally enables or disables diffuse texture display; disabled draws
    /// bind the blank texture in the diffuse slot.
    pub fn set_diffuse_textures(&mut self, enable: bool) {
        self.diffuse_textures = enable;
    }

    /// Re-uploads one texture and rebinds every renderable that could
    /// reference it.
    pub fn reload_texture(&mut self, scene: &Scene, index: usize) -> Result<()> {
        let gpu = self.gpu_mut("reload_texture")?;
        let data = scene
            .textures
            .get(index)
            .ok_or(EngineError::IndexOutOfBounds {
                context: "texture reload",
                index,
            })?;
        gpu.textures
            .reload(&gpu.context.device, &gpu.context.queue, index, data)?;
        gpu.rebind_renderable_textures(scene);
        Ok(())
    }

    /// Re-uploads one terrain patch's geometry.
    pub fn reload_terrain(&mut self, scene: &Scene, index: usize) -> Result<()> {
        let gpu = self.gpu_mut("reload_terrain")?;
        let descriptor = scene
            .terrain
            .get(index)
            .ok_or(EngineError::IndexOutOfBounds {
                context: "terrain reload",
                index,
            })?;
        let patch = gpu
            .terrain
            .get_mut(index)
            .ok_or(EngineError::IndexOutOfBounds {
                context: "terrain reload",
                index,
            })?;
        patch.mesh.reload(
            &gpu.context.device,
            &gpu.layouts,
            &gpu.textures,
            &descriptor.mesh,
        );
        Ok(())
    }

    /// The compiled source text of a shader, as shown in the editor.
    #[must_use]
    pub fn shader_text(&self, index: usize) -> Option<&str> {
        self.gpu
            .as_ref()
            .and_then(|gpu| gpu.shaders.get(index))
            .map(ShaderProgram::text)
    }

    /// Canonical listing of a compiled shader.
    pub fn shader_assembly(&self, index: usize) -> Result<String> {
        let gpu = self
            .gpu
            .as_ref()
            .ok_or(EngineError::NotInitialized("shader_assembly"))?;
        gpu.shaders
            .get(index)
            .ok_or(EngineError::IndexOutOfBounds {
                context: "shader assembly",
                index,
            })?
            .assembly()
    }

    /// Editor-facing compile check: returns the diagnostic text, empty on
    /// success. On success with a live device, the compiled program is
    /// swapped in and cached pipelines are dropped.
    pub fn compile_shader(&mut self, scene: &Scene, index: usize) -> String {
        let Some(data) = scene.shaders.get(index) else {
            return format!("no shader at index {index}");
        };
        let text = match &data.source {
            ShaderSource::Text(text) => text.clone(),
            ShaderSource::File(path) => match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => return format!("{}: {e}", data.name),
            },
        };
        let diagnostics = compile_diagnostics(&data.name, &text);
        if !diagnostics.is_empty() {
            return diagnostics;
        }

        if let Some(gpu) = &mut self.gpu
            && index < gpu.shaders.len()
        {
            match ShaderProgram::compile(&gpu.context.device, &gpu.layouts.scene, data) {
                Ok(program) => {
                    gpu.shaders[index] = program;
                    gpu.pipelines.clear();
                }
                Err(e) => return e.to_string(),
            }
        }
        String::new()
    }

    #[must_use]
    pub fn frame_plan(&self) -> &FramePlan {
        &self.plan
    }

    #[must_use]
    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    fn gpu_mut(&mut self, op: &'static str) -> Result<&mut Gpu> {
        self.gpu.as_mut().ok_or(EngineError::NotInitialized(op))
    }
}

impl Gpu {
    fn bind_fullscreen_passes(&mut self) {
        let sampler = &self.textures.samplers.linear;
        let device = &self.context.device;
        self.pre_effects.bind(
            device,
            &self.layouts,
            &[self.scene_target.color_view(0), self.scene_target.color_view(1)],
            sampler,
        );
        self.blur_horizontal.bind(
            device,
            &self.layouts,
            &[self.effects_target.color_view(0)],
            sampler,
        );
        let blur_copy = self
            .blur_target
            .copy_view()
            .unwrap_or_else(|| self.blur_target.color_view(0));
        self.blur_vertical
            .bind(device, &self.layouts, &[blur_copy], sampler);
        self.post.bind(
            device,
            &self.layouts,
            &[
                self.scene_target.color_view(0),
                self.scene_target.color_view(1),
                self.effects_target.color_view(0),
                self.blur_target.color_view(0),
            ],
            sampler,
        );
    }

    /// Logs a warning for every renderable whose assigned texture count
    /// differs from what its shader declares. Never fatal.
    fn warn_texture_mismatches(&self) {
        let check = |name: &str, shader: usize, assigned: usize| {
            if let Some(program) = self.shaders.get(shader)
                && program.texture_slots() != assigned
            {
                log::warn!(
                    "'{name}': {assigned} textures assigned, shader '{}' declares {}; \
                     blank texture fills the difference",
                    program.name,
                    program.texture_slots()
                );
            }
        };
        for mesh in &self.meshes {
            check(&mesh.name, mesh.shader, mesh.assigned_textures());
        }
        for terrain in &self.terrain {
            check(
                &terrain.mesh.name,
                terrain.mesh.shader,
                terrain.mesh.assigned_textures(),
            );
        }
        for water in &self.water {
            check(
                &water.mesh.name,
                water.mesh.shader,
                water.mesh.assigned_textures(),
            );
        }
        for emitter in &self.emitters {
            check(&emitter.name, emitter.shader, emitter.assigned_textures());
        }
    }

    /// Rewrites every per-draw constant block and ticks the particle
    /// systems.
    fn update_renderables(&mut self, scene: &Scene, time: f32, dt: f32, fade: f32) {
        let queue = &self.context.queue;
        for (gpu_mesh, mesh) in self.meshes.iter().zip(&scene.meshes) {
            let constants = MeshConstants::for_mesh(mesh);
            gpu_mesh.write_constants(queue, bytemuck::bytes_of(&constants));
        }
        for (patch, terrain) in self.terrain.iter().zip(&scene.terrain) {
            patch.update(queue, terrain);
        }
        for (gpu_water, water) in self.water.iter().zip(&scene.water) {
            gpu_water.update(queue, water, time);
        }
        for (gpu_emitter, emitter) in self.emitters.iter_mut().zip(&scene.emitters) {
            gpu_emitter.update(queue, emitter, dt);
        }

        self.pre_effects.write_constants(
            queue,
            bytemuck::bytes_of(&PreEffectsConstants::pack(&scene.post)),
        );
        let blur = BlurConstants {
            blur_step: scene.post.blur_step,
            _pad: [0.0; 3],
        };
        self.blur_horizontal
            .write_constants(queue, bytemuck::bytes_of(&blur));
        self.blur_vertical
            .write_constants(queue, bytemuck::bytes_of(&blur));
        self.post.write_constants(
            queue,
            bytemuck::bytes_of(&PostConstants::pack(&scene.post, fade)),
        );
    }

    /// Phase A for the scene pass: walk the renderables in draw order, run
    /// the state machine, send scene constants where required, and resolve
    /// pipelines.
    fn record_scene_commands(
        &mut self,
        scene: &Scene,
        time: f32,
        wireframe: bool,
    ) -> Vec<SceneCommand> {
        let scene_constants = SceneConstants::new(
            self.camera.view_projection(),
            self.camera.position,
            self.camera.right,
            self.camera.up,
            time,
            &scene.lights,
        );
        let constants_dirty = self.camera.view_updated || self.lights_updated;

        let mut commands = Vec::with_capacity(
            self.terrain.len() + self.meshes.len() + self.water.len() + self.emitters.len(),
        );

        struct Request {
            shader: usize,
            cull: bool,
            alpha_blend: bool,
            depth_write: bool,
            vertex: VertexKind,
            draw: SceneDraw,
        }
        let mut requests = Vec::with_capacity(commands.capacity());
        for (i, patch) in self.terrain.iter().enumerate() {
            requests.push(Request {
                shader: patch.mesh.shader,
                cull: patch.mesh.backface_cull,
                alpha_blend: false,
                depth_write: true,
                vertex: VertexKind::Mesh,
                draw: SceneDraw::Terrain(i),
            });
        }
        for (i, mesh) in self.meshes.iter().enumerate() {
            requests.push(Request {
                shader: mesh.shader,
                cull: mesh.backface_cull,
                alpha_blend: false,
                depth_write: true,
                vertex: VertexKind::Mesh,
                draw: SceneDraw::Mesh(i),
            });
        }
        for (i, water) in self.water.iter().enumerate() {
            requests.push(Request {
                shader: water.mesh.shader,
                cull: water.mesh.backface_cull,
                alpha_blend: true,
                depth_write: true,
                vertex: VertexKind::Mesh,
                draw: SceneDraw::Water(i),
            });
        }
        for (i, emitter) in self.emitters.iter().enumerate() {
            requests.push(Request {
                shader: emitter.shader,
                cull: false,
                alpha_blend: true,
                depth_write: false,
                vertex: VertexKind::Particle,
                draw: SceneDraw::Emitter(i),
            });
        }

        for request in requests {
            let draw_state = if request.cull {
                DrawState::Cull
            } else {
                DrawState::NoCull
            }
            .with_wireframe(wireframe);

            self.state.set_draw_state(draw_state);
            self.state.enable_alpha_blending(request.alpha_blend);
            self.state.enable_depth_write(request.depth_write);
            let shader_changed = self.state.select_shader(request.shader);

            let Some(program) = self.shaders.get(request.shader) else {
                continue;
            };
            if shader_changed || (constants_dirty && !self.constants_sent[request.shader]) {
                program.send_scene_constants(&self.context.queue, &scene_constants);
                self.constants_sent[request.shader] = true;
            }

            let pipeline = self.pipelines.get(
                &self.context.device,
                PipelineKey {
                    shader: request.shader,
                    draw_state,
                    alpha_blend: request.alpha_blend,
                    depth_write: request.depth_write,
                    vertex: request.vertex,
                    target: TargetLayout::SceneMrt,
                },
                program,
            );
            commands.push(SceneCommand {
                pipeline,
                shader: request.shader,
                draw: request.draw,
            });
        }
        commands
    }

    /// Phase A for the fullscreen stages: pre-effects, blur horizontal,
    /// blur vertical, post composite, in that order.
    fn resolve_fullscreen_pipelines(&mut self) -> [Option<RenderPipelineId>; 4] {
        let stages = [
            (ShaderIndex::PRE_EFFECTS, TargetLayout::SingleHdr),
            (ShaderIndex::BLUR_HORIZONTAL, TargetLayout::SingleHdr),
            (ShaderIndex::BLUR_VERTICAL, TargetLayout::SingleHdr),
            (ShaderIndex::POST, TargetLayout::Surface),
        ];
        stages.map(|(shader, target)| {
            self.state.set_draw_state(DrawState::NoCull);
            self.state.enable_alpha_blending(false);
            self.state.enable_depth_write(false);
            self.state.select_shader(shader);
            let program = self.shaders.get(shader)?;
            Some(self.pipelines.get(
                &self.context.device,
                PipelineKey {
                    shader,
                    draw_state: DrawState::NoCull,
                    alpha_blend: false,
                    depth_write: false,
                    vertex: VertexKind::Fullscreen,
                    target,
                },
                program,
            ))
        })
    }

    fn run_scene_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        commands: &[SceneCommand],
        use_diffuse: bool,
    ) {
        let color_attachment = |view, clear| {
            Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })
        };
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[
                color_attachment(self.scene_target.color_view(0), self.context.clear_color),
                color_attachment(self.scene_target.color_view(1), wgpu::Color::BLACK),
            ],
            depth_stencil_attachment: self.scene_target.depth_view().map(|view| {
                wgpu::RenderPassDepthStencilAttachment {
                    view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }
            }),
            ..Default::default()
        });

        for command in commands {
            pass.set_pipeline(self.pipelines.pipeline(command.pipeline));
            pass.set_bind_group(0, &self.shaders[command.shader].scene_bind_group, &[]);
            match command.draw {
                SceneDraw::Terrain(i) => {
                    let mesh = &self.terrain[i].mesh;
                    pass.set_bind_group(1, &mesh.object_bind_group, &[]);
                    pass.set_bind_group(2, mesh_textures(mesh, use_diffuse), &[]);
                    mesh.draw(&mut pass);
                }
                SceneDraw::Mesh(i) => {
                    let mesh = &self.meshes[i];
                    pass.set_bind_group(1, &mesh.object_bind_group, &[]);
                    pass.set_bind_group(2, mesh_textures(mesh, use_diffuse), &[]);
                    mesh.draw(&mut pass);
                }
                SceneDraw::Water(i) => {
                    let mesh = &self.water[i].mesh;
                    pass.set_bind_group(1, &mesh.object_bind_group, &[]);
                    pass.set_bind_group(2, mesh_textures(mesh, use_diffuse), &[]);
                    mesh.draw(&mut pass);
                }
                SceneDraw::Emitter(i) => {
                    let emitter = &self.emitters[i];
                    pass.set_bind_group(1, emitter.object_bind_group(), &[]);
                    pass.set_bind_group(2, emitter.texture_bind_group(use_diffuse), &[]);
                    emitter.draw(&mut pass);
                }
            }
        }
    }

    fn run_fullscreen(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        label: &str,
        pipeline: Option<RenderPipelineId>,
        stage: &FullscreenPass,
        view: &wgpu::TextureView,
    ) {
        let Some(pipeline) = pipeline else {
            return;
        };
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            ..Default::default()
        });
        pass.set_pipeline(self.pipelines.pipeline(pipeline));
        stage.draw(&mut pass);
    }

    fn run_pre_effects_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        pipeline: Option<RenderPipelineId>,
    ) {
        self.run_fullscreen(
            encoder,
            "Pre Effects Pass",
            pipeline,
            &self.pre_effects,
            self.effects_target.color_view(0),
        );
    }

    fn run_blur_horizontal_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        pipeline: Option<RenderPipelineId>,
    ) {
        self.run_fullscreen(
            encoder,
            "Blur Horizontal Pass",
            pipeline,
            &self.blur_horizontal,
            self.blur_target.color_view(0),
        );
    }

    fn run_blur_vertical_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        pipeline: Option<RenderPipelineId>,
    ) {
        self.run_fullscreen(
            encoder,
            "Blur Vertical Pass",
            pipeline,
            &self.blur_vertical,
            self.blur_target.color_view(0),
        );
    }

    fn run_post_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        pipeline: Option<RenderPipelineId>,
        surface_view: &wgpu::TextureView,
    ) {
        self.run_fullscreen(encoder, "Post Composite Pass", pipeline, &self.post, surface_view);
    }

    fn rebind_renderable_textures(&mut self, scene: &Scene) {
        let device = &self.context.device;
        for (gpu_mesh, mesh) in self.meshes.iter_mut().zip(&scene.meshes) {
            gpu_mesh.rebind_textures(device, &self.layouts, &self.textures, mesh);
        }
        for (patch, terrain) in self.terrain.iter_mut().zip(&scene.terrain) {
            patch
                .mesh
                .rebind_textures(device, &self.layouts, &self.textures, &terrain.mesh);
        }
        for (gpu_water, water) in self.water.iter_mut().zip(&scene.water) {
            gpu_water
                .mesh
                .rebind_textures(device, &self.layouts, &self.textures, &water.mesh);
        }
        for (gpu_emitter, emitter) in self.emitters.iter_mut().zip(&scene.emitters) {
            gpu_emitter.rebind_textures(device, &self.layouts, &self.textures, emitter);
        }
    }
}

fn mesh_textures(mesh: &GpuMesh, use_diffuse: bool) -> &wgpu::BindGroup {
    if use_diffuse {
        &mesh.texture_bind_group
    } else {
        &mesh.blank_diffuse_bind_group
    }
}
