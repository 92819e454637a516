use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use glam::{Vec2, Vec3};

mod geometry;
mod renderer;
mod ui;

use geometry::{Cube, GeometryEngine, GeometryResult, MeshData, Square};
use renderer::{Camera, FireUniforms, GpuState, background_color};
use ui::{UiActions, UiState, apply_theme, draw_help_overlay, draw_side_panel};

struct InputState {
    forward: f32,
    right: f32,
    up: f32,
    look_captured: bool,
    panning: bool,
    look_delta: Vec2,
    pan_delta: Vec2,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            forward: 0.0,
            right: 0.0,
            up: 0.0,
            look_captured: false,
            panning: false,
            look_delta: Vec2::ZERO,
            pan_delta: Vec2::ZERO,
        }
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    egui_ctx: egui::Context,

    camera: Camera,
    geometry: GeometryEngine,
    ui_state: UiState,
    input: InputState,

    last_frame: Instant,
    frame_count: u32,
    fps_timer: Instant,
    last_frame_time: Instant,

    last_vsync_state: bool,

    // Animation clock in frame units (60 per second), reset by Load Scene.
    time: f32,
    prev_tessellation: u32,
    rebuild_pending: bool,

    // Built by load_scene alongside the flame spheres; counted in the
    // scene stats but never drawn.
    square: MeshData,
    cube: MeshData,
}

impl App {
    fn new() -> Self {
        let ui_state = UiState::default();
        let prev_tessellation = ui_state.tessellation;

        Self {
            window: None,
            gpu: None,
            egui_state: None,
            egui_renderer: None,
            egui_ctx: egui::Context::default(),

            camera: Camera::default(),
            geometry: GeometryEngine::new(),
            ui_state,
            input: InputState::default(),

            last_frame: Instant::now(),
            frame_count: 0,
            fps_timer: Instant::now(),
            last_frame_time: Instant::now(),

            last_vsync_state: true,

            time: 0.0,
            prev_tessellation,
            rebuild_pending: false,

            square: Square::new(Vec3::ZERO).build(),
            cube: Cube::new(Vec3::ZERO).build(),
        }
    }

    fn init_gpu(&mut self, window: Arc<Window>) {
        let gpu = pollster::block_on(GpuState::new(window.clone()));

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            self.egui_ctx.viewport_id(),
            &window,
            Some(window.scale_factor() as f32),
            None,
            Some(2048),
        );

        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        apply_theme(&self.egui_ctx);

        self.camera
            .set_aspect(gpu.config.width as f32, gpu.config.height as f32);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);

        self.load_scene();
    }

    fn load_scene(&mut self) {
        self.square = Square::new(Vec3::ZERO).build();
        self.cube = Cube::new(Vec3::ZERO).build();

        self.geometry
            .rebuild(Vec3::ZERO, 1.0, self.ui_state.tessellation);
        self.prev_tessellation = self.ui_state.tessellation;
        self.rebuild_pending = true;

        self.time = 0.0;
    }

    fn update(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.frame_count += 1;
        if self.fps_timer.elapsed().as_secs_f32() >= 1.0 {
            let fps = self.frame_count as f32 / self.fps_timer.elapsed().as_secs_f32();
            *self.geometry.stats().fps.lock() = fps;
            self.frame_count = 0;
            self.fps_timer = Instant::now();
        }

        self.camera.set_mode(self.ui_state.camera_mode);
        self.camera
            .process_keyboard(self.input.forward, self.input.right, self.input.up, dt);

        if self.input.look_captured {
            self.camera.process_mouse_movement(self.input.look_delta);
        }
        if self.input.panning {
            self.camera.process_pan(self.input.pan_delta);
        }
        self.input.look_delta = Vec2::ZERO;
        self.input.pan_delta = Vec2::ZERO;

        // Dragging the tessellation slider rebuilds the flame spheres.
        if self.ui_state.tessellation != self.prev_tessellation {
            self.prev_tessellation = self.ui_state.tessellation;
            self.geometry
                .rebuild(Vec3::ZERO, 1.0, self.ui_state.tessellation);
            self.rebuild_pending = true;
        }

        while let Some(result) = self.geometry.try_recv_result() {
            self.rebuild_pending = false;
            match result {
                GeometryResult::Mesh(mesh) => {
                    if let Some(gpu) = &mut self.gpu {
                        gpu.flame_buffers.upload(&gpu.queue, &mesh);
                    }

                    // Two flame layers share the sphere, plus the unused
                    // square and cube the scene always carries.
                    let stats = self.geometry.stats();
                    stats.scene_vertices.store(
                        mesh.vertex_count() * 2
                            + self.square.vertex_count()
                            + self.cube.vertex_count(),
                        Ordering::Relaxed,
                    );
                    stats.scene_triangles.store(
                        mesh.triangle_count() * 2
                            + self.square.triangle_count()
                            + self.cube.triangle_count(),
                        Ordering::Relaxed,
                    );
                }
                GeometryResult::Error(e) => {
                    log::warn!("geometry rebuild failed: {}", e);
                }
            }
        }

        self.time += dt * 60.0;
    }

    fn render(&mut self) {
        if self.ui_state.fps_cap_enabled {
            let frame_duration = Duration::from_secs_f64(1.0 / self.ui_state.fps_cap as f64);
            let elapsed = self.last_frame_time.elapsed();
            if elapsed < frame_duration {
                std::thread::sleep(frame_duration - elapsed);
            }
        }
        self.last_frame_time = Instant::now();

        let (Some(window), Some(egui_state)) = (&self.window, &mut self.egui_state) else {
            return;
        };

        let raw_input = egui_state.take_egui_input(window);

        let stats = Arc::clone(self.geometry.stats());
        let last_error = self.geometry.last_error();
        let camera_pos = self.camera.position.to_array();
        let camera_mode = self.ui_state.camera_mode;
        let rebuilding = self.rebuild_pending;

        let mut ui_actions = UiActions::default();

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            ui_actions = draw_side_panel(ctx, &mut self.ui_state, &stats, &last_error, rebuilding);
            draw_help_overlay(ctx, camera_pos, camera_mode);
        });

        self.handle_ui_actions(ui_actions);

        let Some(gpu) = &mut self.gpu else { return };
        let Some(window) = &self.window else { return };
        let Some(egui_state) = &mut self.egui_state else {
            return;
        };
        let Some(egui_renderer) = &mut self.egui_renderer else {
            return;
        };

        egui_state.handle_platform_output(window, full_output.platform_output);

        if self.ui_state.vsync_enabled != self.last_vsync_state {
            gpu.set_vsync(self.ui_state.vsync_enabled);
            self.last_vsync_state = self.ui_state.vsync_enabled;
        }

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                gpu.resize(gpu.size);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                panic!("Out of GPU memory");
            }
            Err(wgpu::SurfaceError::Timeout) => {
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.update_camera(&self.camera);
        gpu.update_fire(&FireUniforms {
            fire_color: self.ui_state.fire_color,
            canvas_size: [gpu.config.width as f32, gpu.config.height as f32],
            time: self.time,
            fbm_freq: self.ui_state.fbm_freq,
            fbm_amp: self.ui_state.fbm_amp,
            fbm_octaves: self.ui_state.fbm_octaves,
            _pad: [0.0; 2],
        });

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, id, &delta);
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        gpu.render_fire(
            &view,
            &mut encoder,
            background_color(self.ui_state.background_color),
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in full_output.textures_delta.free {
            egui_renderer.free_texture(&id);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        window.request_redraw();
    }

    fn handle_ui_actions(&mut self, actions: UiActions) {
        if actions.load_scene {
            self.load_scene();
        }

        if actions.reset_camera {
            self.camera.reset();
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        let value = if pressed { 1.0 } else { 0.0 };

        match key {
            KeyCode::KeyW | KeyCode::KeyZ => self.input.forward = value,
            KeyCode::KeyS => self.input.forward = -value,
            KeyCode::KeyA | KeyCode::KeyQ => self.input.right = -value,
            KeyCode::KeyD => self.input.right = value,
            KeyCode::Space => self.input.up = value,
            KeyCode::ShiftLeft | KeyCode::ControlLeft => self.input.up = -value,
            KeyCode::Escape if pressed => {
                self.input.look_captured = false;
                if let Some(window) = &self.window {
                    let _ = window.set_cursor_grab(winit::window::CursorGrabMode::None);
                    window.set_cursor_visible(true);
                }
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window_attrs = Window::default_attributes()
            .with_title("fire3d")
            .with_inner_size(PhysicalSize::new(1600, 900));

        let window = Arc::new(event_loop.create_window(window_attrs).unwrap());
        self.init_gpu(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(egui_state) = &mut self.egui_state {
            if let Some(window) = &self.window {
                let response = egui_state.on_window_event(window, &event);
                if response.consumed {
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                self.geometry.stop();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                    self.camera
                        .set_aspect(size.width as f32, size.height as f32);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.handle_key(key, event.state == ElementState::Pressed);
                }
            }

            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state,
                ..
            } => {
                self.input.look_captured = state == ElementState::Pressed;

                if let Some(window) = &self.window {
                    if self.input.look_captured {
                        let _ = window.set_cursor_grab(winit::window::CursorGrabMode::Confined);
                        window.set_cursor_visible(false);
                    } else {
                        let _ = window.set_cursor_grab(winit::window::CursorGrabMode::None);
                        window.set_cursor_visible(true);
                    }
                }
            }

            WindowEvent::MouseInput {
                button: MouseButton::Middle,
                state,
                ..
            } => {
                self.input.panning = state == ElementState::Pressed;
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    winit::event::MouseScrollDelta::LineDelta(_, y) => y,
                    winit::event::MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                self.camera.process_scroll(scroll);
            }

            WindowEvent::RedrawRequested => {
                self.update();
                self.render();
            }

            _ => {}
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: winit::event::DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.input.look_captured {
                self.input.look_delta.x += delta.0 as f32;
                self.input.look_delta.y += delta.1 as f32;
            } else if self.input.panning {
                self.input.pan_delta.x += delta.0 as f32;
                self.input.pan_delta.y += delta.1 as f32;
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() {
    env_logger::init();

    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).unwrap();
}
