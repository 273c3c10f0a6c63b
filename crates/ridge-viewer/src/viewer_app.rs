//! Viewer application implementing winit ApplicationHandler
//!
//! Runs the frame loop: keyboard movement, mouse look and terrain drawing.

use ridge_core::{Mat4, RidgeConfig, Transform};
use ridge_render::{Camera, RenderContext, SceneUniforms, ShaderSource, TerrainRenderer};
use ridge_runtime::{movement_speed, FrameClock, InputState};
use ridge_terrain::TerrainMesh;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

pub struct ViewerApp {
    config: RidgeConfig,
    /// Held until the GPU context exists, then uploaded and dropped
    pending_mesh: Option<TerrainMesh>,

    // Systems
    pub clock: FrameClock,
    pub input: InputState,

    // Rendering
    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    renderer: Option<TerrainRenderer>,
    camera: Camera,
    model: Mat4,

    cursor_captured: bool,
}

impl ViewerApp {
    pub fn new(config: RidgeConfig, mesh: TerrainMesh) -> Self {
        let camera = Camera::from_settings(&config.camera);
        let model = Transform::from_uniform_scale(config.render.model_scale).to_matrix();
        Self {
            config,
            pending_mesh: Some(mesh),
            clock: FrameClock::new(),
            input: InputState::new(),
            window: None,
            render_context: None,
            renderer: None,
            camera,
            model,
            cursor_captured: false,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) {
        // The configured "height" is the window's horizontal extent
        let c = &self.config.camera;
        let window_attrs = Window::default_attributes()
            .with_title("Ridge")
            .with_inner_size(PhysicalSize::new(c.screen_height, c.screen_width));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let render_context = match pollster::block_on(RenderContext::new(window)) {
            Ok(context) => context,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let shader = ShaderSource::load_or_builtin(self.config.render.shader_path());
        let Some(mesh) = self.pending_mesh.take() else {
            return;
        };
        let renderer = match TerrainRenderer::new(
            &render_context,
            &mesh,
            &shader,
            self.config.render.clear_color,
        ) {
            Ok(renderer) => renderer,
            Err(e) => {
                // Nothing meaningful can be drawn without a valid pipeline
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let size = render_context.size;
        self.camera.set_screen_dimensions(size.width, size.height);
        self.render_context = Some(render_context);
        self.renderer = Some(renderer);

        self.capture_cursor();
    }

    fn capture_cursor(&mut self) {
        if let Some(window) = &self.window {
            // Try confined first, then locked. Raw motion still arrives
            // without a grab, so mouse look keeps working either way.
            report_grab(
                window
                    .set_cursor_grab(CursorGrabMode::Confined)
                    .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked)),
                "grab",
            );
            window.set_cursor_visible(false);
            self.cursor_captured = true;
            // Motion while released must not turn into a jump on recapture
            self.camera.reset_mouse();
        }
    }

    fn release_cursor(&mut self) {
        if let Some(window) = &self.window {
            report_grab(window.set_cursor_grab(CursorGrabMode::None), "release");
            window.set_cursor_visible(true);
            self.cursor_captured = false;
        }
    }

    /// Apply held movement keys for this frame, then refresh the camera matrices
    fn tick(&mut self) {
        let dt = self.clock.tick();
        let speed = movement_speed(self.config.camera.base_speed, dt);

        for direction in self.input.pressed_directions() {
            self.camera.move_camera(speed, direction);
        }
        self.camera.update();
    }

    fn render(&mut self, event_loop: &ActiveEventLoop) {
        let Some(context) = &mut self.render_context else {
            return;
        };
        let Some(renderer) = &self.renderer else {
            return;
        };

        let output = match context.surface.get_current_texture() {
            Ok(output) => output,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::warn!("Surface {:?}; reconfiguring", e);
                context.reconfigure();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Surface out of memory");
                event_loop.exit();
                return;
            }
            Err(e) => {
                log::warn!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        renderer.update_uniforms(
            &context.queue,
            &SceneUniforms::from_camera(&self.camera, self.model),
        );
        renderer.render(context, &view);

        output.present();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            self.initialize(event_loop);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.render_context {
                    context.resize(new_size);
                    self.camera.set_screen_dimensions(new_size.width, new_size.height);
                }
            }

            WindowEvent::Focused(false) => {
                self.input.release_all();
                self.camera.reset_mouse();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            // Escape releases the cursor first, then exits
                            if key_code == KeyCode::Escape {
                                if self.cursor_captured {
                                    self.release_cursor();
                                } else {
                                    event_loop.exit();
                                }
                                return;
                            }
                            self.input.process_key_down(key_code);
                        }
                        ElementState::Released => {
                            self.input.process_key_up(key_code);
                        }
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if !self.cursor_captured
                    && state == ElementState::Pressed
                    && button == MouseButton::Left
                {
                    self.capture_cursor();
                }
            }

            WindowEvent::RedrawRequested => {
                self.tick();
                self.render(event_loop);
            }

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if !self.cursor_captured {
            return;
        }

        if let DeviceEvent::MouseMotion { delta } = event {
            let (x, y) = self.input.process_mouse_raw_delta(delta.0, delta.1);
            self.camera.rotate(x, y);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Warn when the platform refused a cursor grab change; returns whether it took effect
fn report_grab<E: std::fmt::Display>(result: Result<(), E>, action: &str) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Could not {} cursor: {}", action, e);
            false
        }
    }
}
