//! Interactive tile editor presented through wgpu + winit.
//!
//! Lighting is still computed on the CPU; the packed buffer is uploaded as
//! a texture every frame and scaled to the window on the GPU.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use super::ViewerError;
use super::editor::{EditorState, LIGHT_PALETTE};
use super::viewer::print_controls;
use crate::gpu::{GpuContext, PresentPipeline};

/// Configuration for the GPU viewer
#[derive(Clone)]
pub struct GpuViewerConfig {
    /// Initial window pixels per cell
    pub scale: f64,
    /// Color of lights added with `A`
    pub light_color: (f32, f32, f32),
    pub title: String,
}

impl Default for GpuViewerConfig {
    fn default() -> Self {
        Self {
            scale: 16.0,
            light_color: (1.0, 0.8, 0.4),
            title: "tilelight - GPU editor (ESC to exit)".to_string(),
        }
    }
}

/// Window-bound state, created once the event loop resumes
struct ViewerState {
    gpu_ctx: GpuContext,
    present: PresentPipeline,
    editor: EditorState,

    mouse_pos: Option<(f32, f32)>,
    left_mouse_down: bool,
    right_mouse_down: bool,
    last_wall_pos: Option<(usize, usize)>,
}

impl ViewerState {
    /// Mouse position in cell space. The window may have been resized, so
    /// the scale is derived from the current surface size.
    fn cursor(&self) -> Option<(f32, f32)> {
        let grid = self.editor.grid();
        let scale = (
            self.gpu_ctx.size.0 as f32 / grid.width() as f32,
            self.gpu_ctx.size.1 as f32 / grid.height() as f32,
        );
        self.mouse_pos.map(|pos| self.editor.window_to_cell(pos, scale))
    }

    fn apply_drag(&mut self) {
        let Some(cursor) = self.cursor() else {
            return;
        };

        if self.left_mouse_down {
            if let Some(cell) = self.editor.cell_at(cursor) {
                if self.last_wall_pos != Some(cell) {
                    self.editor.toggle_wall(cell.0, cell.1);
                    self.last_wall_pos = Some(cell);
                }
            }
        }

        if self.right_mouse_down {
            self.editor.move_selected(cursor);
        }
    }

    fn handle_key(&mut self, key: KeyCode, light_color: (f32, f32, f32)) {
        let palette_index = match key {
            KeyCode::KeyR => Some(0),
            KeyCode::KeyG => Some(1),
            KeyCode::KeyB => Some(2),
            KeyCode::KeyY => Some(3),
            KeyCode::KeyW => Some(4),
            _ => None,
        };
        if let Some(i) = palette_index {
            let (name, color) = LIGHT_PALETTE[i];
            if self.editor.set_selected_color(color) {
                println!("Color: {}", name);
            }
            return;
        }

        match key {
            KeyCode::KeyC => {
                self.editor.clear_walls();
                println!("Walls cleared");
            }
            KeyCode::KeyP => {
                let parallel = self.editor.toggle_parallel();
                println!("Parallel compositing: {}", if parallel { "ON" } else { "OFF" });
            }
            KeyCode::KeyS => match self.editor.save_level() {
                Ok(()) => println!("Level saved"),
                Err(e) => log::error!("Failed to save level: {}", e),
            },
            KeyCode::KeyA => {
                if let Some(cursor) = self.cursor() {
                    self.editor.add_light(cursor, light_color);
                }
            }
            KeyCode::KeyX => {
                if let Some(cursor) = self.cursor() {
                    if self.editor.remove_light_near(cursor).is_none() {
                        println!("No light under cursor");
                    }
                }
            }
            _ => {}
        }
    }

    fn update_and_render(&mut self) {
        self.apply_drag();

        let frame = self.editor.render();
        self.present.upload(&self.gpu_ctx, frame);

        match self.present.render(&self.gpu_ctx) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                self.gpu_ctx.reconfigure();
            }
            Err(e) => log::error!("Render error: {:?}", e),
        }
    }
}

/// Application handler for the winit event loop
struct GpuViewerApp {
    config: GpuViewerConfig,
    // Moved into `state` on the first resume
    pending_editor: Option<EditorState>,
    state: Option<ViewerState>,
    error: Option<ViewerError>,
}

impl GpuViewerApp {
    fn new(config: GpuViewerConfig, editor: EditorState) -> Self {
        Self {
            config,
            pending_editor: Some(editor),
            state: None,
            error: None,
        }
    }

    fn create_state(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let Some(editor) = self.pending_editor.take() else {
            return Ok(());
        };

        let (grid_w, grid_h) = (editor.grid().width(), editor.grid().height());
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                grid_w as f64 * self.config.scale,
                grid_h as f64 * self.config.scale,
            ));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let gpu_ctx = GpuContext::new(window)?;
        let present = PresentPipeline::new(&gpu_ctx);

        print_controls();
        self.state = Some(ViewerState {
            gpu_ctx,
            present,
            editor,
            mouse_pos: None,
            left_mouse_down: false,
            right_mouse_down: false,
            last_wall_pos: None,
        });
        Ok(())
    }
}

impl ApplicationHandler for GpuViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        if let Err(e) = self.create_state(event_loop) {
            log::error!("Failed to start GPU viewer: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let light_color = self.config.light_color;
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                state.gpu_ctx.resize((size.width, size.height));
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if key == KeyCode::Escape {
                    event_loop.exit();
                } else {
                    state.handle_key(key, light_color);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                state.mouse_pos = Some((position.x as f32, position.y as f32));
            }

            WindowEvent::CursorLeft { .. } => {
                state.mouse_pos = None;
            }

            WindowEvent::MouseInput { state: btn_state, button, .. } => {
                let pressed = btn_state == ElementState::Pressed;
                match button {
                    MouseButton::Left => {
                        state.left_mouse_down = pressed;
                        if !pressed {
                            state.last_wall_pos = None;
                        }
                    }
                    MouseButton::Right => {
                        if pressed && !state.right_mouse_down {
                            if let Some(cursor) = state.cursor() {
                                state.editor.select_near(cursor);
                            }
                        }
                        state.right_mouse_down = pressed;
                    }
                    _ => {}
                }
            }

            WindowEvent::RedrawRequested => state.update_and_render(),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            // Continuous redraw: lighting is recomputed every frame
            state.gpu_ctx.request_redraw();
        }
    }
}

/// Run the GPU editor until its window closes.
pub fn run_gpu_viewer(config: GpuViewerConfig, editor: EditorState) -> Result<(), ViewerError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuViewerApp::new(config, editor);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
