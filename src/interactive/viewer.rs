//! Interactive tile editor in a minifb window

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use super::ViewerError;
use super::editor::{EditorState, LIGHT_PALETTE};
use crate::color::to_0rgb;
use crate::render::blit_scaled;

/// Configuration for the interactive viewer
#[derive(Clone)]
pub struct ViewerConfig {
    /// Pixel scale factor (each cell = scale x scale pixels)
    pub scale: usize,
    /// Frame rate cap
    pub target_fps: usize,
    /// Color of lights added with `A`
    pub light_color: (f32, f32, f32),
    pub title: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scale: 16,
            target_fps: 60,
            light_color: (1.0, 0.8, 0.4), // Warm torch color
            title: "tilelight - editor (ESC to exit)".to_string(),
        }
    }
}

const KEY_COLORS: [Key; 5] = [Key::R, Key::G, Key::B, Key::Y, Key::W];

pub struct InteractiveViewer {
    config: ViewerConfig,
    editor: EditorState,
    window: Window,
    buffer: Vec<u32>,
    // Last cell toggled during the current left drag
    last_wall_pos: Option<(usize, usize)>,
    right_was_down: bool,
}

impl InteractiveViewer {
    pub fn new(config: ViewerConfig, editor: EditorState) -> Result<Self, ViewerError> {
        let scale = config.scale.max(1);
        let window_w = editor.grid().width() * scale;
        let window_h = editor.grid().height() * scale;

        let window = Window::new(
            &config.title,
            window_w,
            window_h,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        Ok(Self {
            config: ViewerConfig { scale, ..config },
            editor,
            window,
            buffer: vec![0u32; window_w * window_h],
            last_wall_pos: None,
            right_was_down: false,
        })
    }

    /// Run until the window closes or ESC is pressed.
    pub fn run(&mut self) -> Result<(), ViewerError> {
        let scale = self.config.scale;
        let (window_w, window_h) = (self.editor.grid().width() * scale, self.editor.grid().height() * scale);

        self.window.set_target_fps(self.config.target_fps);
        print_controls();

        while self.window.is_open() && !self.window.is_key_down(Key::Escape) {
            self.handle_keys();
            self.handle_mouse();

            let frame = self.editor.render();
            blit_scaled(frame, scale, &mut self.buffer, to_0rgb);

            self.window.update_with_buffer(&self.buffer, window_w, window_h)?;
        }

        Ok(())
    }

    fn cursor(&self) -> Option<(f32, f32)> {
        let scale = self.config.scale as f32;
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|pos| self.editor.window_to_cell(pos, (scale, scale)))
    }

    fn handle_keys(&mut self) {
        for (key, (name, color)) in KEY_COLORS.iter().zip(LIGHT_PALETTE) {
            if self.window.is_key_pressed(*key, KeyRepeat::No) && self.editor.set_selected_color(color) {
                println!("Color: {}", name);
            }
        }

        if self.window.is_key_pressed(Key::C, KeyRepeat::No) {
            self.editor.clear_walls();
            println!("Walls cleared");
        }

        if self.window.is_key_pressed(Key::P, KeyRepeat::No) {
            let parallel = self.editor.toggle_parallel();
            println!("Parallel compositing: {}", if parallel { "ON" } else { "OFF" });
        }

        if self.window.is_key_pressed(Key::S, KeyRepeat::No) {
            match self.editor.save_level() {
                Ok(()) => println!("Level saved"),
                Err(e) => log::error!("Failed to save level: {}", e),
            }
        }

        if let Some(cursor) = self.cursor() {
            if self.window.is_key_pressed(Key::A, KeyRepeat::No) {
                self.editor.add_light(cursor, self.config.light_color);
            }
            if self.window.is_key_pressed(Key::X, KeyRepeat::No) && self.editor.remove_light_near(cursor).is_none() {
                println!("No light under cursor");
            }
        }
    }

    fn handle_mouse(&mut self) {
        let Some(cursor) = self.cursor() else {
            return;
        };

        // Toggle each cell once per drag
        if self.window.get_mouse_down(MouseButton::Left) {
            if let Some(cell) = self.editor.cell_at(cursor) {
                if self.last_wall_pos != Some(cell) {
                    self.editor.toggle_wall(cell.0, cell.1);
                    self.last_wall_pos = Some(cell);
                }
            }
        } else {
            self.last_wall_pos = None;
        }

        // Right press grabs the nearest light, right drag moves the selection
        let right_down = self.window.get_mouse_down(MouseButton::Right);
        if right_down {
            if !self.right_was_down {
                self.editor.select_near(cursor);
            }
            self.editor.move_selected(cursor);
        }
        self.right_was_down = right_down;
    }
}

pub(super) fn print_controls() {
    println!("=== tilelight editor ===");
    println!("Controls:");
    println!("  Left Click  - Toggle wall");
    println!("  Right Drag  - Grab and move a light");
    println!("  A / X       - Add light at cursor / remove light under cursor");
    println!("  R/G/B/Y/W   - Color of selected light: Red/Green/Blue/Yellow/White");
    println!("  C           - Clear walls");
    println!("  P           - Toggle parallel compositing");
    println!("  S           - Save level");
    println!("  ESC         - Exit");
    println!();
}
