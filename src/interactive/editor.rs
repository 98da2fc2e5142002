//! Editor state shared by the minifb and wgpu front-ends.
//!
//! Owns the grid, the light registry and the output buffer. Input handlers
//! mutate it between frames; `render` takes the snapshot for a pass.

use std::path::PathBuf;

use crate::buffer::PixelBuffer;
use crate::color::LIGHT_MARKER;
use crate::compositor::Compositor;
use crate::grid::{CellKind, Grid};
use crate::level::{LevelError, save_level};
use crate::light::{Light, LightId, LightRegistry};
use crate::render::mark_lights;

/// How close (in cells) a click must be to grab a light
pub const HIT_RADIUS: f32 = 1.5;

/// Colors bound to the R/G/B/Y/W keys
pub const LIGHT_PALETTE: [(&str, (f32, f32, f32)); 5] = [
    ("Red", (1.0, 0.0, 0.0)),
    ("Green", (0.0, 1.0, 0.0)),
    ("Blue", (0.0, 0.0, 1.0)),
    ("Yellow", (1.0, 1.0, 0.0)),
    ("White", (1.0, 1.0, 1.0)),
];

pub struct EditorState {
    grid: Grid,
    lights: LightRegistry,
    compositor: Compositor,
    buffer: PixelBuffer,
    selected: Option<LightId>,
    level_path: PathBuf,
}

impl EditorState {
    pub fn new(grid: Grid, lights: LightRegistry, compositor: Compositor) -> Self {
        let buffer = PixelBuffer::new(grid.width(), grid.height());
        let selected = lights.iter_with_ids().next().map(|(id, _)| id);
        EditorState {
            grid,
            lights,
            compositor,
            buffer,
            selected,
            level_path: PathBuf::from("level.txt"),
        }
    }

    /// Where `save_level` writes to
    pub fn with_level_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.level_path = path.into();
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn lights(&self) -> &LightRegistry {
        &self.lights
    }

    pub fn selected(&self) -> Option<LightId> {
        self.selected
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Cell-space position of a window pixel, given the window's pixels
    /// per cell on each axis. Cell centers sit on integer coordinates.
    pub fn window_to_cell(&self, pos: (f32, f32), scale: (f32, f32)) -> (f32, f32) {
        (pos.0 / scale.0 - 0.5, pos.1 / scale.1 - 0.5)
    }

    /// Grid cell under a cell-space point, if any
    pub fn cell_at(&self, point: (f32, f32)) -> Option<(usize, usize)> {
        Light::white(point).cell(&self.grid)
    }

    pub fn toggle_wall(&mut self, x: usize, y: usize) -> Option<CellKind> {
        let kind = self.grid.toggle(x, y)?;
        log::debug!("Cell ({}, {}) is now {:?}", x, y, kind);
        Some(kind)
    }

    pub fn clear_walls(&mut self) {
        self.grid.clear_walls();
        log::info!("Walls cleared");
    }

    /// Add a light and select it.
    pub fn add_light(&mut self, position: (f32, f32), color: (f32, f32, f32)) -> LightId {
        let id = self.lights.add(Light::new(position, color));
        self.selected = Some(id);
        log::info!("Added {} at ({:.1}, {:.1}), {} lights", id, position.0, position.1, self.lights.len());
        id
    }

    /// Remove the light nearest to `point`, if one is within `HIT_RADIUS`.
    pub fn remove_light_near(&mut self, point: (f32, f32)) -> Option<Light> {
        let id = self.lights.nearest(point, HIT_RADIUS)?;
        let light = self.lights.remove(id)?;
        if self.selected == Some(id) {
            self.selected = self.lights.iter_with_ids().last().map(|(id, _)| id);
        }
        log::info!("Removed {}, {} lights left", id, self.lights.len());
        Some(light)
    }

    /// Select the light nearest to `point`, keeping the current selection
    /// when nothing is in reach.
    pub fn select_near(&mut self, point: (f32, f32)) -> Option<LightId> {
        if let Some(id) = self.lights.nearest(point, HIT_RADIUS) {
            self.selected = Some(id);
        }
        self.selected
    }

    pub fn move_selected(&mut self, position: (f32, f32)) -> bool {
        match self.selected {
            Some(id) => self.lights.set_position(id, position),
            None => false,
        }
    }

    pub fn set_selected_color(&mut self, color: (f32, f32, f32)) -> bool {
        match self.selected {
            Some(id) => self.lights.set_color(id, color),
            None => false,
        }
    }

    /// Flip between sequential and rayon compositing, returning the new mode.
    pub fn toggle_parallel(&mut self) -> bool {
        self.compositor.parallel = !self.compositor.parallel;
        self.compositor.parallel
    }

    /// Recompute the lighting and mark the lights.
    pub fn render(&mut self) -> &PixelBuffer {
        self.compositor.compute_into(&self.grid, &self.lights, &mut self.buffer);
        mark_lights(&mut self.buffer, &self.grid, &self.lights, LIGHT_MARKER);
        &self.buffer
    }

    pub fn save_level(&self) -> Result<(), LevelError> {
        save_level(&self.grid, &self.level_path)
    }
}
