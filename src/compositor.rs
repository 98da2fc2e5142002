//! Illumination compositor: per-cell multi-light accumulation.
//!
//! Every empty cell asks the visibility oracle whether each light can see
//! it, sums the attenuated colors of the visible ones, clamps and packs.
//! Walls are drawn flat. There is no caching between passes; each call is a
//! pure function of the grid and the light snapshot.

use rayon::prelude::*;

use crate::attenuation::{Falloff, InverseQuadratic};
use crate::buffer::PixelBuffer;
use crate::color::{RGBA, WALL_COLOR};
use crate::grid::Grid;
use crate::light::{Light, LightRegistry};
use crate::visibility::is_occluded;

/// Computes packed lighting buffers for a grid.
#[derive(Debug, Clone)]
pub struct Compositor<F = InverseQuadratic> {
    pub falloff: F,
    /// Packed color written for wall cells
    pub wall_color: u32,
    /// Compute rows on the rayon pool. Output is identical either way.
    pub parallel: bool,
}

impl Default for Compositor<InverseQuadratic> {
    fn default() -> Self {
        Compositor::with_falloff(InverseQuadratic::default())
    }
}

impl Compositor<InverseQuadratic> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: Falloff + Sync> Compositor<F> {
    pub fn with_falloff(falloff: F) -> Self {
        Compositor {
            falloff,
            wall_color: WALL_COLOR,
            parallel: false,
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Compute a fresh buffer for `grid` lit by `lights`.
    pub fn compute(&self, grid: &Grid, lights: &LightRegistry) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(grid.width(), grid.height());
        self.compute_into(grid, lights, &mut buffer);
        buffer
    }

    /// Overwrite `buffer` with the lighting for `grid`, resizing it first if
    /// the grid dimensions changed.
    pub fn compute_into(&self, grid: &Grid, lights: &LightRegistry, buffer: &mut PixelBuffer) {
        buffer.resize(grid.width(), grid.height());

        // Lights outside the grid have no cell to trace from
        let sources: Vec<((usize, usize), &Light)> = lights
            .iter()
            .filter_map(|light| match light.cell(grid) {
                Some(cell) => Some((cell, light)),
                None => {
                    log::trace!("Skipping light at {:?}: outside grid", light.position);
                    None
                }
            })
            .collect();

        log::trace!(
            "Compositing {}x{} grid with {} of {} lights (parallel: {})",
            grid.width(),
            grid.height(),
            sources.len(),
            lights.len(),
            self.parallel
        );

        let width = grid.width();
        let shade_row = |(y, row): (usize, &mut [u32])| {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = self.shade_cell(grid, &sources, x, y);
            }
        };

        if self.parallel {
            buffer.pixels_mut().par_chunks_mut(width).enumerate().for_each(shade_row);
        } else {
            buffer.pixels_mut().chunks_mut(width).enumerate().for_each(shade_row);
        }
    }

    /// Packed color of a single cell
    fn shade_cell(&self, grid: &Grid, sources: &[((usize, usize), &Light)], x: usize, y: usize) -> u32 {
        if grid.is_wall(x, y) {
            return self.wall_color;
        }

        let mut color = RGBA::black();
        for &(cell, light) in sources {
            if is_occluded(grid, cell, (x, y)) {
                continue;
            }
            let att = self.falloff.attenuate(light.distance_to(x, y));
            color.accumulate(light.color, att);
        }

        color.clamped().pack()
    }
}

/// Compute a lighting buffer with the default compositor (`a = b = 0.1`).
pub fn compute_buffer(grid: &Grid, lights: &LightRegistry) -> PixelBuffer {
    Compositor::new().compute(grid, lights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{OPAQUE_BLACK, unpack};
    use crate::grid::CellKind;

    #[test]
    fn test_no_lights_is_black() {
        let mut grid = Grid::new(4, 3).unwrap();
        grid.set(1, 1, CellKind::Wall);
        let buffer = compute_buffer(&grid, &LightRegistry::new());

        for y in 0..3 {
            for x in 0..4 {
                let expected = if (x, y) == (1, 1) { WALL_COLOR } else { OPAQUE_BLACK };
                assert_eq!(buffer.get(x, y), Some(expected), "cell ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_walls_are_flat() {
        let mut grid = Grid::new(3, 1).unwrap();
        grid.set(1, 0, CellKind::Wall);
        let lights: LightRegistry = [Light::white((0.0, 0.0))].into_iter().collect();

        let compositor = Compositor {
            wall_color: 0x1234_5678,
            ..Compositor::new()
        };
        let buffer = compositor.compute(&grid, &lights);
        assert_eq!(buffer.get(1, 0), Some(0x1234_5678));
        // Behind the wall
        assert_eq!(buffer.get(2, 0), Some(OPAQUE_BLACK));
    }

    #[test]
    fn test_light_outside_grid_contributes_nothing() {
        let grid = Grid::new(3, 3).unwrap();
        let lights: LightRegistry = [Light::white((10.0, 1.0)), Light::white((-3.0, -3.0))]
            .into_iter()
            .collect();
        let buffer = compute_buffer(&grid, &lights);
        assert!(buffer.pixels().iter().all(|&p| p == OPAQUE_BLACK));
    }

    #[test]
    fn test_fractional_position_distance() {
        // Light half a cell right of (0,0): both (0,0) and (1,0) are 0.5 away
        let grid = Grid::new(2, 1).unwrap();
        let lights: LightRegistry = [Light::new((0.5, 0.0), (1.0, 0.0, 0.0))].into_iter().collect();
        let buffer = compute_buffer(&grid, &lights);

        // 1 / (1 + 0.05 + 0.025) = 0.9302 -> 237
        assert_eq!(buffer.rgba(0, 0), Some([237, 0, 0, 255]));
        assert_eq!(buffer.rgba(1, 0), Some([237, 0, 0, 255]));
    }

    #[test]
    fn test_custom_falloff() {
        struct Flat;
        impl Falloff for Flat {
            fn attenuate(&self, _distance: f32) -> f32 {
                0.5
            }
        }

        let grid = Grid::new(5, 1).unwrap();
        let lights: LightRegistry = [Light::white((0.0, 0.0))].into_iter().collect();
        let buffer = Compositor::with_falloff(Flat).compute(&grid, &lights);
        for x in 0..5 {
            assert_eq!(unpack(buffer.get(x, 0).unwrap()), [127, 127, 127, 255]);
        }
    }

    #[test]
    fn test_compute_into_resizes() {
        let grid = Grid::new(3, 2).unwrap();
        let mut buffer = PixelBuffer::new(1, 1);
        Compositor::new().compute_into(&grid, &LightRegistry::new(), &mut buffer);
        assert_eq!((buffer.width(), buffer.height()), (3, 2));
    }
}
