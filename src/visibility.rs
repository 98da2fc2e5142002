//! Grid visibility oracle.
//!
//! Line of sight between two cells is decided by walking the straight line
//! between their centers with the Amanatides & Woo (1987) voxel traversal.
//! Cell `(x, y)` is the unit square centered on `(x, y)`, so the line
//! leaves a cell at the half-integer boundaries `x ± 0.5` / `y ± 0.5`.
//! Every cell whose interior the line crosses is visited exactly once.

use crate::grid::{CellKind, Grid};

/// Direction components smaller than this are clamped to it (keeping the
/// sign) so the per-axis reciprocal stays finite.
pub const DIRECTION_EPSILON: f32 = 1e-4;

/// Iterator over the cells entered on the way from `start` to `end`.
///
/// `start` itself is not yielded; the last item is `end`. Coordinates are
/// signed because nothing stops a caller from building a traversal whose
/// line leaves the grid.
#[derive(Debug, Clone)]
pub struct Traversal {
    current: (i64, i64),
    end: (i64, i64),
    step: (i64, i64),
    // t(b) = b * coeff + bias for a boundary coordinate b, i.e. (b - start) / d
    coeff: (f32, f32),
    bias: (f32, f32),
    remaining: u64,
}

impl Traversal {
    pub fn new(start: (usize, usize), end: (usize, usize)) -> Self {
        let start_i = (start.0 as i64, start.1 as i64);
        let end_i = (end.0 as i64, end.1 as i64);

        let diff_x = end.0 as f32 - start.0 as f32;
        let diff_y = end.1 as f32 - start.1 as f32;
        let length = (diff_x * diff_x + diff_y * diff_y).sqrt();

        let (dx, dy) = if length > 0.0 {
            (clamp_axis(diff_x / length), clamp_axis(diff_y / length))
        } else {
            (DIRECTION_EPSILON, DIRECTION_EPSILON)
        };

        let coeff = (1.0 / dx, 1.0 / dy);
        let bias = (-(start.0 as f32 * coeff.0), -(start.1 as f32 * coeff.1));
        let step = (if dx > 0.0 { 1 } else { -1 }, if dy > 0.0 { 1 } else { -1 });

        // Each step moves one axis one cell towards `end`
        let remaining = start_i.0.abs_diff(end_i.0) + start_i.1.abs_diff(end_i.1);

        Traversal {
            current: start_i,
            end: end_i,
            step,
            coeff,
            bias,
            remaining,
        }
    }

    pub fn reached_end(&self) -> bool {
        self.current == self.end
    }
}

impl Iterator for Traversal {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.reached_end() || self.remaining == 0 {
            return None;
        }

        // Boundaries shared with the next cell on each axis
        let edge_x = self.current.0 as f32 + 0.5 * self.step.0 as f32;
        let edge_y = self.current.1 as f32 + 0.5 * self.step.1 as f32;

        let tx = edge_x * self.coeff.0 + self.bias.0;
        let ty = edge_y * self.coeff.1 + self.bias.1;

        // Ties (the line passes through a corner) go to x
        if tx <= ty {
            self.current.0 += self.step.0;
        } else {
            self.current.1 += self.step.1;
        }
        self.remaining -= 1;

        Some(self.current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, usize::try_from(self.remaining).ok())
    }
}

/// Clamp a near-zero direction component to the epsilon, keeping its sign.
#[inline]
fn clamp_axis(d: f32) -> f32 {
    if d.abs() < DIRECTION_EPSILON {
        DIRECTION_EPSILON.copysign(d)
    } else {
        d
    }
}

#[inline]
fn cell_at(grid: &Grid, x: i64, y: i64) -> Option<CellKind> {
    let x = usize::try_from(x).ok()?;
    let y = usize::try_from(y).ok()?;
    grid.get(x, y)
}

/// Whether any wall lies on the straight path from `start` to `end`.
///
/// A light inside a wall sees nothing, and a cell always sees itself. The
/// end cell counts as part of the path, so a wall target is occluded.
/// Endpoints are expected to be inside the grid; if a step would leave it
/// the path is reported as occluded rather than read out of bounds.
pub fn is_occluded(grid: &Grid, start: (usize, usize), end: (usize, usize)) -> bool {
    match grid.get(start.0, start.1) {
        Some(CellKind::Empty) => {}
        Some(CellKind::Wall) | None => return true,
    }
    if start == end {
        return false;
    }

    let mut traversal = Traversal::new(start, end);
    while let Some((x, y)) = traversal.next() {
        if cell_at(grid, x, y) != Some(CellKind::Empty) {
            return true;
        }
    }

    !traversal.reached_end()
}
