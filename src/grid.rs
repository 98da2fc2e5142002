//! Occlusion grid: a rectangular array of wall / empty cells.
//!
//! Cells are stored row-major. All access goes through [`Grid::index`], so
//! out-of-range coordinates come back as `None` instead of aliasing into a
//! neighbouring row.

use thiserror::Error;

/// Kind of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
}

impl CellKind {
    pub fn is_wall(self) -> bool {
        self == CellKind::Wall
    }

    /// The other kind (used by wall toggling in the editor)
    pub fn toggled(self) -> Self {
        match self {
            CellKind::Empty => CellKind::Wall,
            CellKind::Wall => CellKind::Empty,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must have positive dimensions, got {width}x{height}")]
    ZeroSized { width: usize, height: usize },
    #[error("expected {expected} cells for the grid, got {found}")]
    CellCount { expected: usize, found: usize },
}

/// Rectangular cell grid, row-major (`index = y * width + x`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
}

impl Grid {
    /// Create an all-empty grid.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        Self::from_cells(width, height, vec![CellKind::Empty; width * height])
    }

    /// Create a grid from row-major cells.
    pub fn from_cells(width: usize, height: usize, cells: Vec<CellKind>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroSized { width, height });
        }
        if cells.len() != width * height {
            return Err(GridError::CellCount {
                expected: width * height,
                found: cells.len(),
            });
        }
        Ok(Grid { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Row-major index of `(x, y)`, or `None` outside the grid
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        self.contains(x, y).then(|| y * self.width + x)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<CellKind> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// `true` only for in-grid wall cells
    #[inline]
    pub fn is_wall(&self, x: usize, y: usize) -> bool {
        matches!(self.get(x, y), Some(CellKind::Wall))
    }

    /// Set a single cell. Returns `false` if `(x, y)` is outside the grid.
    pub fn set(&mut self, x: usize, y: usize, kind: CellKind) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = kind;
                true
            }
            None => false,
        }
    }

    /// Flip a cell between wall and empty, returning the new kind.
    pub fn toggle(&mut self, x: usize, y: usize) -> Option<CellKind> {
        let i = self.index(x, y)?;
        self.cells[i] = self.cells[i].toggled();
        Some(self.cells[i])
    }

    pub fn clear_walls(&mut self) {
        self.cells.fill(CellKind::Empty);
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall()).count()
    }

    /// One row of cells
    pub fn row(&self, y: usize) -> &[CellKind] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// Serialize in the level text format (`#` wall, `.` empty).
    pub fn to_level_string(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for cell in self.row(y) {
                out.push(if cell.is_wall() { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_dimensions() {
        assert_eq!(Grid::new(0, 3), Err(GridError::ZeroSized { width: 0, height: 3 }));
        assert_eq!(
            Grid::from_cells(2, 2, vec![CellKind::Empty; 3]),
            Err(GridError::CellCount { expected: 4, found: 3 })
        );
    }

    #[test]
    fn test_index_is_row_major_and_bounded() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(3, 0), Some(3));
        assert_eq!(grid.index(0, 1), Some(4));
        assert_eq!(grid.index(3, 2), Some(11));
        // x past the edge must not wrap into the next row
        assert_eq!(grid.index(4, 0), None);
        assert_eq!(grid.index(0, 3), None);
        assert_eq!(grid.get(9, 9), None);
        assert!(!grid.is_wall(9, 9));
    }

    #[test]
    fn test_set_toggle_and_clear() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert!(grid.set(1, 1, CellKind::Wall));
        assert!(!grid.set(3, 1, CellKind::Wall));
        assert!(grid.is_wall(1, 1));

        assert_eq!(grid.toggle(1, 1), Some(CellKind::Empty));
        assert_eq!(grid.toggle(0, 2), Some(CellKind::Wall));
        assert_eq!(grid.toggle(5, 5), None);
        assert_eq!(grid.wall_count(), 1);

        grid.clear_walls();
        assert_eq!(grid.wall_count(), 0);
    }

    #[test]
    fn test_level_string() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(0, 0, CellKind::Wall);
        grid.set(2, 1, CellKind::Wall);
        assert_eq!(grid.to_level_string(), "#..\n..#\n");
    }
}
