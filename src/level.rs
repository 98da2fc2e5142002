//! Text level loader.
//!
//! One line per row, one character per cell: `#` is a wall, anything else
//! is empty. Every row must have the same length.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::grid::{CellKind, Grid, GridError};

/// Character marking a wall cell
pub const WALL_CHAR: char = '#';

/// Built-in level used when no level file is given
pub const SAMPLE_LEVEL: &str = "\
########################################
#......................................#
#......................................#
#.....######...............#####.......#
#.....#....................#...#.......#
#.....#....................#...........#
#.....#.........#..........#...#.......#
#...............#..........#####.......#
#...............#......................#
#.........#######......................#
#......................................#
#......................................#
#.............................#........#
#.....##......................#........#
#.....##.................######........#
#......................................#
#......................................#
#...........#.#.#.#....................#
#......................................#
#......................................#
#......................................#
#......................................#
#......................................#
########################################
";

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("level is empty")]
    Empty,
    #[error("row {row} has length {found}, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Parse a level from text.
pub fn parse_level(text: &str) -> Result<Grid, LevelError> {
    let rows: Vec<&str> = text.lines().map(|line| line.trim_end_matches('\r')).collect();

    let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
    if width == 0 {
        return Err(LevelError::Empty);
    }

    let mut cells = Vec::with_capacity(width * rows.len());
    for (row, line) in rows.iter().enumerate() {
        let found = line.chars().count();
        if found != width {
            return Err(LevelError::RaggedRow { row, expected: width, found });
        }
        cells.extend(line.chars().map(|c| if c == WALL_CHAR { CellKind::Wall } else { CellKind::Empty }));
    }

    Ok(Grid::from_cells(width, rows.len(), cells)?)
}

/// Read and parse a level file.
pub fn load_level(path: impl AsRef<Path>) -> Result<Grid, LevelError> {
    let path = path.as_ref();
    let grid = parse_level(&fs::read_to_string(path)?)?;
    log::info!(
        "Loaded level {}: {}x{}, {} walls",
        path.display(),
        grid.width(),
        grid.height(),
        grid.wall_count()
    );
    Ok(grid)
}

/// Write a grid back out in the level format.
pub fn save_level(grid: &Grid, path: impl AsRef<Path>) -> Result<(), LevelError> {
    let path = path.as_ref();
    fs::write(path, grid.to_level_string())?;
    log::info!("Saved level {}", path.display());
    Ok(())
}
