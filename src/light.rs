//! Point lights and the ordered registry the editor mutates between frames.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::grid::Grid;

/// A colored point light.
///
/// `position` is in cell space: the center of cell `(x, y)` is the point
/// `(x, y)`, so fractional offsets place the light inside a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: (f32, f32),
    pub color: (f32, f32, f32), // RGB 0.0-1.0
}

impl Light {
    pub fn new(position: (f32, f32), color: (f32, f32, f32)) -> Self {
        Light { position, color }
    }

    pub fn white(position: (f32, f32)) -> Self {
        Light::new(position, (1.0, 1.0, 1.0))
    }

    /// Cell containing the light, if it lies inside `grid`.
    ///
    /// Cell `(x, y)` covers `[x - 0.5, x + 0.5)` on each axis.
    pub fn cell(&self, grid: &Grid) -> Option<(usize, usize)> {
        let (px, py) = ((self.position.0 + 0.5).floor(), (self.position.1 + 0.5).floor());
        if !(px >= 0.0 && py >= 0.0) {
            return None;
        }
        let (x, y) = (px as usize, py as usize);
        grid.contains(x, y).then_some((x, y))
    }

    /// Euclidean distance from the light to the center of cell `(x, y)`
    #[inline]
    pub fn distance_to(&self, x: usize, y: usize) -> f32 {
        let dx = x as f32 - self.position.0;
        let dy = y as f32 - self.position.1;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LightParseError {
    #[error("expected `x,y` or `x,y,r,g,b`, got {0} fields")]
    FieldCount(usize),
    #[error("invalid number `{0}`")]
    Number(String),
    #[error("color channel {0} is outside 0..=1")]
    Channel(String),
}

/// Parses `x,y` (white light) or `x,y,r,g,b`.
impl FromStr for Light {
    type Err = LightParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s
            .split(',')
            .map(|f| {
                let f = f.trim();
                f.parse::<f32>().map_err(|_| LightParseError::Number(f.to_string()))
            })
            .collect::<Result<Vec<f32>, _>>()?;

        match fields.as_slice() {
            &[x, y] => Ok(Light::white((x, y))),
            &[x, y, r, g, b] => {
                for c in [r, g, b] {
                    if !(0.0..=1.0).contains(&c) {
                        return Err(LightParseError::Channel(c.to_string()));
                    }
                }
                Ok(Light::new((x, y), (r, g, b)))
            }
            other => Err(LightParseError::FieldCount(other.len())),
        }
    }
}

/// Stable handle to a light in a [`LightRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LightId(u32);

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "light#{}", self.0)
    }
}

/// Insertion-ordered collection of lights.
///
/// Removing a light keeps the relative order of the others; ids are never
/// reused.
#[derive(Debug, Clone, Default)]
pub struct LightRegistry {
    entries: Vec<(LightId, Light)>,
    next_id: u32,
}

impl LightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, light: Light) -> LightId {
        let id = LightId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, light));
        id
    }

    pub fn remove(&mut self, id: LightId) -> Option<Light> {
        let pos = self.position_of(id)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn get(&self, id: LightId) -> Option<&Light> {
        self.entries.iter().find(|(i, _)| *i == id).map(|(_, l)| l)
    }

    pub fn get_mut(&mut self, id: LightId) -> Option<&mut Light> {
        self.entries.iter_mut().find(|(i, _)| *i == id).map(|(_, l)| l)
    }

    /// Move a light. Returns `false` for an unknown id.
    pub fn set_position(&mut self, id: LightId, position: (f32, f32)) -> bool {
        self.get_mut(id).map(|l| l.position = position).is_some()
    }

    pub fn set_color(&mut self, id: LightId, color: (f32, f32, f32)) -> bool {
        self.get_mut(id).map(|l| l.color = color).is_some()
    }

    /// Lights in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.entries.iter().map(|(_, l)| l)
    }

    pub fn iter_with_ids(&self) -> impl Iterator<Item = (LightId, &Light)> {
        self.entries.iter().map(|(id, l)| (*id, l))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Closest light to `point` within `radius` (cell units).
    pub fn nearest(&self, point: (f32, f32), radius: f32) -> Option<LightId> {
        self.entries
            .iter()
            .map(|(id, l)| {
                let dx = l.position.0 - point.0;
                let dy = l.position.1 - point.1;
                (*id, dx * dx + dy * dy)
            })
            .filter(|&(_, d2)| d2 <= radius * radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    fn position_of(&self, id: LightId) -> Option<usize> {
        self.entries.iter().position(|(i, _)| *i == id)
    }
}

impl FromIterator<Light> for LightRegistry {
    fn from_iter<T: IntoIterator<Item = Light>>(iter: T) -> Self {
        let mut registry = LightRegistry::new();
        for light in iter {
            registry.add(light);
        }
        registry
    }
}
