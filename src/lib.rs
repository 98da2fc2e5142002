//! Grid line-of-sight lighting for a tile editor.
//!
//! A [`Grid`] of wall / empty cells is lit by point [`Light`]s. For every
//! empty cell the [`Compositor`] asks the visibility oracle
//! ([`is_occluded`]) whether each light can see it, sums the attenuated
//! light colors, clamps, and packs the result into a [`PixelBuffer`] of
//! RGBA8 words ready for display.

pub mod attenuation;
pub mod buffer;
pub mod color;
pub mod compositor;
pub mod gpu;
pub mod grid;
pub mod interactive;
pub mod level;
pub mod light;
pub mod render;
pub mod visibility;

#[cfg(test)]
mod tests;

// Re-export public API
pub use attenuation::{Falloff, InverseQuadratic};
pub use buffer::PixelBuffer;
pub use color::{RGBA, pack, pack_bytes, to_0rgb, unpack};
pub use compositor::{Compositor, compute_buffer};
pub use grid::{CellKind, Grid, GridError};
pub use interactive::{EditorState, GpuViewerConfig, InteractiveViewer, ViewerConfig, ViewerError, run_gpu_viewer};
pub use level::{LevelError, load_level, parse_level, save_level};
pub use light::{Light, LightId, LightParseError, LightRegistry};
pub use render::{blit_scaled, buffer_to_string, mark_lights, save_ppm};
pub use visibility::{Traversal, is_occluded};
