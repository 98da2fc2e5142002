//! Interactive tile editor: toggle walls and move lights while the lighting
//! is recomputed every frame.

mod editor;
pub mod gpu_viewer;
mod viewer;

use thiserror::Error;

pub use editor::{EditorState, HIT_RADIUS, LIGHT_PALETTE};
pub use gpu_viewer::{GpuViewerConfig, run_gpu_viewer};
pub use viewer::{InteractiveViewer, ViewerConfig};

use crate::gpu::GpuError;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("window error: {0}")]
    Window(#[from] minifb::Error),
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Os(#[from] winit::error::OsError),
    #[error(transparent)]
    Gpu(#[from] GpuError),
}
