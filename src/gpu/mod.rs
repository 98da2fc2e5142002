//! GPU presentation using wgpu
//!
//! The lighting itself is computed on the CPU; the GPU only scales the
//! packed buffer up to the window.

pub mod context;
pub mod present;

pub use context::{GpuContext, GpuError};
pub use present::PresentPipeline;
