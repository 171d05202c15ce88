//! GPU resource management and the point draw pass.
//!
//! Provides wgpu device/surface initialization, growable buffers, and the
//! [`PointSink`](sink::PointSink) seam the engine draws through.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Point pipeline and the wgpu-backed point sink.
pub mod point_pass;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// The point renderer trait.
pub mod sink;

pub use point_pass::GpuPointRenderer;
pub use sink::PointSink;
