//! The seam between the animation engine and whatever draws the points.

use crate::animation::{FrameUniforms, PointVertex};
use crate::error::GridmorphError;

/// A point renderer.
///
/// Point attributes change only when a transition begins, so `upload` is
/// called once per transition while `draw` runs every frame with a fresh
/// uniform block. Implementations keep their buffers across uploads and
/// overwrite them in place.
pub trait PointSink {
    /// Replace the point attributes.
    fn upload(&mut self, vertices: &[PointVertex]);

    /// Clear to `clear` and draw every uploaded point for this frame.
    ///
    /// # Errors
    ///
    /// Returns [`GridmorphError::ContextLost`] when the device is gone, or
    /// another error if the frame could not be presented.
    fn draw(
        &mut self,
        uniforms: &FrameUniforms,
        clear: [f32; 4],
    ) -> Result<(), GridmorphError>;

    /// The render target changed size.
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// Whether the underlying context is gone and must be rebuilt.
    fn is_lost(&self) -> bool {
        false
    }
}
