//! Small helpers: overlay text formatting and frame timing.

/// Number and area formatting for overlay text.
pub mod format;
/// Smoothed frame rate for debug logging.
pub mod frame_timing;
