//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the gridmorph crate.
#[derive(Debug)]
pub enum GridmorphError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Options are inconsistent or incomplete.
    Config(ConfigError),
    /// Failed to read or parse point records.
    DataLoad(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
    /// Surface frame acquisition failed in a way a resize cannot fix.
    Surface(wgpu::SurfaceError),
    /// The GPU device or surface was lost and must be rebuilt before the
    /// next frame can be drawn.
    ContextLost,
}

impl fmt::Display for GridmorphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::DataLoad(msg) => write!(f, "data load error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::Surface(e) => write!(f, "surface error: {e}"),
            Self::ContextLost => write!(f, "render context lost"),
        }
    }
}

impl std::error::Error for GridmorphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Surface(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for GridmorphError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<ConfigError> for GridmorphError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<wgpu::SurfaceError> for GridmorphError {
    fn from(e: wgpu::SurfaceError) -> Self {
        Self::Surface(e)
    }
}

impl From<std::io::Error> for GridmorphError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Setup-time validation failures. Raised before the first transition so a
/// bad configuration never reaches the screen half-rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No point records were supplied.
    MissingData,
    /// `colors` and `thresholds` must pair up one-to-one.
    ColorThresholdMismatch {
        /// Number of configured colors.
        colors: usize,
        /// Number of configured thresholds.
        thresholds: usize,
    },
    /// At least one threshold is required.
    EmptyThresholds,
    /// Thresholds must be finite and strictly increasing.
    ThresholdsNotAscending {
        /// Index of the first offending threshold.
        index: usize,
    },
    /// A color string could not be parsed.
    InvalidColor(String),
    /// The layout sequence has no cycling layouts.
    EmptySequence,
    /// `num_points` is zero or exceeds the number of records.
    PointCount {
        /// Requested point count.
        requested: usize,
        /// Records available.
        available: usize,
    },
    /// A timing value is negative or not finite.
    InvalidTiming(&'static str),
    /// Width or height is not positive.
    InvalidStage {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// Point width is not positive or point margin is negative.
    InvalidPointSize {
        /// Configured point width.
        width: f32,
        /// Configured gap between points.
        margin: f32,
    },
    /// The shape layout was requested without shape data.
    MissingShape,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingData => write!(f, "no point data supplied"),
            Self::ColorThresholdMismatch { colors, thresholds } => write!(
                f,
                "{colors} colors configured for {thresholds} thresholds"
            ),
            Self::EmptyThresholds => write!(f, "threshold list is empty"),
            Self::ThresholdsNotAscending { index } => write!(
                f,
                "threshold {index} is not finite or not greater than the \
                 previous one"
            ),
            Self::InvalidColor(c) => write!(f, "unparsable color {c:?}"),
            Self::EmptySequence => {
                write!(f, "layout sequence has no cycling layouts")
            }
            Self::PointCount {
                requested,
                available,
            } => write!(
                f,
                "cannot animate {requested} points from {available} records"
            ),
            Self::InvalidTiming(field) => {
                write!(f, "{field} must be finite and non-negative")
            }
            Self::InvalidStage { width, height } => {
                write!(f, "stage size {width}x{height} is not positive")
            }
            Self::InvalidPointSize { width, margin } => write!(
                f,
                "point width {width} must be positive and margin {margin} \
                 non-negative"
            ),
            Self::MissingShape => {
                write!(f, "shape layout requested without shape data")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
