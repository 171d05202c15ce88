use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How record coordinates are mapped onto the stage by the map layout.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Independent min–max linear scale per axis (projected grid
    /// coordinates, e.g. kilometres in an equal-area CRS).
    #[default]
    Linear,
    /// Records are longitude/latitude degrees; Web Mercator fitted to the
    /// padded stage with a uniform scale.
    Mercator,
}

/// Drawing surface geometry and point appearance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Stage", inline)]
#[serde(default)]
pub struct StageOptions {
    /// Stage width in pixels. `None` follows the render target.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Width")]
    pub width: Option<f32>,
    /// Stage height in pixels. `None` follows the render target.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Height")]
    pub height: Option<f32>,
    /// Number of points to animate. `None` uses every record.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(skip)]
    pub num_points: Option<usize>,
    /// Side length of each rendered point in pixels.
    #[schemars(title = "Point Width", range(min = 0.5, max = 10.0))]
    pub point_width: f32,
    /// Gap between neighbouring points in the bar chart.
    #[schemars(title = "Point Margin", range(min = 0.0, max = 10.0))]
    pub point_margin: f32,
    /// Inset of the map extent from the stage edges, in pixels.
    #[schemars(title = "Map Padding", range(min = 0.0, max = 400.0))]
    pub map_padding: f32,
    /// Clear color (RGBA, 0–1).
    #[schemars(skip)]
    pub background_color: [f32; 4],
    /// Coordinate mapping used by the map layout.
    #[schemars(title = "Projection")]
    pub projection: ProjectionMode,
}

impl Default for StageOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            num_points: None,
            point_width: 1.0,
            point_margin: 0.0,
            map_padding: 50.0,
            background_color: [1.0, 1.0, 1.0, 1.0],
            projection: ProjectionMode::Linear,
        }
    }
}

impl StageOptions {
    /// Concrete stage size, falling back to the render target's size for
    /// any dimension left unset.
    #[must_use]
    pub fn resolve_size(&self, viewport: (u32, u32)) -> (f32, f32) {
        (
            self.width.unwrap_or(viewport.0 as f32),
            self.height.unwrap_or(viewport.1 as f32),
        )
    }
}
