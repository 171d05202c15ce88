use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Bar-chart (histogram) layout and bin label options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Bars", inline)]
#[serde(default)]
pub struct BarOptions {
    /// Fixed bin width in pixels. `None` divides the stage evenly.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Bin Width")]
    pub bin_width: Option<f32>,
    /// Horizontal offset of the whole chart.
    #[schemars(title = "Offset X")]
    pub chart_offset_x: f32,
    /// Vertical offset of the chart baseline (positive moves down).
    #[schemars(title = "Offset Y")]
    pub chart_offset_y: f32,
    /// Whether bin labels are produced once the bars settle.
    #[schemars(title = "Bin Labels")]
    pub labels: bool,
    /// Label offset from the bin's horizontal center.
    #[schemars(skip)]
    pub label_offset_x: f32,
    /// Label offset from the top of the bin's tallest column.
    #[schemars(skip)]
    pub label_offset_y: f32,
    /// Area represented by one point, used by the default bin label.
    #[schemars(title = "Cell Area (km²)")]
    pub cell_area: f64,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self {
            bin_width: None,
            chart_offset_x: 0.0,
            chart_offset_y: 0.0,
            labels: true,
            label_offset_x: -40.0,
            label_offset_y: -20.0,
            cell_area: 5.0,
        }
    }
}
