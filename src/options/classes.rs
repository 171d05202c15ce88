use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Threshold classification and its palette.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Classes", inline)]
#[serde(default)]
pub struct ClassOptions {
    /// CSS colors, one per threshold.
    #[schemars(title = "Colors")]
    pub colors: Vec<String>,
    /// Strictly ascending class breakpoints. The last one is open-ended.
    #[schemars(title = "Thresholds")]
    pub thresholds: Vec<f64>,
    /// RGB used for values below the lowest threshold.
    #[schemars(skip)]
    pub fallback_color: [f32; 3],
}

impl Default for ClassOptions {
    fn default() -> Self {
        Self {
            colors: ["#005cff", "#55e238", "#ebff0a", "#ff0f00"]
                .map(str::to_owned)
                .to_vec(),
            thresholds: vec![0.0, 100.0, 1000.0, 10000.0],
            fallback_color: [0.5, 0.5, 0.5],
        }
    }
}
