use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Class legend shown alongside the map layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Legend", inline)]
#[serde(default)]
pub struct LegendOptions {
    /// Whether a legend is produced.
    #[schemars(title = "Show Legend")]
    pub enabled: bool,
    /// Legend heading.
    #[schemars(title = "Title")]
    pub title: String,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Legend".to_owned(),
        }
    }
}
