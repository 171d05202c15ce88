use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Shape parameters for the decorative layouts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Decorative", inline)]
#[serde(default)]
pub struct DecorativeOptions {
    /// Full sine periods across the stage width.
    #[schemars(title = "Sine Periods", range(min = 0.5, max = 20.0))]
    pub sine_periods: f32,
    /// Sine amplitude as a fraction of half the stage height.
    #[schemars(title = "Sine Amplitude", range(min = 0.0, max = 1.0))]
    pub sine_amplitude: f32,
    /// Turns of the Archimedean spiral.
    #[schemars(title = "Spiral Turns", range(min = 1.0, max = 100.0))]
    pub spiral_turns: f32,
    /// Rollout circle radius as a fraction of the smaller stage dimension.
    #[schemars(title = "Rollout Radius", range(min = 0.05, max = 0.5))]
    pub rollout_radius: f32,
    /// Whether shape coordinates are rescaled to fit the padded stage.
    #[schemars(title = "Fit Shape")]
    pub fit_shape: bool,
}

impl Default for DecorativeOptions {
    fn default() -> Self {
        Self {
            sine_periods: 3.0,
            sine_amplitude: 0.3,
            spiral_turns: 20.0,
            rollout_radius: 0.4,
            fit_shape: true,
        }
    }
}
