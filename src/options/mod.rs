//! Centralized animation options with TOML preset support.
//!
//! Every tunable (stage geometry, timing, classes, bar chart, legend, layout
//! sequence, decorative shapes) lives here. Options serialize to/from TOML
//! so an animation can be described by a preset file, and publish a JSON
//! Schema for host-side settings panels.

mod bars;
mod classes;
mod decorative;
mod legend;
mod sequence;
mod stage;
mod timing;

use std::path::Path;

pub use bars::BarOptions;
pub use classes::ClassOptions;
pub use decorative::DecorativeOptions;
pub use legend::LegendOptions;
use schemars::JsonSchema;
pub use sequence::SequenceOptions;
use serde::{Deserialize, Serialize};
pub use stage::{ProjectionMode, StageOptions};
pub use timing::{DelayList, TimingOptions};

use crate::classify::ClassScheme;
use crate::error::{ConfigError, GridmorphError};

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[timing]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Stage size, point size and projection.
    pub stage: StageOptions,
    /// Transition durations and loop limit.
    pub timing: TimingOptions,
    /// Thresholds and colors.
    pub classes: ClassOptions,
    /// Bar chart geometry and labels.
    pub bars: BarOptions,
    /// Legend settings.
    pub legend: LegendOptions,
    /// Layout order.
    pub sequence: SequenceOptions,
    /// Decorative layout parameters.
    pub decorative: DecorativeOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GridmorphError::Io`] if the file cannot be read and
    /// [`GridmorphError::OptionsParse`] if it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, GridmorphError> {
        let content =
            std::fs::read_to_string(path).map_err(GridmorphError::Io)?;
        toml::from_str(&content)
            .map_err(|e| GridmorphError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`GridmorphError::OptionsParse`] if serialization fails and
    /// [`GridmorphError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), GridmorphError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GridmorphError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GridmorphError::Io)?;
        }
        std::fs::write(path, content).map_err(GridmorphError::Io)
    }

    /// Number of animated points for a data set of `record_count` rows.
    #[must_use]
    pub fn point_count(&self, record_count: usize) -> usize {
        self.stage.num_points.unwrap_or(record_count)
    }

    /// Check the options against a data set and parse the class scheme.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(
        &self,
        record_count: usize,
    ) -> Result<ClassScheme, ConfigError> {
        if record_count == 0 {
            return Err(ConfigError::MissingData);
        }
        let requested = self.point_count(record_count);
        if requested == 0 || requested > record_count {
            return Err(ConfigError::PointCount {
                requested,
                available: record_count,
            });
        }
        if self.sequence.layouts.is_empty() {
            return Err(ConfigError::EmptySequence);
        }

        let timing = &self.timing;
        check_timing(timing.duration_ms, "duration_ms")?;
        check_timing(timing.stagger_ms, "stagger_ms")?;
        for delay in timing.delay_at_end.values() {
            check_timing(delay, "delay_at_end")?;
        }

        let (width, height) = (
            self.stage.width.unwrap_or(1.0),
            self.stage.height.unwrap_or(1.0),
        );
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidStage { width, height });
        }
        let (width, margin) = (self.stage.point_width, self.stage.point_margin);
        if !(width.is_finite() && width > 0.0)
            || !(margin.is_finite() && margin >= 0.0)
        {
            return Err(ConfigError::InvalidPointSize { width, margin });
        }

        ClassScheme::from_options(&self.classes)
    }
}

fn check_timing(value: f64, field: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTiming(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutKind;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[timing]
duration_ms = 2000.0
delay_at_end = [500.0, 1500.0]

[sequence]
layouts = ["phyllotaxis", "map", "bars"]
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.timing.duration_ms, 2000.0);
        assert_eq!(opts.timing.delay_at_end.for_layout(1), 1500.0);
        assert_eq!(opts.timing.stagger_ms, 500.0);
        assert_eq!(opts.sequence.layouts[0], LayoutKind::Phyllotaxis);
        assert_eq!(opts.stage.map_padding, 50.0);
    }

    #[test]
    fn validate_rejects_mismatched_palette() {
        let mut opts = Options::default();
        let _ = opts.classes.colors.pop();
        assert_eq!(
            opts.validate(10).unwrap_err(),
            ConfigError::ColorThresholdMismatch {
                colors: 3,
                thresholds: 4
            }
        );
    }

    #[test]
    fn validate_rejects_bad_inputs() {
        let opts = Options::default();
        assert_eq!(opts.validate(0).unwrap_err(), ConfigError::MissingData);

        let mut too_many = Options::default();
        too_many.stage.num_points = Some(11);
        assert_eq!(
            too_many.validate(10).unwrap_err(),
            ConfigError::PointCount {
                requested: 11,
                available: 10
            }
        );

        let mut negative = Options::default();
        negative.timing.delay_at_end = DelayList::PerLayout(vec![0.0, -1.0]);
        assert_eq!(
            negative.validate(10).unwrap_err(),
            ConfigError::InvalidTiming("delay_at_end")
        );

        let mut empty = Options::default();
        empty.sequence.layouts.clear();
        assert_eq!(empty.validate(10).unwrap_err(), ConfigError::EmptySequence);
    }

    #[test]
    fn validate_rejects_degenerate_point_size() {
        let mut zero = Options::default();
        zero.stage.point_width = 0.0;
        zero.stage.point_margin = 0.0;
        assert_eq!(
            zero.validate(10).unwrap_err(),
            ConfigError::InvalidPointSize {
                width: 0.0,
                margin: 0.0
            }
        );

        let mut nan = Options::default();
        nan.stage.point_width = f32::NAN;
        assert!(matches!(
            nan.validate(10),
            Err(ConfigError::InvalidPointSize { .. })
        ));

        let mut negative = Options::default();
        negative.stage.point_margin = -0.5;
        assert_eq!(
            negative.validate(10).unwrap_err(),
            ConfigError::InvalidPointSize {
                width: 1.0,
                margin: -0.5
            }
        );

        let mut touching = Options::default();
        touching.stage.point_width = 2.0;
        assert!(touching.validate(10).is_ok());
    }

    #[test]
    fn validate_returns_parsed_scheme() {
        let scheme = Options::default().validate(4).unwrap();
        assert_eq!(scheme.len(), 4);
        assert_eq!(scheme.thresholds()[3], 10000.0);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();
        assert!(props.contains_key("stage"));
        assert!(props.contains_key("timing"));
        assert!(props.contains_key("classes"));

        let timing = &props["timing"]["properties"];
        assert!(timing.get("duration_ms").is_some());
        assert!(timing.get("delay_at_end").is_none());
    }
}
