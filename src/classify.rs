//! Threshold classification of record values.
//!
//! A [`ClassScheme`] pairs strictly ascending thresholds with one color
//! each. A value belongs to class `i` when `T[i] <= value < T[i + 1]`; the
//! last class is open-ended (`value >= T[last]`). Values below the first
//! threshold (or NaN) fall back to a neutral grey with no class.

use crate::error::ConfigError;
use crate::options::ClassOptions;

/// Result of classifying one value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Position of the matched threshold, `None` for the fallback.
    pub index: Option<usize>,
    /// The matched threshold value, `None` for the fallback.
    pub class: Option<f64>,
    /// Normalized RGB color.
    pub color: [f32; 3],
}

/// Parsed, validated thresholds and colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassScheme {
    thresholds: Vec<f64>,
    colors: Vec<[f32; 3]>,
    fallback: [f32; 3],
}

impl ClassScheme {
    /// Build a scheme from already-normalized RGB colors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the lists are empty, differ in length, or
    /// the thresholds are not finite and strictly increasing.
    pub fn new(
        thresholds: Vec<f64>,
        colors: Vec<[f32; 3]>,
        fallback: [f32; 3],
    ) -> Result<Self, ConfigError> {
        if thresholds.len() != colors.len() {
            return Err(ConfigError::ColorThresholdMismatch {
                colors: colors.len(),
                thresholds: thresholds.len(),
            });
        }
        if thresholds.is_empty() {
            return Err(ConfigError::EmptyThresholds);
        }
        for (index, pair) in thresholds.windows(2).enumerate() {
            if !(pair[1] > pair[0]) {
                return Err(ConfigError::ThresholdsNotAscending {
                    index: index + 1,
                });
            }
        }
        if thresholds.iter().any(|t| !t.is_finite()) {
            let index =
                thresholds.iter().position(|t| !t.is_finite()).unwrap_or(0);
            return Err(ConfigError::ThresholdsNotAscending { index });
        }
        Ok(Self {
            thresholds,
            colors,
            fallback,
        })
    }

    /// Parse the CSS colors in `options` and validate the pairing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unparsable colors or any of the
    /// conditions checked by [`ClassScheme::new`].
    pub fn from_options(options: &ClassOptions) -> Result<Self, ConfigError> {
        if options.colors.len() != options.thresholds.len() {
            return Err(ConfigError::ColorThresholdMismatch {
                colors: options.colors.len(),
                thresholds: options.thresholds.len(),
            });
        }
        let colors = options
            .colors
            .iter()
            .map(|c| parse_color(c))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(options.thresholds.clone(), colors, options.fallback_color)
    }

    /// Classify a single value. First match wins.
    #[must_use]
    pub fn classify(&self, value: f64) -> Classification {
        match self.class_index(value) {
            Some(i) => Classification {
                index: Some(i),
                class: Some(self.thresholds[i]),
                color: self.colors[i],
            },
            None => Classification {
                index: None,
                class: None,
                color: self.fallback,
            },
        }
    }

    /// Index of the class `value` falls into.
    #[must_use]
    pub fn class_index(&self, value: f64) -> Option<usize> {
        let last = self.thresholds.len() - 1;
        for (i, &stop) in self.thresholds.iter().enumerate() {
            let matched = if i == last {
                value >= stop
            } else {
                value >= stop && value < self.thresholds[i + 1]
            };
            if matched {
                return Some(i);
            }
        }
        None
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    /// Always `false`: construction rejects empty schemes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// Ascending thresholds.
    #[must_use]
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// RGB color per threshold.
    #[must_use]
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Color used for unclassified values.
    #[must_use]
    pub fn fallback(&self) -> [f32; 3] {
        self.fallback
    }
}

/// Parse a CSS color string into normalized RGB. Alpha is dropped.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidColor`] if the string is not a CSS color.
pub fn parse_color(color: &str) -> Result<[f32; 3], ConfigError> {
    color
        .trim()
        .parse::<css_color_parser::Color>()
        .map(|c| {
            [
                f32::from(c.r) / 255.0,
                f32::from(c.g) / 255.0,
                f32::from(c.b) / 255.0,
            ]
        })
        .map_err(|_| ConfigError::InvalidColor(color.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const C0: [f32; 3] = [1.0, 0.0, 0.0];
    const C1: [f32; 3] = [0.0, 1.0, 0.0];
    const C2: [f32; 3] = [0.0, 0.0, 1.0];
    const GREY: [f32; 3] = [0.5, 0.5, 0.5];

    fn scheme() -> ClassScheme {
        ClassScheme::new(vec![0.0, 100.0, 1000.0], vec![C0, C1, C2], GREY)
            .unwrap()
    }

    #[test]
    fn value_inside_middle_class() {
        let c = scheme().classify(150.0);
        assert_eq!(c.class, Some(100.0));
        assert_eq!(c.index, Some(1));
        assert_eq!(c.color, C1);
    }

    #[test]
    fn last_class_is_open_ended() {
        let c = scheme().classify(5000.0);
        assert_eq!(c.class, Some(1000.0));
        assert_eq!(c.color, C2);
    }

    #[test]
    fn below_lowest_threshold_falls_back() {
        let c = scheme().classify(-5.0);
        assert_eq!(c.class, None);
        assert_eq!(c.index, None);
        assert_eq!(c.color, GREY);
        assert_eq!(scheme().classify(f64::NAN).class, None);
    }

    #[test]
    fn boundaries_are_lower_inclusive() {
        let s = scheme();
        assert_eq!(s.classify(0.0).class, Some(0.0));
        assert_eq!(s.classify(99.999).class, Some(0.0));
        assert_eq!(s.classify(100.0).class, Some(100.0));
        assert_eq!(s.classify(999.0).class, Some(100.0));
        assert_eq!(s.classify(1000.0).class, Some(1000.0));
    }

    #[test]
    fn every_value_gets_exactly_one_class() {
        let s = scheme();
        for step in -20..=2400 {
            let value = f64::from(step) * 0.5;
            let matches = s
                .thresholds()
                .iter()
                .enumerate()
                .filter(|(i, &t)| {
                    let upper = s.thresholds().get(i + 1).copied();
                    value >= t && upper.is_none_or(|u| value < u)
                })
                .count();
            let c = s.classify(value);
            if value < 0.0 {
                assert_eq!(matches, 0);
                assert_eq!(c.class, None);
            } else {
                assert_eq!(matches, 1, "value {value}");
                assert!(c.class.is_some());
            }
        }
    }

    #[test]
    fn rejects_unsorted_or_mismatched() {
        assert_eq!(
            ClassScheme::new(vec![0.0, 0.0], vec![C0, C1], GREY).unwrap_err(),
            ConfigError::ThresholdsNotAscending { index: 1 }
        );
        assert_eq!(
            ClassScheme::new(vec![0.0], vec![C0, C1], GREY).unwrap_err(),
            ConfigError::ColorThresholdMismatch {
                colors: 2,
                thresholds: 1
            }
        );
        assert_eq!(
            ClassScheme::new(Vec::new(), Vec::new(), GREY).unwrap_err(),
            ConfigError::EmptyThresholds
        );
    }

    #[test]
    fn parses_css_colors() {
        let blue = parse_color("#005cff").unwrap();
        assert_eq!(blue[0], 0.0);
        assert!((blue[1] - 92.0 / 255.0).abs() < 1e-6);
        assert_eq!(blue[2], 1.0);
        assert_eq!(parse_color("red").unwrap(), [1.0, 0.0, 0.0]);
        assert!(matches!(
            parse_color("not-a-color"),
            Err(ConfigError::InvalidColor(_))
        ));
    }
}
