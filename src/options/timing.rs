use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Hold time after each transition, in milliseconds.
///
/// Accepts either a single number, applied after every layout, or a list
/// indexed by position in the layout sequence. A list shorter than the
/// sequence repeats from its start.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum DelayList {
    /// Same delay after every layout.
    Uniform(f64),
    /// One delay per sequence position.
    PerLayout(Vec<f64>),
}

impl DelayList {
    /// Delay after the layout at `position` in the sequence.
    #[must_use]
    pub fn for_layout(&self, position: usize) -> f64 {
        match self {
            Self::Uniform(ms) => *ms,
            Self::PerLayout(list) if list.is_empty() => 0.0,
            Self::PerLayout(list) => list[position % list.len()],
        }
    }

    /// Iterate every configured value (for validation).
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        let slice = match self {
            Self::Uniform(ms) => std::slice::from_ref(ms),
            Self::PerLayout(list) => list.as_slice(),
        };
        slice.iter().copied()
    }
}

impl Default for DelayList {
    fn default() -> Self {
        Self::Uniform(1000.0)
    }
}

impl From<f64> for DelayList {
    fn from(ms: f64) -> Self {
        Self::Uniform(ms)
    }
}

impl From<Vec<f64>> for DelayList {
    fn from(list: Vec<f64>) -> Self {
        Self::PerLayout(list)
    }
}

/// Transition timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Timing", inline)]
#[serde(default)]
pub struct TimingOptions {
    /// Duration of a single point's movement, in milliseconds.
    #[schemars(title = "Duration (ms)", range(min = 0.0, max = 60000.0))]
    pub duration_ms: f64,
    /// Hold time after each transition.
    #[schemars(skip)]
    pub delay_at_end: DelayList,
    /// Total start offset spread across all points, in milliseconds. Point
    /// `i` starts moving `stagger_ms * i / num_points` after the
    /// transition begins.
    #[schemars(title = "Stagger (ms)", range(min = 0.0, max = 5000.0))]
    pub stagger_ms: f64,
    /// Number of full cycles before the animation ends. `None` loops
    /// forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Loops")]
    pub loops: Option<u32>,
}

impl Default for TimingOptions {
    fn default() -> Self {
        Self {
            duration_ms: 5000.0,
            delay_at_end: DelayList::default(),
            stagger_ms: 500.0,
            loops: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_delay_broadcasts() {
        let delay = DelayList::Uniform(250.0);
        assert_eq!(delay.for_layout(0), 250.0);
        assert_eq!(delay.for_layout(7), 250.0);
    }

    #[test]
    fn short_delay_list_repeats() {
        let delay = DelayList::PerLayout(vec![100.0, 2000.0]);
        assert_eq!(delay.for_layout(0), 100.0);
        assert_eq!(delay.for_layout(1), 2000.0);
        assert_eq!(delay.for_layout(2), 100.0);
        assert_eq!(DelayList::PerLayout(Vec::new()).for_layout(3), 0.0);
    }

    #[test]
    fn delay_accepts_number_or_list_in_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            delay: DelayList,
        }
        let scalar: Wrapper = toml::from_str("delay = 1500.0").unwrap();
        assert_eq!(scalar.delay, DelayList::Uniform(1500.0));
        let list: Wrapper = toml::from_str("delay = [0.0, 3000.0]").unwrap();
        assert_eq!(list.delay, DelayList::PerLayout(vec![0.0, 3000.0]));
    }
}
