use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::layout::LayoutKind;

/// Order of layouts the animation cycles through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Sequence", inline)]
#[serde(default)]
pub struct SequenceOptions {
    /// Layouts visited in order, wrapping back to the first.
    #[schemars(title = "Layouts")]
    pub layouts: Vec<LayoutKind>,
    /// Decorative layout played once before the cycle starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Initial Animation")]
    pub initial_animation: Option<LayoutKind>,
    /// Seed for the random scatter and random layout. `None` draws from the
    /// thread RNG.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(skip)]
    pub seed: Option<u64>,
}

impl Default for SequenceOptions {
    fn default() -> Self {
        Self {
            layouts: vec![LayoutKind::Map, LayoutKind::Bars],
            initial_animation: None,
            seed: None,
        }
    }
}
