//! Layout engines: per-point target positions and colors.
//!
//! A layout writes each point's working `position` and `color`; the
//! controller commits them as interpolation targets afterwards. Layouts
//! read records but never mutate them, and keep no references to points
//! between calls.

pub mod bars;
pub mod decorative;
pub mod map;
pub mod shape;

use glam::Vec2;
use rand::rngs::StdRng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use self::bars::{Bin, BinGeometry};
use crate::animation::point::Point;
use crate::classify::ClassScheme;
use crate::data::Record;
use crate::options::Options;

/// Caller-supplied coordinate mapper: record `(x, y)` to stage pixels.
pub type ProjectionFn = dyn Fn(f64, f64) -> Vec2;

/// Everything a layout may read while arranging points.
pub struct LayoutContext<'a> {
    /// Stage width in pixels.
    pub width: f32,
    /// Stage height in pixels.
    pub height: f32,
    /// Animation options.
    pub options: &'a Options,
    /// Parsed class scheme.
    pub scheme: &'a ClassScheme,
    /// Custom projection, overriding `options.stage.projection`.
    pub projection: Option<&'a ProjectionFn>,
    /// Secondary point set for the shape layout.
    pub shape: &'a [[f64; 2]],
    /// Random source for randomized layouts.
    pub rng: &'a mut StdRng,
}

/// Side products of a layout pass, for overlays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arrangement {
    /// Histogram bins (bars layout only).
    pub bins: Vec<Bin>,
    /// Points that could not be placed and were frozen in place.
    pub unplaced: usize,
}

/// A layout engine.
pub trait Layout {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Write `position` and `color` for every point. `records[i]` backs
    /// `points[i]`.
    fn arrange(
        &self,
        points: &mut [Point],
        records: &[Record],
        ctx: &mut LayoutContext<'_>,
    ) -> Arrangement;
}

/// Built-in layouts, nameable from options.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// Geographic map of the records.
    Map,
    /// Classified histogram.
    Bars,
    /// Uniform random scatter.
    Random,
    /// Sine wave across the stage.
    Sine,
    /// Archimedean spiral.
    Spiral,
    /// Golden-angle sunflower.
    Phyllotaxis,
    /// Ring around the stage center.
    Rollout,
    /// Remapped onto an external point set.
    Shape,
}

impl LayoutKind {
    /// Instantiate the layout engine.
    #[must_use]
    pub fn build(self) -> Box<dyn Layout> {
        match self {
            Self::Map => Box::new(map::MapLayout),
            Self::Bars => Box::new(bars::BarsLayout),
            Self::Random => Box::new(decorative::RandomLayout),
            Self::Sine => Box::new(decorative::SineLayout),
            Self::Spiral => Box::new(decorative::SpiralLayout),
            Self::Phyllotaxis => Box::new(decorative::PhyllotaxisLayout),
            Self::Rollout => Box::new(decorative::RolloutLayout),
            Self::Shape => Box::new(shape::ShapeLayout),
        }
    }
}

/// Linear scale from `domain` to `range`. A zero-width domain maps to the
/// middle of the range.
#[must_use]
pub fn scale_linear(value: f64, domain: (f64, f64), range: (f64, f64)) -> f64 {
    let span = domain.1 - domain.0;
    if span == 0.0 || !span.is_finite() {
        return (range.0 + range.1) / 2.0;
    }
    range.0 + (value - domain.0) / span * (range.1 - range.0)
}

/// Min and max of `values`, or `None` if empty.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Index fraction in `[0, 1]` across `n` points.
#[inline]
pub(crate) fn index_fraction(i: usize, n: usize) -> f32 {
    if n > 1 {
        i as f32 / (n - 1) as f32
    } else {
        0.0
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rand::SeedableRng;

    use super::*;
    use crate::classify::ClassScheme;

    pub(crate) fn scheme() -> ClassScheme {
        ClassScheme::new(
            vec![0.0, 100.0, 1000.0],
            vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            [0.5, 0.5, 0.5],
        )
        .unwrap()
    }

    pub(crate) fn points_for(
        records: &[Record],
        scheme: &ClassScheme,
    ) -> Vec<Point> {
        records
            .iter()
            .map(|r| Point::classified(scheme.classify(r.value)))
            .collect()
    }

    /// Run `layout` on a 1000x500 stage.
    pub(crate) fn run(
        layout: &dyn Layout,
        options: &Options,
        records: &[Record],
        shape: &[[f64; 2]],
    ) -> (Vec<Point>, Arrangement) {
        let scheme = scheme();
        let mut points = points_for(records, &scheme);
        let mut rng = StdRng::seed_from_u64(7);
        let mut ctx = LayoutContext {
            width: 1000.0,
            height: 500.0,
            options,
            scheme: &scheme,
            projection: None,
            shape,
            rng: &mut rng,
        };
        let arrangement = layout.arrange(&mut points, records, &mut ctx);
        (points, arrangement)
    }
}
