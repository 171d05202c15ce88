//! Decorative layouts used as intro and in-between states.
//!
//! Each is a closed-form formula of the point index; none look at
//! neighbouring points or record coordinates. Points keep their class
//! color.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;

use super::{index_fraction, Arrangement, Layout, LayoutContext};
use crate::animation::point::Point;
use crate::data::Record;

/// Golden angle in radians.
pub const GOLDEN_ANGLE: f32 = PI * (3.0 - 2.236_068);

fn arrange_by_index(
    points: &mut [Point],
    mut position: impl FnMut(usize, usize) -> Vec2,
) -> Arrangement {
    let n = points.len();
    for (i, point) in points.iter_mut().enumerate() {
        point.position = position(i, n);
        point.color = point.base_color;
    }
    Arrangement::default()
}

/// Uniform random scatter over the stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomLayout;

impl Layout for RandomLayout {
    fn name(&self) -> &'static str {
        "random"
    }

    fn arrange(
        &self,
        points: &mut [Point],
        _records: &[Record],
        ctx: &mut LayoutContext<'_>,
    ) -> Arrangement {
        let (width, height) = (ctx.width, ctx.height);
        let rng = &mut *ctx.rng;
        arrange_by_index(points, |_, _| {
            Vec2::new(
                rng.random::<f32>() * width,
                rng.random::<f32>() * height,
            )
        })
    }
}

/// Points strung along a sine wave, left to right.
#[derive(Debug, Clone, Copy, Default)]
pub struct SineLayout;

impl Layout for SineLayout {
    fn name(&self) -> &'static str {
        "sine"
    }

    fn arrange(
        &self,
        points: &mut [Point],
        _records: &[Record],
        ctx: &mut LayoutContext<'_>,
    ) -> Arrangement {
        let opts = &ctx.options.decorative;
        let amplitude = opts.sine_amplitude * ctx.height / 2.0;
        let phase_span = opts.sine_periods * TAU;
        let span = ctx.width - ctx.options.stage.point_width;
        let y_offset = ctx.height / 2.0;
        arrange_by_index(points, |i, n| {
            Vec2::new(
                i as f32 / n as f32 * span,
                amplitude * (index_fraction(i, n) * phase_span).sin()
                    + y_offset,
            )
        })
    }
}

/// Archimedean spiral: radius and angle both linear in index.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpiralLayout;

impl Layout for SpiralLayout {
    fn name(&self) -> &'static str {
        "spiral"
    }

    fn arrange(
        &self,
        points: &mut [Point],
        _records: &[Record],
        ctx: &mut LayoutContext<'_>,
    ) -> Arrangement {
        let center = Vec2::new(ctx.width / 2.0, ctx.height / 2.0);
        let max_radius = (center.x.min(center.y)
            - ctx.options.stage.point_width)
            .max(0.0);
        let turns = ctx.options.decorative.spiral_turns * TAU;
        arrange_by_index(points, |i, n| {
            let f = index_fraction(i, n);
            center + Vec2::from_angle(f * turns) * (f * max_radius)
        })
    }
}

/// Sunflower packing: golden-angle steps, radius proportional to √i.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhyllotaxisLayout;

impl Layout for PhyllotaxisLayout {
    fn name(&self) -> &'static str {
        "phyllotaxis"
    }

    fn arrange(
        &self,
        points: &mut [Point],
        _records: &[Record],
        ctx: &mut LayoutContext<'_>,
    ) -> Arrangement {
        let point_radius = ctx.options.stage.point_width / 2.0;
        let center = Vec2::new(
            ctx.width / 2.0 - point_radius,
            ctx.height / 2.0 - point_radius,
        );
        arrange_by_index(points, |i, _| {
            let r = point_radius * (i as f32).sqrt();
            center + Vec2::from_angle(GOLDEN_ANGLE * i as f32) * r
        })
    }
}

/// Points spaced evenly around a circle.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolloutLayout;

impl Layout for RolloutLayout {
    fn name(&self) -> &'static str {
        "rollout"
    }

    fn arrange(
        &self,
        points: &mut [Point],
        _records: &[Record],
        ctx: &mut LayoutContext<'_>,
    ) -> Arrangement {
        let center = Vec2::new(ctx.width / 2.0, ctx.height / 2.0);
        let radius =
            ctx.options.decorative.rollout_radius * ctx.width.min(ctx.height);
        arrange_by_index(points, |i, n| {
            center + Vec2::from_angle(TAU * i as f32 / n as f32) * radius
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::run;
    use crate::options::Options;

    fn records(n: usize) -> Vec<Record> {
        (0..n).map(|i| Record::new(0.0, 0.0, i as f64)).collect()
    }

    #[test]
    fn golden_angle_value() {
        let expected = PI * (3.0 - 5.0_f32.sqrt());
        assert!((GOLDEN_ANGLE - expected).abs() < 1e-5);
    }

    #[test]
    fn random_stays_on_stage_and_is_seeded() {
        let options = Options::default();
        let (a, _) = run(&RandomLayout, &options, &records(200), &[]);
        let (b, _) = run(&RandomLayout, &options, &records(200), &[]);
        assert_eq!(a, b);
        assert!(a.iter().all(|p| {
            (0.0..1000.0).contains(&p.position.x)
                && (0.0..500.0).contains(&p.position.y)
        }));
    }

    #[test]
    fn sine_x_is_linear_and_y_bounded() {
        let options = Options::default();
        let (points, _) = run(&SineLayout, &options, &records(100), &[]);
        assert_eq!(points[0].position, Vec2::new(0.0, 250.0));
        assert!((points[50].position.x - 499.5).abs() < 1e-3);
        let amplitude = 0.3 * 250.0;
        assert!(points
            .iter()
            .all(|p| (p.position.y - 250.0).abs() <= amplitude + 1e-3));
    }

    #[test]
    fn spiral_radius_grows_linearly() {
        let options = Options::default();
        let (points, _) = run(&SpiralLayout, &options, &records(101), &[]);
        let center = Vec2::new(500.0, 250.0);
        assert_eq!(points[0].position, center);
        let r_last = points[100].position.distance(center);
        let r_mid = points[50].position.distance(center);
        assert!((r_last - 249.0).abs() < 1e-2);
        assert!((r_mid - 124.5).abs() < 1e-2);
    }

    #[test]
    fn phyllotaxis_radius_grows_with_sqrt_index() {
        let mut options = Options::default();
        options.stage.point_width = 4.0;
        let (points, _) =
            run(&PhyllotaxisLayout, &options, &records(100), &[]);
        let center = Vec2::new(498.0, 248.0);
        assert_eq!(points[0].position, center);
        assert!((points[81].position.distance(center) - 18.0).abs() < 1e-3);
    }

    #[test]
    fn rollout_is_a_circle() {
        let options = Options::default();
        let (points, _) = run(&RolloutLayout, &options, &records(8), &[]);
        let center = Vec2::new(500.0, 250.0);
        for p in &points {
            assert!((p.position.distance(center) - 200.0).abs() < 1e-3);
        }
        assert!((points[0].position - Vec2::new(700.0, 250.0)).length() < 1e-3);
        assert!((points[2].position - Vec2::new(500.0, 450.0)).length() < 1e-3);
    }

    #[test]
    fn decorative_layouts_keep_class_colors() {
        let options = Options::default();
        let (points, _) = run(&SpiralLayout, &options, &records(3), &[]);
        assert!(points.iter().all(|p| p.color == p.base_color));
    }
}
