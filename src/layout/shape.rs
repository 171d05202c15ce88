//! Shape layout: points redrawn as an external point set (a logo, a glyph
//! outline).
//!
//! Point `i` of `n` takes shape vertex `floor(i / (n - 1) * (m - 1))`, so
//! any number of points covers a shape of any size. With
//! `decorative.fit_shape` the shape is scaled uniformly into the padded
//! stage and centered; otherwise its coordinates are used as pixels.

use glam::Vec2;

use super::{extent, index_fraction, Arrangement, Layout, LayoutContext};
use crate::animation::point::Point;
use crate::data::Record;

/// Remaps points onto the context's shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeLayout;

impl Layout for ShapeLayout {
    fn name(&self) -> &'static str {
        "shape"
    }

    fn arrange(
        &self,
        points: &mut [Point],
        _records: &[Record],
        ctx: &mut LayoutContext<'_>,
    ) -> Arrangement {
        let shape = ctx.shape;
        if shape.is_empty() {
            log::warn!("shape layout: no shape points, holding positions");
            for point in points.iter_mut() {
                point.position = point.target;
                point.color = point.color_end;
            }
            return Arrangement::default();
        }

        let fit = if ctx.options.decorative.fit_shape {
            Fit::new(shape, ctx)
        } else {
            Fit::IDENTITY
        };
        let n = points.len();
        let last = (shape.len() - 1) as f32;
        for (i, point) in points.iter_mut().enumerate() {
            let j = (index_fraction(i, n) * last).floor() as usize;
            let [x, y] = shape[j.min(shape.len() - 1)];
            point.position = fit.apply(x, y);
            point.color = point.base_color;
        }
        Arrangement::default()
    }
}

/// Uniform scale plus offset from shape space to stage pixels.
#[derive(Debug, Clone, Copy)]
struct Fit {
    origin: (f64, f64),
    scale: f64,
    offset: (f64, f64),
}

impl Fit {
    const IDENTITY: Self = Self {
        origin: (0.0, 0.0),
        scale: 1.0,
        offset: (0.0, 0.0),
    };

    fn new(shape: &[[f64; 2]], ctx: &LayoutContext<'_>) -> Self {
        let pad = f64::from(ctx.options.stage.map_padding);
        let inner_w = (f64::from(ctx.width) - 2.0 * pad).max(0.0);
        let inner_h = (f64::from(ctx.height) - 2.0 * pad).max(0.0);
        let (x0, x1) = extent(shape.iter().map(|p| p[0])).unwrap_or_default();
        let (y0, y1) = extent(shape.iter().map(|p| p[1])).unwrap_or_default();
        let (span_x, span_y) = (x1 - x0, y1 - y0);

        let scale = match (span_x > 0.0, span_y > 0.0) {
            (true, true) => (inner_w / span_x).min(inner_h / span_y),
            (true, false) => inner_w / span_x,
            (false, true) => inner_h / span_y,
            (false, false) => 0.0,
        };
        Self {
            origin: (x0, y0),
            scale,
            offset: (
                pad + (inner_w - span_x * scale) / 2.0,
                pad + (inner_h - span_y * scale) / 2.0,
            ),
        }
    }

    fn apply(&self, x: f64, y: f64) -> Vec2 {
        Vec2::new(
            (self.offset.0 + (x - self.origin.0) * self.scale) as f32,
            (self.offset.1 + (y - self.origin.1) * self.scale) as f32,
        )
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

    fn square() -> Vec<[f64; 2]> {
        vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]
    }

    #[test]
    fn index_remaps_across_shape() {
        let mut options = Options::default();
        options.decorative.fit_shape = false;
        let (points, _) = run(&ShapeLayout, &options, &records(7), &square());
        let xs: Vec<(f32, f32)> =
            points.iter().map(|p| (p.position.x, p.position.y)).collect();
        // fractions 0, 1/6 .. 1 scaled by 3, floored: 0 0 1 1 2 2 3
        assert_eq!(
            xs,
            vec![
                (0.0, 0.0),
                (0.0, 0.0),
                (10.0, 0.0),
                (10.0, 0.0),
                (10.0, 10.0),
                (10.0, 10.0),
                (0.0, 10.0),
            ]
        );
    }

    #[test]
    fn fit_centers_inside_padding() {
        let options = Options::default();
        let (points, _) = run(&ShapeLayout, &options, &records(4), &square());
        // 900x400 inner box, square binds on height: 400px centered.
        assert_eq!(points[0].position, Vec2::new(300.0, 50.0));
        assert_eq!(points[2].position, Vec2::new(700.0, 450.0));
    }

    #[test]
    fn more_shape_points_than_records() {
        let options = Options::default();
        let shape: Vec<[f64; 2]> =
            (0..100).map(|i| [f64::from(i), 0.0]).collect();
        let (points, _) = run(&ShapeLayout, &options, &records(2), &shape);
        assert!((points[0].position.x - 50.0).abs() < 1e-3);
        assert!((points[1].position.x - 950.0).abs() < 1e-3);
        // Flat shape: centered vertically.
        assert!((points[1].position.y - 250.0).abs() < 1e-3);
    }

    #[test]
    fn empty_shape_holds_position() {
        let options = Options::default();
        let (points, _) = run(&ShapeLayout, &options, &records(3), &[]);
        assert!(points.iter().all(|p| p.position == p.target));
    }
}
