//! Map layout: records at their geographic position.

use glam::Vec2;

use super::{extent, scale_linear, Arrangement, Layout, LayoutContext};
use crate::animation::point::Point;
use crate::data::Record;
use crate::options::ProjectionMode;

/// Web Mercator is undefined at the poles; clamp like tile maps do.
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

/// Places every point at its record's projected coordinate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapLayout;

impl Layout for MapLayout {
    fn name(&self) -> &'static str {
        "map"
    }

    fn arrange(
        &self,
        points: &mut [Point],
        records: &[Record],
        ctx: &mut LayoutContext<'_>,
    ) -> Arrangement {
        let projector = Projector::fit(records, ctx);
        for (point, record) in points.iter_mut().zip(records) {
            point.position = match ctx.projection {
                Some(project) => project(record.x, record.y),
                None => projector.project(record),
            };
            point.color = point.base_color;
        }
        Arrangement::default()
    }
}

/// A projection fitted to the data extent and the padded stage.
#[derive(Debug, Clone, Copy)]
enum Projector {
    Linear {
        x_domain: (f64, f64),
        y_domain: (f64, f64),
        x_range: (f64, f64),
        y_range: (f64, f64),
    },
    Mercator {
        origin: (f64, f64),
        scale: f64,
        offset: (f64, f64),
    },
}

impl Projector {
    fn fit(records: &[Record], ctx: &LayoutContext<'_>) -> Self {
        let pad = f64::from(ctx.options.stage.map_padding);
        let (width, height) = (f64::from(ctx.width), f64::from(ctx.height));
        match ctx.options.stage.projection {
            ProjectionMode::Linear => Self::Linear {
                x_domain: extent(records.iter().map(|r| r.x))
                    .unwrap_or((0.0, 0.0)),
                y_domain: extent(records.iter().map(|r| r.y))
                    .unwrap_or((0.0, 0.0)),
                x_range: (pad, width - pad),
                // Screen y grows downwards.
                y_range: (height - pad, pad),
            },
            ProjectionMode::Mercator => {
                let (xs, ys): (Vec<f64>, Vec<f64>) =
                    records.iter().map(|r| mercator(r.x, r.y)).unzip();
                let (x0, x1) = extent(xs).unwrap_or((0.0, 0.0));
                let (y0, y1) = extent(ys).unwrap_or((0.0, 0.0));
                let inner_w = width - 2.0 * pad;
                let inner_h = height - 2.0 * pad;
                let fit = |inner: f64, span: f64| {
                    if span > 0.0 {
                        inner / span
                    } else {
                        f64::INFINITY
                    }
                };
                let mut scale =
                    fit(inner_w, x1 - x0).min(fit(inner_h, y1 - y0));
                if !scale.is_finite() {
                    scale = 0.0;
                }
                Self::Mercator {
                    origin: (x0, y1),
                    scale,
                    offset: (
                        pad + (inner_w - (x1 - x0) * scale) / 2.0,
                        pad + (inner_h - (y1 - y0) * scale) / 2.0,
                    ),
                }
            }
        }
    }

    fn project(&self, record: &Record) -> Vec2 {
        match *self {
            Self::Linear {
                x_domain,
                y_domain,
                x_range,
                y_range,
            } => Vec2::new(
                scale_linear(record.x, x_domain, x_range) as f32,
                scale_linear(record.y, y_domain, y_range) as f32,
            ),
            Self::Mercator {
                origin,
                scale,
                offset,
            } => {
                let (mx, my) = mercator(record.x, record.y);
                Vec2::new(
                    (offset.0 + (mx - origin.0) * scale) as f32,
                    (offset.1 + (origin.1 - my) * scale) as f32,
                )
            }
        }
    }
}

/// Unit-sphere Web Mercator of longitude/latitude degrees.
fn mercator(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    (
        lon.to_radians(),
        (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::{run, scheme};
    use crate::options::Options;

    fn grid() -> Vec<Record> {
        vec![
            Record::new(4000.0, 2000.0, 5.0),
            Record::new(4500.0, 2500.0, 150.0),
            Record::new(5000.0, 3000.0, 5000.0),
        ]
    }

    #[test]
    fn extent_lands_on_padding() {
        let options = Options::default();
        let (points, _) = run(&MapLayout, &options, &grid(), &[]);
        // Stage is 1000x500 with 50px padding; y is inverted.
        assert_eq!(points[0].position, Vec2::new(50.0, 450.0));
        assert_eq!(points[2].position, Vec2::new(950.0, 50.0));
        assert_eq!(points[1].position, Vec2::new(500.0, 250.0));
    }

    #[test]
    fn carries_class_colors() {
        let options = Options::default();
        let (points, _) = run(&MapLayout, &options, &grid(), &[]);
        assert_eq!(points[1].color, scheme().colors()[1]);
    }

    #[test]
    fn mercator_fits_inside_padding_and_keeps_aspect() {
        let mut options = Options::default();
        options.stage.projection = ProjectionMode::Mercator;
        let records = vec![
            Record::new(-10.0, 35.0, 1.0),
            Record::new(30.0, 70.0, 1.0),
        ];
        let (points, _) = run(&MapLayout, &options, &records, &[]);
        for p in &points {
            assert!(p.position.x >= 49.99 && p.position.x <= 950.01);
            assert!(p.position.y >= 49.99 && p.position.y <= 450.01);
        }
        // Northern point sits above the southern one.
        assert!(points[1].position.y < points[0].position.y);
        // Height is the binding dimension, so y spans the padded range.
        assert!((points[1].position.y - 50.0).abs() < 1e-3);
        assert!((points[0].position.y - 450.0).abs() < 1e-3);
    }

    #[test]
    fn custom_projection_overrides() {
        use rand::SeedableRng;
        let options = Options::default();
        let scheme = scheme();
        let records = grid();
        let mut points = crate::layout::test_support::points_for(
            &records, &scheme,
        );
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let halve =
            |x: f64, y: f64| Vec2::new(x as f32 / 10.0, y as f32 / 10.0);
        let mut ctx = LayoutContext {
            width: 1000.0,
            height: 500.0,
            options: &options,
            scheme: &scheme,
            projection: Some(&halve),
            shape: &[],
            rng: &mut rng,
        };
        let _ = MapLayout.arrange(&mut points, &records, &mut ctx);
        assert_eq!(points[0].position, Vec2::new(400.0, 200.0));
    }
}
