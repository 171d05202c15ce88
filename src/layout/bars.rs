//! Bars layout: a histogram built from packed point columns.
//!
//! One bin per threshold, left to right in ascending threshold order. Each
//! bin packs its members into rows of `cols` points, filling bottom to top,
//! so column height reads as the class's share of the data. Empty bins keep
//! their slot.

use glam::Vec2;

use super::{Arrangement, Layout, LayoutContext};
use crate::animation::point::Point;
use crate::data::Record;
use crate::options::Options;

/// Color of points whose class has no bin.
pub const UNBINNED_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

/// One histogram bucket. Rebuilt on every bars pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    /// Threshold this bin represents.
    pub value: f64,
    /// Width in pixels.
    pub width: f32,
    /// Left edge, relative to the chart offset.
    pub start: f32,
    /// Points placed so far.
    pub count: usize,
    /// Points per row.
    pub cols: usize,
    /// Smallest y placed, i.e. the top of the tallest column. Starts at the
    /// baseline.
    pub peak_y: f32,
}

/// Stage and point geometry the binning engine needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinGeometry {
    /// Stage width.
    pub width: f32,
    /// Stage height; row 0 sits here.
    pub height: f32,
    /// Point side length.
    pub point_width: f32,
    /// Gap between points.
    pub point_margin: f32,
    /// Fixed bin width, overriding the even split.
    pub bin_width: Option<f32>,
    /// Horizontal chart offset.
    pub offset_x: f32,
    /// Vertical chart offset.
    pub offset_y: f32,
}

impl BinGeometry {
    /// Geometry for a `width` x `height` stage from `options`.
    #[must_use]
    pub fn from_options(options: &Options, width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            point_width: options.stage.point_width,
            point_margin: options.stage.point_margin,
            bin_width: options.bars.bin_width,
            offset_x: options.bars.chart_offset_x,
            offset_y: options.bars.chart_offset_y,
        }
    }

    /// Step between neighbouring points.
    #[must_use]
    pub fn increment(&self) -> f32 {
        self.point_width + self.point_margin
    }

    /// Gap between bins.
    #[must_use]
    pub fn bin_margin(&self) -> f32 {
        self.point_width * 10.0
    }

    /// Empty bins for `thresholds`, ascending.
    #[must_use]
    pub fn bins(&self, thresholds: &[f64]) -> Vec<Bin> {
        let k = thresholds.len().max(1) as f32;
        let margin = self.bin_margin();
        let width = self
            .bin_width
            .unwrap_or((self.width - margin * k) / k)
            .max(0.0);
        let cols = ((width / self.increment()).floor() as usize).max(1);
        let baseline = self.height + self.offset_y;

        let mut cumulative = 0.0;
        thresholds
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let bin = Bin {
                    value,
                    width,
                    start: cumulative + i as f32 * margin,
                    count: 0,
                    cols,
                    peak_y: baseline,
                };
                cumulative += width;
                bin
            })
            .collect()
    }

    /// Position of the next point in `bin`, advancing its count.
    pub fn place(&self, bin: &mut Bin) -> Vec2 {
        let increment = self.increment();
        let row = bin.count / bin.cols;
        let col = bin.count % bin.cols;
        let x = self.offset_x + bin.start + col as f32 * increment;
        let y = self.height - row as f32 * increment + self.offset_y;
        bin.count += 1;
        bin.peak_y = bin.peak_y.min(y);
        Vec2::new(x, y)
    }
}

/// Histogram of the points' classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarsLayout;

impl Layout for BarsLayout {
    fn name(&self) -> &'static str {
        "bars"
    }

    fn arrange(
        &self,
        points: &mut [Point],
        _records: &[Record],
        ctx: &mut LayoutContext<'_>,
    ) -> Arrangement {
        let geometry =
            BinGeometry::from_options(ctx.options, ctx.width, ctx.height);
        let mut bins = geometry.bins(ctx.scheme.thresholds());
        let mut unplaced = 0;

        for point in points.iter_mut() {
            match point.class_index.and_then(|i| bins.get_mut(i)) {
                Some(bin) => {
                    point.position = geometry.place(bin);
                    point.color = point.base_color;
                }
                None => {
                    // Frozen where the previous layout left it.
                    point.position = point.target;
                    point.color = UNBINNED_COLOR;
                    unplaced += 1;
                }
            }
        }

        if unplaced > 0 {
            log::warn!(
                "bars layout: {unplaced} points have no class bin, frozen \
                 at previous position"
            );
        }
        log::debug!(
            "bars layout: {} bins, {} cols per row",
            bins.len(),
            bins.first().map_or(0, |b| b.cols)
        );
        Arrangement { bins, unplaced }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::run;

    fn geometry() -> BinGeometry {
        BinGeometry {
            width: 1000.0,
            height: 500.0,
            point_width: 1.0,
            point_margin: 0.0,
            bin_width: None,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    #[test]
    fn bins_split_stage_evenly() {
        let bins = geometry().bins(&[0.0, 100.0, 1000.0, 10000.0]);
        // (1000 - 10 * 4) / 4
        assert_eq!(bins.len(), 4);
        assert!(bins.iter().all(|b| b.width == 240.0 && b.cols == 240));
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[1].start, 250.0);
        assert_eq!(bins[3].start, 750.0);
    }

    #[test]
    fn packs_rows_left_to_right_bottom_to_top() {
        let geom = BinGeometry {
            bin_width: Some(4.0),
            point_width: 2.0,
            ..geometry()
        };
        let mut bins = geom.bins(&[100.0, 1000.0]);
        assert_eq!(bins[0].cols, 2);
        let start = bins[0].start;

        assert_eq!(geom.place(&mut bins[0]), Vec2::new(start, 500.0));
        assert_eq!(geom.place(&mut bins[0]), Vec2::new(start + 2.0, 500.0));
        assert_eq!(geom.place(&mut bins[0]), Vec2::new(start, 498.0));
        // The second bin counts from zero.
        let second = bins[1].start;
        assert_eq!(geom.place(&mut bins[1]), Vec2::new(second, 500.0));
        assert_eq!(bins[0].count, 3);
        assert_eq!(bins[0].peak_y, 498.0);
        assert_eq!(bins[1].peak_y, 500.0);
    }

    #[test]
    fn step_follows_stage_point_size() {
        let mut options = Options::default();
        options.stage.point_width = 3.0;
        options.stage.point_margin = 1.0;
        options.bars.bin_width = Some(20.0);
        let geom = BinGeometry::from_options(&options, 400.0, 300.0);
        assert_eq!(geom.increment(), 4.0);

        let mut bins = geom.bins(&[0.0]);
        assert_eq!(bins[0].cols, 5);
        let start = bins[0].start + geom.offset_x;
        let _ = geom.place(&mut bins[0]);
        assert_eq!(geom.place(&mut bins[0]).x, start + 4.0);
    }

    #[test]
    fn offsets_shift_the_chart() {
        let geom = BinGeometry {
            offset_x: 20.0,
            offset_y: -30.0,
            ..geometry()
        };
        let mut bins = geom.bins(&[0.0]);
        assert_eq!(geom.place(&mut bins[0]), Vec2::new(20.0, 470.0));
    }

    #[test]
    fn counts_match_class_membership() {
        let records: Vec<Record> = [5.0, 150.0, 150.0, 2000.0, -1.0, 3.0]
            .iter()
            .enumerate()
            .map(|(i, &v)| Record::new(i as f64, 0.0, v))
            .collect();
        let options = Options::default();
        let (points, arrangement) =
            run(&BarsLayout, &options, &records, &[]);

        let counts: Vec<usize> =
            arrangement.bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 2, 1]);
        assert_eq!(arrangement.unplaced, 1);
        let classified = points.iter().filter(|p| p.class.is_some()).count();
        assert_eq!(counts.iter().sum::<usize>(), classified);

        // The unclassified point stays put and turns black.
        assert_eq!(points[4].position, points[4].target);
        assert_eq!(points[4].color, UNBINNED_COLOR);
        assert_eq!(points[1].color, points[1].base_color);
    }

    #[test]
    fn empty_bins_keep_their_slot() {
        let records = vec![Record::new(0.0, 0.0, 5000.0)];
        let options = Options::default();
        let (points, arrangement) =
            run(&BarsLayout, &options, &records, &[]);
        assert_eq!(arrangement.bins[0].count, 0);
        assert_eq!(arrangement.bins[1].count, 0);
        assert_eq!(points[0].position.x, arrangement.bins[2].start);
    }
}
