//! Per-point animation state and its GPU vertex form.

use glam::Vec2;

use crate::classify::Classification;

/// A render entity bound 1:1 to a record by index.
///
/// `position` and `color` are the working output of the active layout. At
/// the start of every transition the previous target becomes the start,
/// the layout writes `position`/`color`, and those are committed as the new
/// target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Interpolation start position.
    pub start: Vec2,
    /// Interpolation target position.
    pub target: Vec2,
    /// Interpolation start color.
    pub color_start: [f32; 3],
    /// Interpolation target color.
    pub color_end: [f32; 3],
    /// Threshold value of the record's class, `None` if unclassified.
    pub class: Option<f64>,
    /// Index of the record's class in the scheme.
    pub class_index: Option<usize>,
    /// Color assigned by classification.
    pub base_color: [f32; 3],
    /// Layout output position.
    pub position: Vec2,
    /// Layout output color.
    pub color: [f32; 3],
}

impl Point {
    /// Point at the origin carrying a record's classification.
    #[must_use]
    pub fn classified(classification: Classification) -> Self {
        Self {
            start: Vec2::ZERO,
            target: Vec2::ZERO,
            color_start: classification.color,
            color_end: classification.color,
            class: classification.class,
            class_index: classification.index,
            base_color: classification.color,
            position: Vec2::ZERO,
            color: classification.color,
        }
    }

    /// Make the previous target the new start.
    #[inline]
    pub fn snapshot_start(&mut self) {
        self.start = self.target;
        self.color_start = self.color_end;
    }

    /// Copy the layout output into the target.
    #[inline]
    pub fn commit_layout(&mut self) {
        self.target = self.position;
        self.color_end = self.color;
    }

    /// Position and color at eased progress `t` (0 = start, 1 = target).
    #[inline]
    #[must_use]
    pub fn interpolate(&self, t: f32) -> (Vec2, [f32; 3]) {
        let t = t.clamp(0.0, 1.0);
        let position = self.start.lerp(self.target, t);
        let color = [
            lerp(t, self.color_start[0], self.color_end[0]),
            lerp(t, self.color_start[1], self.color_end[1]),
            lerp(t, self.color_start[2], self.color_end[2]),
        ];
        (position, color)
    }

    /// GPU attributes for this point at sequence position `index`.
    #[must_use]
    pub fn vertex(&self, index: usize) -> PointVertex {
        PointVertex {
            start: self.start.to_array(),
            end: self.target.to_array(),
            color_start: self.color_start,
            index: index as f32,
            color_end: self.color_end,
            _pad: 0.0,
        }
    }
}

#[inline]
fn lerp(t: f32, start: f32, end: f32) -> f32 {
    start + (end - start) * t
}

/// 48-byte per-instance point attributes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointVertex {
    /// Start position in stage pixels.
    pub start: [f32; 2],
    /// Target position in stage pixels.
    pub end: [f32; 2],
    /// Start color.
    pub color_start: [f32; 3],
    /// Point index, drives the stagger delay.
    pub index: f32,
    /// Target color.
    pub color_end: [f32; 3],
    /// Keeps the stride a multiple of 16 bytes.
    pub _pad: f32,
}

/// Write every point's vertex into `out`, reusing its allocation.
pub fn fill_vertices(points: &[Point], out: &mut Vec<PointVertex>) {
    out.clear();
    out.extend(points.iter().enumerate().map(|(i, p)| p.vertex(i)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> Point {
        Point::classified(Classification {
            index: Some(0),
            class: Some(0.0),
            color: [1.0, 0.0, 0.0],
        })
    }

    #[test]
    fn transition_snapshot_and_commit() {
        let mut p = point();
        p.target = Vec2::new(10.0, 20.0);
        p.color_end = [0.0, 0.0, 1.0];

        p.snapshot_start();
        p.position = Vec2::new(30.0, 40.0);
        p.color = [0.0, 1.0, 0.0];
        p.commit_layout();

        assert_eq!(p.start, Vec2::new(10.0, 20.0));
        assert_eq!(p.color_start, [0.0, 0.0, 1.0]);
        assert_eq!(p.target, Vec2::new(30.0, 40.0));
        assert_eq!(p.color_end, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn interpolates_position_and_color() {
        let mut p = point();
        p.start = Vec2::new(0.0, 0.0);
        p.target = Vec2::new(10.0, -10.0);
        p.color_start = [0.0, 0.0, 0.0];
        p.color_end = [1.0, 0.5, 0.0];

        let (pos, color) = p.interpolate(0.5);
        assert_eq!(pos, Vec2::new(5.0, -5.0));
        assert_eq!(color, [0.5, 0.25, 0.0]);
        assert_eq!(p.interpolate(2.0).0, p.target);
    }

    #[test]
    fn vertex_layout_is_48_bytes() {
        assert_eq!(size_of::<PointVertex>(), 48);
        let v = point().vertex(7);
        assert_eq!(v.index, 7.0);
    }
}
