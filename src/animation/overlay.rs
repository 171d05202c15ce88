//! Legend and bin label models, plus when to show them.
//!
//! The crate draws no text; hosts render these over the canvas (SVG, DOM,
//! an egui layer...) using the visibility the controller reports each
//! frame.

use glam::Vec2;

use crate::classify::ClassScheme;
use crate::layout::Bin;
use crate::options::BarOptions;
use crate::util::format;

/// Custom legend text for threshold `index` of `thresholds` (ascending).
pub type LegendFormatter = dyn Fn(usize, &[f64]) -> String;

/// Custom bin label text.
pub type BinLabelFormatter = dyn Fn(&Bin) -> String;

/// One legend row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Threshold the row describes.
    pub threshold: f64,
    /// Swatch color.
    pub color: [f32; 3],
    /// Row text.
    pub label: String,
}

/// `"a - b"` for bounded classes, `"a +"` for the open last one.
#[must_use]
pub fn default_legend_label(index: usize, thresholds: &[f64]) -> String {
    match (thresholds.get(index), thresholds.get(index + 1)) {
        (Some(lo), Some(hi)) => format!("{lo} - {hi}"),
        (Some(lo), None) => format!("{lo} +"),
        _ => String::new(),
    }
}

/// Legend rows, highest class first.
#[must_use]
pub fn legend_entries(
    scheme: &ClassScheme,
    formatter: Option<&LegendFormatter>,
) -> Vec<LegendEntry> {
    let thresholds = scheme.thresholds();
    (0..scheme.len())
        .rev()
        .map(|i| LegendEntry {
            threshold: thresholds[i],
            color: scheme.colors()[i],
            label: formatter.map_or_else(
                || default_legend_label(i, thresholds),
                |f| f(i, thresholds),
            ),
        })
        .collect()
}

/// Text over one histogram bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BinLabel {
    /// Threshold of the bin.
    pub value: f64,
    /// Points in the bin.
    pub count: usize,
    /// Anchor in stage pixels (top-left of the label box).
    pub position: Vec2,
    /// Label text.
    pub text: String,
}

/// Labels for `bins`, anchored above the tallest column of each.
#[must_use]
pub fn bin_labels(
    bins: &[Bin],
    options: &BarOptions,
    formatter: Option<&BinLabelFormatter>,
) -> Vec<BinLabel> {
    bins.iter()
        .map(|bin| BinLabel {
            value: bin.value,
            count: bin.count,
            position: Vec2::new(
                bin.start + bin.width / 2.0 + options.label_offset_x,
                bin.peak_y + options.label_offset_y,
            ),
            text: formatter.map_or_else(
                || format::area_km2(bin.count, options.cell_area),
                |f| f(bin),
            ),
        })
        .collect()
}

/// Which overlays the host should show this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayVisibility {
    /// Legend (map layout, points arrived).
    pub legend: bool,
    /// Bin labels (bars layout, points arrived).
    pub bin_labels: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::scheme;

    #[test]
    fn legend_is_descending_with_open_top() {
        let entries = legend_entries(&scheme(), None);
        let labels: Vec<&str> =
            entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["1000 +", "100 - 1000", "0 - 100"]);
        assert_eq!(entries[0].color, [0.0, 0.0, 1.0]);
        assert_eq!(entries[2].threshold, 0.0);
    }

    #[test]
    fn legend_uses_custom_formatter() {
        let fmt = |i: usize, t: &[f64]| format!("class {i} from {}", t[i]);
        let entries = legend_entries(&scheme(), Some(&fmt));
        assert_eq!(entries[2].label, "class 0 from 0");
    }

    #[test]
    fn bin_labels_sit_above_bars() {
        let bins = vec![Bin {
            value: 100.0,
            width: 200.0,
            start: 300.0,
            count: 1500,
            cols: 100,
            peak_y: 420.0,
        }];
        let labels = bin_labels(&bins, &BarOptions::default(), None);
        // Default offsets are (-40, -20).
        assert_eq!(labels[0].position, Vec2::new(360.0, 400.0));
        assert_eq!(labels[0].text, "7,500km²");

        let custom = |b: &Bin| b.count.to_string();
        let labels = bin_labels(&bins, &BarOptions::default(), Some(&custom));
        assert_eq!(labels[0].text, "1500");
    }
}
