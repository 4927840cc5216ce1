//! Chart geometry shared by the interactive and static renderers.

use crate::stats::CountryCount;
use std::f64::consts::TAU;

/// Slice fill colors, cycled when there are more slices than colors.
pub const PALETTE: [(u8, u8, u8); 10] = [
    (31, 119, 180),  // Blue
    (255, 127, 14),  // Orange
    (44, 160, 44),   // Green
    (214, 39, 40),   // Red
    (148, 103, 189), // Purple
    (140, 86, 75),   // Brown
    (227, 119, 194), // Pink
    (127, 127, 127), // Gray
    (188, 189, 34),  // Olive
    (23, 190, 207),  // Cyan
];

/// One slice of the pie chart. Angles are in radians, counter-clockwise
/// from the positive x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    /// Share of the whole as a label, e.g. "42.86%".
    pub fn percent_label(&self) -> String {
        format!("{:.2}%", self.fraction * 100.0)
    }

    /// Closed outline of the slice: center, arc points, center.
    pub fn outline(&self, center: (f64, f64), radius: f64) -> Vec<(f64, f64)> {
        let sweep = self.end_angle - self.start_angle;
        let steps = ((sweep / TAU) * 128.0).ceil().max(2.0) as usize;

        let mut points = Vec::with_capacity(steps + 3);
        points.push(center);
        for i in 0..=steps {
            let angle = self.start_angle + sweep * i as f64 / steps as f64;
            points.push(polar(center, radius, angle));
        }
        points.push(center);
        points
    }
}

/// Point at `angle` on a circle, y axis pointing up.
pub fn polar(center: (f64, f64), radius: f64, angle: f64) -> (f64, f64) {
    (
        center.0 + radius * angle.cos(),
        center.1 + radius * angle.sin(),
    )
}

/// Split a full circle proportionally to each country's count.
/// Zero-count entries are skipped.
pub fn pie_slices(counts: &[CountryCount]) -> Vec<PieSlice> {
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut start = 0.0;
    counts
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(label, count)| {
            let fraction = *count as f64 / total as f64;
            let end = start + fraction * TAU;
            let slice = PieSlice {
                label: label.clone(),
                count: *count,
                fraction,
                start_angle: start,
                end_angle: end,
            };
            start = end;
            slice
        })
        .collect()
}

/// Padded axis bounds for a series; never a zero-width range.
pub fn padded_range(values: impl IntoIterator<Item = f64>, pad_ratio: f64) -> Option<(f64, f64)> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        })?;

    let span = max - min;
    let pad = if span > 0.0 {
        span * pad_ratio
    } else {
        max.abs().max(1.0) * pad_ratio.max(0.05)
    };
    Some((min - pad, max + pad))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn counts() -> Vec<CountryCount> {
        vec![
            ("United States".to_string(), 4),
            ("India".to_string(), 2),
            ("Japan".to_string(), 1),
        ]
    }

    #[test]
    fn test_pie_slices_cover_full_circle() {
        let slices = pie_slices(&counts());
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].start_angle, 0.0);
        assert!((slices[2].end_angle - TAU).abs() < 1e-9);
        for pair in slices.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
        }

        let total: f64 = slices.iter().map(|s| s.fraction).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_labels_use_two_decimals() {
        let labels: Vec<String> = pie_slices(&counts())
            .iter()
            .map(|s| s.percent_label())
            .collect();
        assert_eq!(labels, vec!["57.14%", "28.57%", "14.29%"]);
    }

    #[test]
    fn test_pie_slices_empty() {
        assert!(pie_slices(&[]).is_empty());
        assert!(pie_slices(&[("Nowhere".to_string(), 0)]).is_empty());
    }

    #[test]
    fn test_outline_starts_and_ends_at_center() {
        let slice = &pie_slices(&counts())[1];
        let outline = slice.outline((0.0, 0.0), 1.0);
        assert_eq!(outline.first(), Some(&(0.0, 0.0)));
        assert_eq!(outline.last(), Some(&(0.0, 0.0)));
        for &(x, y) in &outline[1..outline.len() - 1] {
            assert!(((x * x + y * y).sqrt() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range([90.0, 110.0], 0.1), Some((88.0, 112.0)));
        assert_eq!(padded_range(Vec::<f64>::new(), 0.1), None);

        let (lo, hi) = padded_range([100.0], 0.1).unwrap();
        assert!(lo < 100.0 && hi > 100.0);
    }
}
