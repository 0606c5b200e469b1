//! Measurement histogram: counts to bars, bars to a text chart.

use super::Image;
use crate::simulation::MeasurementCounts;
use std::fmt::Write as _;

/// Widest bar the text chart draws, in characters.
pub const MAX_BAR_WIDTH: usize = 40;

/// One bar of the measurement histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBar {
    /// Basis label, MSB first.
    pub label: String,
    /// Shots that landed on `label`.
    pub count: u64,
    /// `count / total`, 0 when nothing was recorded.
    pub probability: f64,
}

/// One bar per basis label of an `num_qubits` register, in label order.
/// Labels never observed get a zero bar.
pub fn histogram_bars(counts: &MeasurementCounts, num_qubits: usize) -> Vec<HistogramBar> {
    let total = counts.total();
    counts
        .dense(num_qubits)
        .into_iter()
        .map(|(label, count)| HistogramBar {
            label,
            count,
            probability: if total == 0 { 0.0 } else { count as f64 / total as f64 },
        })
        .collect()
}

/// Renders bars as a text chart, one row per label:
///
/// ```text
/// 00 │████████████████████ 0.502 (514)
/// 01 │ 0.000 (0)
/// ```
pub fn plot_histogram(bars: &[HistogramBar]) -> Image {
    let label_width = bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for bar in bars {
        let length = (bar.probability.clamp(0.0, 1.0) * MAX_BAR_WIDTH as f64).round() as usize;
        // Infallible for String.
        let _ = writeln!(
            out,
            "{:>width$} │{} {:.3} ({})",
            bar.label,
            "█".repeat(length),
            bar.probability,
            bar.count,
            width = label_width
        );
    }
    Image::from_text(&out)
}
