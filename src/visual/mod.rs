//! Rendering-agnostic visual primitives.
//!
//! Everything in here produces plain data (cells, bars, points, panel
//! rectangles, opaque images); nothing draws. A surface in `app::surface`
//! turns these into pixels or terminal cells.

pub mod grid;
pub mod histogram;
pub mod layout;
pub mod sphere;

pub use grid::{AmplitudeGrid, CellRect, GridCell, GridGeometry, GridLabel, map_matrix, map_vector};
pub use histogram::{HistogramBar, histogram_bars, plot_histogram};
pub use layout::{Axis, LayoutEngine, Panel, PanelContent, PanelGroup};
pub use sphere::{SpherePoint, plot_qsphere, qsphere_points};

/// An opaque raster handed over by a plotting call, with its extent.
///
/// The bundled plotters rasterize to text: `data` holds UTF-8 lines separated
/// by `\n`, `width` is the widest line in characters and `height` the number
/// of lines. Surfaces only rely on `width`/`height` for placement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    /// Width in surface units.
    pub width: u32,
    /// Height in surface units.
    pub height: u32,
    /// Raw image bytes.
    pub data: Vec<u8>,
}

impl Image {
    /// Measures a block of text and wraps it as an image.
    pub fn from_text(text: &str) -> Self {
        let text = text.trim_end_matches('\n');
        let width = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        let height = if text.is_empty() { 0 } else { text.lines().count() };
        Self {
            width: width as u32,
            height: height as u32,
            data: text.as_bytes().to_vec(),
        }
    }

    /// Lines of a text raster; empty when the bytes are not UTF-8.
    pub fn text_lines(&self) -> Vec<&str> {
        std::str::from_utf8(&self.data).map(|s| s.lines().collect()).unwrap_or_default()
    }
}
