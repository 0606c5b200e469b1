//! Amplitude grids: a statevector or unitary drawn as squares whose side is
//! proportional to each amplitude's magnitude.
//!
//! Zero amplitudes still get a cell (marked non-drawable) so that indices and
//! geometry stay put when the state changes underneath.

use crate::core::{BellError, Result, StateVector, UnitaryMatrix, basis_labels};
use num_complex::Complex;

/// One amplitude of a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    /// Row index (output basis state for matrices, basis state for vectors).
    pub row: usize,
    /// Column index (input basis state for matrices, always 0 for vectors).
    pub column: usize,
    /// Basis label of the amplitude; `"out<-in"` for matrix entries.
    pub label: String,
    /// `|amplitude|`, in [0, 1].
    pub size_fraction: f64,
}

impl GridCell {
    /// Whether the cell has any area to draw.
    pub fn is_drawable(&self) -> bool {
        self.size_fraction > 0.0
    }

    /// Square occupied by the cell under `geometry`.
    pub fn rect(&self, geometry: &GridGeometry) -> CellRect {
        CellRect {
            x: geometry.x_offset + (self.column + 1) as f64 * geometry.cell_pitch,
            y: geometry.y_offset + (self.row + 1) as f64 * geometry.cell_pitch,
            size: self.size_fraction * geometry.cell_pitch,
        }
    }
}

/// Placement of a grid: top-left offset and the fixed distance between cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Left edge of the grid (where row labels go).
    pub x_offset: f64,
    /// Top edge of the grid (where column labels go).
    pub y_offset: f64,
    /// Distance between neighbouring cells; a full-magnitude cell is this wide.
    pub cell_pitch: f64,
}

/// Top-left corner and side length of a drawn cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Side of the square.
    pub size: f64,
}

/// A row or column caption and where it is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLabel {
    /// Basis label text.
    pub text: String,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
}

/// Cells of a mapped statevector or matrix plus their captions.
#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudeGrid {
    rows: usize,
    columns: usize,
    cells: Vec<GridCell>,
    row_labels: Vec<String>,
    column_labels: Vec<String>,
}

impl AmplitudeGrid {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Cell at (row, column).
    pub fn cell(&self, row: usize, column: usize) -> Option<&GridCell> {
        if row < self.rows && column < self.columns {
            self.cells.get(row * self.columns + column)
        } else {
            None
        }
    }

    /// Cells with non-zero area.
    pub fn drawable_cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().filter(|c| c.is_drawable())
    }

    /// Row captions, top to bottom.
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// Column captions, left to right; empty for a statevector grid.
    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    /// Captions placed once per row (in the left margin) and once per column
    /// (in the top margin).
    pub fn labels(&self, geometry: &GridGeometry) -> Vec<GridLabel> {
        let pitch = geometry.cell_pitch;
        let rows = self.row_labels.iter().enumerate().map(|(r, text)| GridLabel {
            text: text.clone(),
            x: geometry.x_offset,
            y: geometry.y_offset + (r + 1) as f64 * pitch,
        });
        let columns = self.column_labels.iter().enumerate().map(|(c, text)| GridLabel {
            text: text.clone(),
            x: geometry.x_offset + (c + 1) as f64 * pitch,
            y: geometry.y_offset,
        });
        rows.chain(columns).collect()
    }

    /// Width and height the grid needs, label margins included.
    pub fn extent(&self, cell_pitch: u32) -> (u32, u32) {
        (
            (self.columns as u32 + 1) * cell_pitch,
            (self.rows as u32 + 1) * cell_pitch,
        )
    }
}

/// Size fraction for a raw magnitude.
///
/// # Errors
/// `InvalidAmplitude` for a negative or non-finite magnitude. A correct
/// simulator never produces one, so this is reported rather than clamped away.
pub fn size_fraction(magnitude: f64) -> Result<f64> {
    if !magnitude.is_finite() || magnitude < 0.0 {
        return Err(BellError::InvalidAmplitude {
            message: format!("magnitude {} is not a finite non-negative number", magnitude),
        });
    }
    Ok(magnitude.min(1.0))
}

fn cell_for(row: usize, column: usize, label: String, amplitude: Complex<f64>) -> Result<GridCell> {
    Ok(GridCell {
        row,
        column,
        label,
        size_fraction: size_fraction(amplitude.norm())?,
    })
}

/// Maps a statevector to a single-column grid, one row per basis label.
pub fn map_vector(state: &StateVector) -> Result<AmplitudeGrid> {
    let labels = basis_labels(state.num_qubits());
    let cells = state
        .amplitudes()
        .iter()
        .zip(labels.iter())
        .enumerate()
        .map(|(row, (amp, label))| cell_for(row, 0, label.clone(), *amp))
        .collect::<Result<Vec<_>>>()?;
    Ok(AmplitudeGrid {
        rows: cells.len(),
        columns: 1,
        cells,
        row_labels: labels,
        column_labels: Vec::new(),
    })
}

/// Maps a unitary to a square grid: rows are output basis states, columns
/// input basis states.
pub fn map_matrix(unitary: &UnitaryMatrix) -> Result<AmplitudeGrid> {
    let labels = basis_labels(unitary.num_qubits());
    let dim = unitary.dim();
    let mut cells = Vec::with_capacity(dim * dim);
    for (row, entries) in unitary.rows().enumerate() {
        for (column, amp) in entries.iter().enumerate() {
            let label = format!("{}<-{}", labels[row], labels[column]);
            cells.push(cell_for(row, column, label, *amp)?);
        }
    }
    Ok(AmplitudeGrid {
        rows: dim,
        columns: dim,
        cells,
        row_labels: labels.clone(),
        column_labels: labels,
    })
}
