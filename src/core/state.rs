// src/core/state.rs

use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

use super::error::{BellError, Result};

/// Returns the computational-basis label of `index` for a register of
/// `num_qubits` qubits, most significant qubit first ("01" is q1=0, q0=1).
pub fn basis_label(index: usize, num_qubits: usize) -> String {
    format!("{:0width$b}", index, width = num_qubits)
}

/// All basis labels of a register in index order.
pub fn basis_labels(num_qubits: usize) -> Vec<String> {
    (0..1usize << num_qubits).map(|k| basis_label(k, num_qubits)).collect()
}

/// Number of qubits described by a vector of dimension `dim`, if `dim` is a
/// power of two of at least 2.
fn qubits_for_dim(dim: usize) -> Option<usize> {
    if dim >= 2 && dim.is_power_of_two() {
        Some(dim.trailing_zeros() as usize)
    } else {
        None
    }
}

/// Pure state of a qubit register over the computational basis.
///
/// Amplitude `k` belongs to basis label [`basis_label`]`(k, n)`. The vector is
/// not required to be normalized; the simulator validates its own output,
/// and consumers only read raw magnitudes.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl StateVector {
    /// Creates a state from raw amplitudes.
    ///
    /// # Errors
    /// `InvalidOperation` if the length is not a power of two of at least 2.
    pub fn new(amplitudes: Vec<Complex<f64>>) -> Result<Self> {
        let num_qubits = qubits_for_dim(amplitudes.len()).ok_or_else(|| {
            BellError::invalid(format!(
                "state vector length {} is not a power of two >= 2",
                amplitudes.len()
            ))
        })?;
        Ok(Self { amplitudes, num_qubits })
    }

    /// The |0...0> state of `num_qubits` qubits.
    pub fn zero_state(num_qubits: usize) -> Result<Self> {
        let dim = 1usize.checked_shl(num_qubits as u32).filter(|d| *d >= 2).ok_or_else(|| {
            BellError::invalid(format!("cannot build a register of {} qubits", num_qubits))
        })?;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Ok(Self { amplitudes, num_qubits })
    }

    /// Read-only access to the amplitudes.
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Amplitude of the basis state with the given label, if the label exists.
    pub fn amplitude(&self, label: &str) -> Option<Complex<f64>> {
        if label.len() != self.num_qubits {
            return None;
        }
        usize::from_str_radix(label, 2).ok().and_then(|k| self.amplitudes.get(k).copied())
    }

    /// Dimension of the vector (2^n).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Number of qubits described.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Basis labels in amplitude order.
    pub fn labels(&self) -> Vec<String> {
        basis_labels(self.num_qubits)
    }

    /// `|c_k|^2` for every amplitude.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (k, c) in self.amplitudes.iter().enumerate() {
            write!(
                f,
                "{}|{}>: {:.4}",
                if k > 0 { ", " } else { "" },
                basis_label(k, self.num_qubits),
                c
            )?;
        }
        write!(f, "]")
    }
}

/// Matrix of a circuit's linear map on the computational basis.
/// Row index is the output basis state, column index the input basis state.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitaryMatrix {
    /// Row-major entries.
    entries: Vec<Complex<f64>>,
    dim: usize,
    num_qubits: usize,
}

impl UnitaryMatrix {
    /// Builds a matrix from its columns; column `j` is the image of basis state `j`.
    ///
    /// # Errors
    /// `InvalidOperation` if the columns do not form a square 2^n x 2^n matrix.
    pub fn from_columns(columns: &[Vec<Complex<f64>>]) -> Result<Self> {
        let dim = columns.len();
        let num_qubits = qubits_for_dim(dim).ok_or_else(|| {
            BellError::invalid(format!("matrix dimension {} is not a power of two >= 2", dim))
        })?;
        if let Some(bad) = columns.iter().position(|col| col.len() != dim) {
            return Err(BellError::invalid(format!(
                "column {} has length {}, expected {}",
                bad,
                columns[bad].len(),
                dim
            )));
        }
        let mut entries = vec![Complex::zero(); dim * dim];
        for (col, column) in columns.iter().enumerate() {
            for (row, value) in column.iter().enumerate() {
                entries[row * dim + col] = *value;
            }
        }
        Ok(Self { entries, dim, num_qubits })
    }

    /// Builds a matrix from row-major rows.
    pub fn from_rows(rows: &[Vec<Complex<f64>>]) -> Result<Self> {
        let dim = rows.len();
        if rows.iter().any(|row| row.len() != dim) {
            return Err(BellError::invalid("matrix rows must all have the matrix dimension"));
        }
        let columns: Vec<Vec<Complex<f64>>> = (0..dim)
            .map(|col| rows.iter().map(|row| row[col]).collect())
            .collect();
        Self::from_columns(&columns)
    }

    /// Entry at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Option<Complex<f64>> {
        if row < self.dim && col < self.dim {
            Some(self.entries[row * self.dim + col])
        } else {
            None
        }
    }

    /// Side length (2^n).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of qubits described.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Column `col` as a vector (the image of basis state `col`).
    pub fn column(&self, col: usize) -> Vec<Complex<f64>> {
        (0..self.dim).map(|row| self.entries[row * self.dim + col]).collect()
    }

    /// Iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Complex<f64>]> {
        self.entries.chunks(self.dim)
    }
}

impl fmt::Display for UnitaryMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let cells: Vec<String> = row.iter().map(|c| format!("{:.3}", c)).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}
