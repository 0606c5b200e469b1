// src/validation/mod.rs

//! Numeric sanity checks on simulation artifacts.
//!
//! A broken artifact is reported as [`BellError::SimulationFailure`] so that
//! the view that asked for it fails loudly instead of drawing garbage.

use crate::core::{BellError, Result, StateVector, UnitaryMatrix};
use num_complex::Complex;
use num_traits::Zero;

const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Checks that the squared magnitudes of `state` sum to 1 within `tolerance`
/// (default 1e-9).
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq: f64 = state.amplitudes().iter().map(|c| c.norm_sqr()).sum();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(BellError::simulation(format!(
            "state vector is not normalized: sum(|c_i|^2) = {} (deviation > {})",
            norm_sq, effective_tolerance
        )))
    } else {
        Ok(())
    }
}

/// Checks that `u` is unitary: every pair of columns has inner product
/// δ_ij within `tolerance` (default 1e-9).
pub fn check_unitary(u: &UnitaryMatrix, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let dim = u.dim();
    let columns: Vec<Vec<Complex<f64>>> = (0..dim).map(|j| u.column(j)).collect();

    for i in 0..dim {
        for j in i..dim {
            let inner = columns[i]
                .iter()
                .zip(columns[j].iter())
                .fold(Complex::zero(), |acc: Complex<f64>, (a, b)| acc + a.conj() * b);
            let expected = if i == j { Complex::new(1.0, 0.0) } else { Complex::zero() };
            let deviation = (inner - expected).norm();
            if deviation > effective_tolerance {
                return Err(BellError::simulation(format!(
                    "matrix is not unitary: <col {}|col {}> = {:.6} (deviation {:.3e} > {})",
                    i, j, inner, deviation, effective_tolerance
                )));
            }
        }
    }
    Ok(())
}
