// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod selector;
pub mod state;

pub use error::{BellError, QubitId, Result, Stage};
pub use selector::BellStateSelector;
pub use state::{StateVector, UnitaryMatrix, basis_label, basis_labels};

pub mod constants;
pub use constants::bell_constants::{FRAC_1_SQRT_2, NUM_QUBITS, PI};
