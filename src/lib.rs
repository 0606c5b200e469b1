// src/lib.rs

//! `bellview` - an interactive explorer for the four two-qubit Bell states.
//!
//! The library turns a compact [`BellStateSelector`] into a circuit, simulates
//! it, and maps the numeric artifacts (statevector, unitary, measurement
//! counts) onto drawable primitives: amplitude grids, histogram bars,
//! q-sphere points and panel rectangles. The binary cycles through the four
//! states on key presses and redraws every view.

pub mod app;
pub mod circuits;
pub mod core;
pub mod operations;
pub mod simulation;
pub mod validation;
pub mod visual;

// Re-export the most common types for easier top-level use
pub use circuits::{Circuit, CircuitBuilder, build_bell_circuit};
pub use core::{BellError, BellStateSelector, QubitId, Result, Stage, StateVector, UnitaryMatrix};
pub use operations::GateOp;
pub use simulation::{MeasurementCounts, Simulator, SimulatorConfig, StateSimulationAdapter};
pub use validation::{check_normalization, check_unitary};

// Example: Φ+ from the recipe circuit.
/// ```
/// use bellview::{BellStateSelector, Simulator, StateSimulationAdapter, build_bell_circuit};
///
/// let circuit = build_bell_circuit(BellStateSelector::PhiPlus);
/// let mut simulator = Simulator::with_seed(7);
///
/// let state = simulator.simulate_statevector(&circuit)?;
/// let h = std::f64::consts::FRAC_1_SQRT_2;
/// assert!((state.amplitude("00").unwrap().re - h).abs() < 1e-12);
/// assert!((state.amplitude("11").unwrap().re - h).abs() < 1e-12);
/// assert!(state.amplitude("01").unwrap().norm() < 1e-12);
///
/// let counts = simulator.simulate_measurements(&circuit, 100)?;
/// assert_eq!(counts.get("00") + counts.get("11"), 100);
/// # Ok::<(), bellview::BellError>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
