// src/simulation/mod.rs

//! Turns a [`Circuit`] into the numeric artifacts the views consume.
//!
//! [`StateSimulationAdapter`] is the seam the rest of the crate depends on;
//! [`Simulator`] is the bundled statevector implementation built on the
//! internal `SimulationEngine`.

mod results;
pub(crate) mod engine;

pub use results::MeasurementCounts;

use crate::circuits::Circuit;
use crate::core::constants::bell_constants::{AMPLITUDE_TOLERANCE, NORM_TOLERANCE};
use crate::core::{BellError, QubitId, Result, StateVector, UnitaryMatrix, basis_label};
use crate::operations::GateOp;
use crate::validation::{check_normalization, check_unitary};
use engine::SimulationEngine;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Capabilities the explorer needs from a simulation backend.
///
/// Every failure (engine unavailable, invalid circuit, invalid shot count) is a
/// [`BellError::SimulationFailure`]; callers do not retry.
pub trait StateSimulationAdapter {
    /// Final state of `circuit` applied to |0...0>.
    fn simulate_statevector(&self, circuit: &Circuit) -> Result<StateVector>;

    /// Matrix of the linear map `circuit` implements.
    fn simulate_unitary(&self, circuit: &Circuit) -> Result<UnitaryMatrix>;

    /// Runs `circuit` followed by a measurement of every qubit into a
    /// same-width classical register, `shots` times.
    fn simulate_measurements(&mut self, circuit: &Circuit, shots: u64) -> Result<MeasurementCounts>;
}

/// Settings for the bundled simulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Seed for measurement sampling. `None` draws one from the OS.
    pub seed: Option<u64>,
}

/// Statevector simulator backing the explorer's views.
#[derive(Debug)]
pub struct Simulator {
    rng: StdRng,
    seed: u64,
}

impl Simulator {
    /// Creates a simulator with an OS-drawn sampling seed.
    pub fn new() -> Self {
        Self::with_config(SimulatorConfig::default())
    }

    /// Creates a simulator whose sampling is reproducible from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(SimulatorConfig { seed: Some(seed) })
    }

    /// Creates a simulator from explicit settings.
    pub fn with_config(config: SimulatorConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed the sampler was started from; log it to reproduce a run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Applies every unitary step of `circuit` to an engine.
    fn evolve(engine: &mut SimulationEngine, circuit: &Circuit) -> Result<()> {
        for op in circuit.operations() {
            engine.apply_operation(op)?;
        }
        Ok(())
    }

    fn register_width(circuit: &Circuit) -> Result<usize> {
        match circuit.num_qubits() {
            0 => Err(BellError::simulation("circuit acts on no qubits")),
            n => Ok(n),
        }
    }

    /// Draws `shots` outcomes of `targets` from `state`.
    fn sample(&mut self, state: &StateVector, targets: &[QubitId], shots: u64) -> Result<MeasurementCounts> {
        let probabilities = state.probabilities();
        let total: f64 = probabilities.iter().sum();
        if total < AMPLITUDE_TOLERANCE {
            return Err(BellError::simulation("cannot sample from a state with zero norm"));
        }

        // Cumulative distribution over basis indices with non-negligible weight.
        let mut cumulative: Vec<(usize, f64)> = Vec::with_capacity(probabilities.len());
        let mut running = 0.0;
        for (k, p) in probabilities.iter().enumerate() {
            if *p > AMPLITUDE_TOLERANCE {
                running += p;
                cumulative.push((k, running));
            }
        }
        let last_index = cumulative.last().map(|(k, _)| *k).unwrap_or(0);

        let mut counts = MeasurementCounts::new();
        for _ in 0..shots {
            let p_sample: f64 = self.rng.random::<f64>() * running;
            let k = cumulative
                .iter()
                .find(|(_, upper)| p_sample < *upper)
                .map(|(k, _)| *k)
                .unwrap_or(last_index);

            // Classical bit i holds the outcome of targets[i].
            let mut outcome = 0usize;
            for (i, qubit) in targets.iter().enumerate() {
                outcome |= ((k >> qubit.bit()) & 1) << i;
            }
            counts.record(basis_label(outcome, targets.len()));
        }
        Ok(counts)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StateSimulationAdapter for Simulator {
    fn simulate_statevector(&self, circuit: &Circuit) -> Result<StateVector> {
        if circuit.has_measurement() {
            return Err(BellError::simulation("statevector simulation requires a circuit without measurements"));
        }
        let mut engine = SimulationEngine::init(Self::register_width(circuit)?)?;
        Self::evolve(&mut engine, circuit)?;
        let state = engine.into_state();
        check_normalization(&state, Some(NORM_TOLERANCE))?;
        debug!("statevector simulated: {}", state);
        Ok(state)
    }

    fn simulate_unitary(&self, circuit: &Circuit) -> Result<UnitaryMatrix> {
        if circuit.has_measurement() {
            return Err(BellError::simulation("unitary simulation requires a circuit without measurements"));
        }
        let num_qubits = Self::register_width(circuit)?;
        let dim = 1usize << num_qubits;

        // Column j is the circuit applied to basis state |j>.
        let mut columns = Vec::with_capacity(dim);
        for j in 0..dim {
            let mut engine = SimulationEngine::from_basis_state(num_qubits, j)?;
            Self::evolve(&mut engine, circuit)?;
            columns.push(engine.into_state().amplitudes().to_vec());
        }
        let unitary = UnitaryMatrix::from_columns(&columns)
            .map_err(|e| BellError::simulation(format!("could not assemble unitary: {}", e)))?;
        check_unitary(&unitary, Some(NORM_TOLERANCE))?;
        debug!(dim, "unitary simulated");
        Ok(unitary)
    }

    fn simulate_measurements(&mut self, circuit: &Circuit, shots: u64) -> Result<MeasurementCounts> {
        if shots == 0 {
            return Err(BellError::simulation("shot count must be positive"));
        }
        if circuit.has_measurement() {
            return Err(BellError::simulation("circuit already contains a measurement"));
        }
        let measured = circuit.with_terminal_measurement();
        let mut engine = SimulationEngine::init(Self::register_width(&measured)?)?;

        let mut counts = None;
        for op in measured.operations() {
            match op {
                GateOp::Measure { targets } => {
                    counts = Some(self.sample(engine.state(), targets, shots)?);
                }
                _ if counts.is_some() => {
                    return Err(BellError::simulation("operations after the terminal measurement are not supported"));
                }
                _ => engine.apply_operation(op)?,
            }
        }

        let counts = counts.ok_or_else(|| BellError::simulation("measured circuit lost its terminal measurement"))?;
        debug!(shots, total = counts.total(), "measurements sampled");
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitBuilder;

    fn q(id: u64) -> QubitId {
        QubitId(id)
    }

    #[test]
    fn zero_shots_is_a_simulation_failure() {
        let circuit = CircuitBuilder::new().add_op(GateOp::H { target: q(0) }).build();
        let mut sim = Simulator::with_seed(1);
        assert!(matches!(
            sim.simulate_measurements(&circuit, 0),
            Err(BellError::SimulationFailure { .. })
        ));
    }

    #[test]
    fn empty_circuit_is_a_simulation_failure() {
        let sim = Simulator::with_seed(1);
        assert!(sim.simulate_statevector(&Circuit::new()).is_err());
        assert!(sim.simulate_unitary(&Circuit::new()).is_err());
    }

    #[test]
    fn measured_circuit_rejected_for_unitary() {
        let circuit = CircuitBuilder::new()
            .add_op(GateOp::X { target: q(0) })
            .build()
            .with_terminal_measurement();
        let sim = Simulator::with_seed(1);
        assert!(sim.simulate_unitary(&circuit).is_err());
        assert!(sim.simulate_statevector(&circuit).is_err());
    }

    #[test]
    fn basis_state_always_measures_the_same() -> Result<()> {
        let circuit = CircuitBuilder::new().add_op(GateOp::X { target: q(1) }).build();
        let mut sim = Simulator::with_seed(7);
        let counts = sim.simulate_measurements(&circuit, 50)?;
        assert_eq!(counts.get("10"), 50);
        assert_eq!(counts.total(), 50);
        Ok(())
    }

    #[test]
    fn same_seed_same_counts() -> Result<()> {
        let circuit = CircuitBuilder::new().add_op(GateOp::H { target: q(0) }).build();
        let a = Simulator::with_seed(42).simulate_measurements(&circuit, 200)?;
        let b = Simulator::with_seed(42).simulate_measurements(&circuit, 200)?;
        assert_eq!(a, b);
        assert_eq!(Simulator::with_seed(42).seed(), 42);
        Ok(())
    }

    #[test]
    fn hadamard_unitary_entries() -> Result<()> {
        let circuit = CircuitBuilder::new().add_op(GateOp::H { target: q(0) }).build();
        let u = Simulator::with_seed(0).simulate_unitary(&circuit)?;
        assert_eq!(u.dim(), 2);
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let expected = [[h, h], [h, -h]];
        for (row, expected_row) in expected.iter().enumerate() {
            for (col, value) in expected_row.iter().enumerate() {
                let entry = u.get(row, col).expect("entry in range");
                assert!((entry.re - value).abs() < 1e-12 && entry.im.abs() < 1e-12);
            }
        }
        Ok(())
    }
}
