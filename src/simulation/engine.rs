// src/simulation/engine.rs
use crate::core::{BellError, QubitId, Result, StateVector};
use crate::operations::GateOp;
use num_complex::Complex;
use num_traits::Zero;
use std::f64::consts::FRAC_1_SQRT_2;

type Matrix2 = [[Complex<f64>; 2]; 2];
type Matrix4 = [[Complex<f64>; 4]; 4];

/// Statevector engine that evolves a register gate by gate.
/// (Internal visibility)
#[derive(Debug, Clone)]
pub(crate) struct SimulationEngine {
    /// Current state of the register; qubit `q` is bit `q` of an index.
    state: StateVector,
    num_qubits: usize,
}

impl SimulationEngine {
    /// Engine for `num_qubits` qubits starting in |0...0>.
    pub(crate) fn init(num_qubits: usize) -> Result<Self> {
        Self::from_basis_state(num_qubits, 0)
    }

    /// Engine starting in computational basis state `index`.
    pub(crate) fn from_basis_state(num_qubits: usize, index: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(BellError::simulation("cannot initialize simulation engine with zero qubits"));
        }
        let mut state = StateVector::zero_state(num_qubits)
            .map_err(|e| BellError::simulation(format!("register too large: {}", e)))?;
        if index >= state.dim() {
            return Err(BellError::simulation(format!(
                "basis state {} out of range for {} qubits",
                index, num_qubits
            )));
        }
        let amplitudes = state.amplitudes_mut();
        amplitudes[0] = Complex::zero();
        amplitudes[index] = Complex::new(1.0, 0.0);
        Ok(Self { state, num_qubits })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<()> {
        if state.dim() != self.state.dim() {
            return Err(BellError::simulation(format!(
                "cannot set state: provided dimension {} does not match engine dimension {}",
                state.dim(),
                self.state.dim()
            )));
        }
        self.state = state;
        Ok(())
    }

    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    pub(crate) fn into_state(self) -> StateVector {
        self.state
    }

    /// Applies a unitary gate. Measurements are handled by the caller.
    pub(crate) fn apply_operation(&mut self, op: &GateOp) -> Result<()> {
        match op {
            GateOp::X { target } => {
                let bit = self.bit_of(target)?;
                self.apply_single_qubit_gate(bit, &pauli_x_matrix())
            }
            GateOp::H { target } => {
                let bit = self.bit_of(target)?;
                self.apply_single_qubit_gate(bit, &hadamard_matrix())
            }
            GateOp::CX { control, target } => {
                let control_bit = self.bit_of(control)?;
                let target_bit = self.bit_of(target)?;
                if control_bit == target_bit {
                    return Err(BellError::simulation("control and target of CX cannot be the same qubit"));
                }
                self.apply_two_qubit_gate(control_bit, target_bit, &controlled(&pauli_x_matrix()))
            }
            GateOp::Measure { .. } => Err(BellError::simulation(
                "measurement cannot be applied as a unitary step",
            )),
        }
    }

    /// Bit position of a qubit, checked against the register width.
    fn bit_of(&self, qubit: &QubitId) -> Result<usize> {
        let bit = qubit.bit();
        if bit >= self.num_qubits {
            return Err(BellError::simulation(format!(
                "qubit {} not found in a {}-qubit register",
                qubit, self.num_qubits
            )));
        }
        Ok(bit)
    }

    /// Applies a 2x2 matrix to the qubit at bit position `k`.
    fn apply_single_qubit_gate(&mut self, k: usize, matrix: &Matrix2) -> Result<()> {
        let k_mask = 1usize << k;
        let lower_mask = k_mask - 1;

        let dim = self.state.dim();
        let amplitudes = self.state.amplitudes_mut();

        // Each i enumerates one pair of basis states differing only at bit k.
        for i in 0..dim / 2 {
            let i0 = ((i & !lower_mask) << 1) | (i & lower_mask);
            let i1 = i0 | k_mask;

            let psi_0 = amplitudes[i0];
            let psi_1 = amplitudes[i1];
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
        Ok(())
    }

    /// Applies a 4x4 matrix written in the |first, second> basis
    /// (|00>, |01>, |10>, |11>) to the qubits at bit positions `first` and `second`.
    fn apply_two_qubit_gate(&mut self, first: usize, second: usize, matrix: &Matrix4) -> Result<()> {
        if first == second {
            return Err(BellError::simulation("target bits for a two-qubit gate cannot be the same"));
        }
        let first_mask = 1usize << first;
        let second_mask = 1usize << second;
        let both = first_mask | second_mask;

        let dim = self.state.dim();
        let amplitudes = self.state.amplitudes_mut();

        for base in (0..dim).filter(|idx| idx & both == 0) {
            let indices = [
                base,
                base | second_mask,
                base | first_mask,
                base | first_mask | second_mask,
            ];

            let mut psi = [Complex::zero(); 4];
            for (slot, idx) in psi.iter_mut().zip(indices.iter()) {
                *slot = amplitudes[*idx];
            }

            for (row, idx) in indices.iter().enumerate() {
                let mut acc = Complex::zero();
                for (col, value) in psi.iter().enumerate() {
                    acc += matrix[row][col] * *value;
                }
                amplitudes[*idx] = acc;
            }
        }
        Ok(())
    }
}

fn pauli_x_matrix() -> Matrix2 {
    [
        [Complex::zero(), Complex::new(1.0, 0.0)],
        [Complex::new(1.0, 0.0), Complex::zero()],
    ]
}

fn hadamard_matrix() -> Matrix2 {
    [
        [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(FRAC_1_SQRT_2, 0.0)],
        [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(-FRAC_1_SQRT_2, 0.0)],
    ]
}

/// Controlled-U in the |control, target> basis: identity on the control-|0>
/// block, `u` on the control-|1> block.
fn controlled(u: &Matrix2) -> Matrix4 {
    let one = Complex::new(1.0, 0.0);
    let zero = Complex::zero();
    [
        [one, zero, zero, zero],
        [zero, one, zero, zero],
        [zero, zero, u[0][0], u[0][1]],
        [zero, zero, u[1][0], u[1][1]],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TOLERANCE: f64 = 1e-9;

    fn q(id: u64) -> QubitId {
        QubitId(id)
    }

    fn assert_complex_vec_approx_equal(actual: &[Complex<f64>], expected: &[Complex<f64>], context: &str) {
        assert_eq!(actual.len(), expected.len(), "Vector length mismatch - {}", context);
        for i in 0..actual.len() {
            let dist_sq = (actual[i] - expected[i]).norm_sqr();
            assert!(
                dist_sq < TEST_TOLERANCE * TEST_TOLERANCE,
                "Vector mismatch at index {} - Actual: {}, Expected: {}, Context: {}",
                i,
                actual[i],
                expected[i],
                context
            );
        }
    }

    #[test]
    fn x_on_q0_sets_least_significant_bit() -> Result<()> {
        let mut engine = SimulationEngine::init(2)?;
        engine.apply_operation(&GateOp::X { target: q(0) })?;
        // |q1 q0> = |01> -> index 1
        let zero = Complex::zero();
        let one = Complex::new(1.0, 0.0);
        assert_complex_vec_approx_equal(engine.state().amplitudes(), &[zero, one, zero, zero], "X(q0)");
        Ok(())
    }

    #[test]
    fn x_on_q1_sets_most_significant_bit() -> Result<()> {
        let mut engine = SimulationEngine::init(2)?;
        engine.apply_operation(&GateOp::X { target: q(1) })?;
        assert_eq!(engine.state().amplitude("10"), Some(Complex::new(1.0, 0.0)));
        Ok(())
    }

    #[test]
    fn hadamard_on_one_state_gives_minus() -> Result<()> {
        let mut engine = SimulationEngine::from_basis_state(1, 1)?;
        engine.apply_operation(&GateOp::H { target: q(0) })?;
        let expected = [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(-FRAC_1_SQRT_2, 0.0)];
        assert_complex_vec_approx_equal(engine.state().amplitudes(), &expected, "H|1>");
        Ok(())
    }

    #[test]
    fn cx_flips_target_only_when_control_set() -> Result<()> {
        let mut engine = SimulationEngine::init(2)?;
        engine.apply_operation(&GateOp::CX { control: q(0), target: q(1) })?;
        assert_eq!(engine.state().amplitude("00"), Some(Complex::new(1.0, 0.0)));

        let mut engine = SimulationEngine::from_basis_state(2, 1)?; // q0 = 1
        engine.apply_operation(&GateOp::CX { control: q(0), target: q(1) })?;
        assert_eq!(engine.state().amplitude("11"), Some(Complex::new(1.0, 0.0)));
        Ok(())
    }

    #[test]
    fn cx_on_middle_of_three_qubits() -> Result<()> {
        // |q2 q1 q0> = |010>, CX(q1 -> q2) gives |110>
        let mut engine = SimulationEngine::from_basis_state(3, 0b010)?;
        engine.apply_operation(&GateOp::CX { control: q(1), target: q(2) })?;
        assert_eq!(engine.state().amplitude("110"), Some(Complex::new(1.0, 0.0)));
        Ok(())
    }

    #[test]
    fn cx_with_same_qubit_is_rejected() -> Result<()> {
        let mut engine = SimulationEngine::init(2)?;
        let err = engine.apply_operation(&GateOp::CX { control: q(1), target: q(1) });
        assert!(matches!(err, Err(BellError::SimulationFailure { .. })));
        Ok(())
    }

    #[test]
    fn gate_outside_register_is_rejected() -> Result<()> {
        let mut engine = SimulationEngine::init(2)?;
        assert!(engine.apply_operation(&GateOp::H { target: q(2) }).is_err());
        Ok(())
    }

    #[test]
    fn measurement_is_not_a_unitary_step() -> Result<()> {
        let mut engine = SimulationEngine::init(1)?;
        assert!(engine.apply_operation(&GateOp::Measure { targets: vec![q(0)] }).is_err());
        Ok(())
    }

    #[test]
    fn set_state_checks_dimension() -> Result<()> {
        let mut engine = SimulationEngine::init(2)?;
        let wrong = StateVector::new(vec![Complex::zero(); 2])?;
        assert!(engine.set_state(wrong).is_err());
        let right = StateVector::new(vec![Complex::new(0.5, 0.0); 4])?;
        engine.set_state(right.clone())?;
        assert_eq!(engine.into_state(), right);
        Ok(())
    }
}
