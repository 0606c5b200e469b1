// src/operations/mod.rs

//! Gate operations that make up a circuit.
//!
//! The explorer only needs the three gates of the Bell recipe plus a terminal
//! measurement, so the gate set is closed: every variant has a fixed matrix
//! (see `simulation::engine`) and a fixed diagram symbol.

use crate::core::QubitId;
use std::fmt;

/// A single step of a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GateOp {
    /// Pauli-X (bit flip) on one qubit.
    X {
        /// Qubit that is flipped.
        target: QubitId,
    },

    /// Hadamard on one qubit, mapping |0> to (|0> + |1>)/√2.
    H {
        /// Qubit that is put into superposition.
        target: QubitId,
    },

    /// Controlled-X: flips `target` when `control` is |1>.
    CX {
        /// Qubit whose value gates the flip.
        control: QubitId,
        /// Qubit that is flipped.
        target: QubitId,
    },

    /// Measurement of `targets` into a classical register of the same width.
    /// Only valid as the last operation of a circuit handed to sampling.
    Measure {
        /// Qubits measured, in classical-bit order.
        targets: Vec<QubitId>,
    },
}

impl GateOp {
    /// All qubits directly mentioned by the operation.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            GateOp::X { target } | GateOp::H { target } => vec![*target],
            GateOp::CX { control, target } => vec![*control, *target],
            GateOp::Measure { targets } => targets.clone(),
        }
    }

    /// Symbol drawn in the circuit diagram on the gate's target wire.
    pub fn symbol(&self) -> &'static str {
        match self {
            GateOp::X { .. } => "X",
            GateOp::H { .. } => "H",
            GateOp::CX { .. } => "X",
            GateOp::Measure { .. } => "M",
        }
    }

    /// Whether this operation is a measurement.
    pub fn is_measurement(&self) -> bool {
        matches!(self, GateOp::Measure { .. })
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateOp::X { target } => write!(f, "X({})", target),
            GateOp::H { target } => write!(f, "H({})", target),
            GateOp::CX { control, target } => write!(f, "CX({}, {})", control, target),
            GateOp::Measure { targets } => {
                let names: Vec<String> = targets.iter().map(|q| q.to_string()).collect();
                write!(f, "Measure({})", names.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn involved_qubits_lists_control_first() {
        let op = GateOp::CX { control: QubitId(0), target: QubitId(1) };
        assert_eq!(op.involved_qubits(), vec![QubitId(0), QubitId(1)]);
        assert_eq!(op.to_string(), "CX(q0, q1)");
    }

    #[test]
    fn only_measure_is_measurement() {
        assert!(GateOp::Measure { targets: vec![QubitId(0)] }.is_measurement());
        assert!(!GateOp::H { target: QubitId(0) }.is_measurement());
    }
}
