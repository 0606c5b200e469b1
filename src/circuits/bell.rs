//! The fixed recipe that prepares each Bell state from |00>.

use super::{Circuit, CircuitBuilder};
use crate::core::{BellStateSelector, QubitId};
use crate::operations::GateOp;

/// Control qubit of the entangling pair.
pub const Q0: QubitId = QubitId(0);
/// Target qubit of the entangling pair.
pub const Q1: QubitId = QubitId(1);

/// Builds the two-qubit circuit that prepares `selector` from |00>.
///
/// The Pauli flips come first and in this order (X on q0, then X on q1),
/// followed by H(q0) and CX(q0 → q1):
///
/// - Φ+ : H, CX                → (|00> + |11>)/√2
/// - Φ- : X(q0), H, CX         → (|00> - |11>)/√2
/// - Ψ+ : X(q1), H, CX         → (|01> + |10>)/√2
/// - Ψ- : X(q0), X(q1), H, CX  → (|10> - |01>)/√2
///
/// ```
/// use bellview::{BellStateSelector, build_bell_circuit};
///
/// let circuit = build_bell_circuit(BellStateSelector::PsiMinus);
/// assert_eq!(circuit.len(), 4);
/// ```
pub fn build_bell_circuit(selector: BellStateSelector) -> Circuit {
    let mut builder = CircuitBuilder::new();
    if selector.flips_control() {
        builder = builder.add_op(GateOp::X { target: Q0 });
    }
    if selector.flips_target() {
        builder = builder.add_op(GateOp::X { target: Q1 });
    }
    builder
        .add_op(GateOp::H { target: Q0 })
        .add_op(GateOp::CX { control: Q0, target: Q1 })
        .build()
}
