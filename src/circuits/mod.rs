// src/circuits/mod.rs

//! Ordered sequences of [`GateOp`]s and the Bell-state recipe that builds them.
//!
//! A [`Circuit`] is immutable once built: the explorer produces a fresh one for
//! every selector change and drops it once the simulation artifacts exist.

pub mod bell;

pub use bell::build_bell_circuit;

use crate::core::QubitId;
use crate::operations::GateOp;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// An ordered list of gate operations applied to a set of qubits.
#[derive(Clone, PartialEq, Eq)]
pub struct Circuit {
    /// Every qubit mentioned by any operation, in ascending order.
    qubits: BTreeSet<QubitId>,

    /// The operations in application order.
    operations: Vec<GateOp>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self {
            qubits: BTreeSet::new(),
            operations: Vec::new(),
        }
    }

    /// Appends an operation, registering the qubits it touches.
    pub fn add_operation(&mut self, op: GateOp) {
        self.qubits.extend(op.involved_qubits());
        self.operations.push(op);
    }

    /// Appends every operation of `ops` in order.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = GateOp>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// The set of qubits involved in this circuit.
    pub fn qubits(&self) -> &BTreeSet<QubitId> {
        &self.qubits
    }

    /// Width of the register the circuit needs: highest qubit id + 1.
    pub fn num_qubits(&self) -> usize {
        self.qubits.iter().next_back().map_or(0, |q| q.bit() + 1)
    }

    /// The operations in application order.
    pub fn operations(&self) -> &[GateOp] {
        &self.operations
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Whether any operation is a measurement.
    pub fn has_measurement(&self) -> bool {
        self.operations.iter().any(GateOp::is_measurement)
    }

    /// A copy of this circuit followed by a measurement of every qubit of the
    /// register into a classical register of the same width.
    pub fn with_terminal_measurement(&self) -> Circuit {
        let mut measured = self.clone();
        let targets: Vec<QubitId> = (0..self.num_qubits() as u64).map(QubitId).collect();
        measured.add_operation(GateOp::Measure { targets });
        measured
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Fluent helper for constructing [`Circuit`]s.
#[derive(Default)]
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single operation.
    pub fn add_op(mut self, op: GateOp) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Adds multiple operations in order.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = GateOp>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Finalizes the circuit.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

/// Renders the circuit as a text diagram, one row per qubit.
///
/// ```text
/// q0: ───X─────H─────@───
///                    │
/// q1: ───X───────────X───
/// ```
impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return writeln!(f, "(empty circuit)");
        }

        let ops = &self.operations;
        let num_ops = ops.len();

        // Draw every wire of the register, including idle ones.
        let rows: Vec<QubitId> = (0..self.num_qubits() as u64).map(QubitId).collect();
        let num_rows = rows.len();
        let qubit_to_row: HashMap<QubitId, usize> = rows.iter().enumerate().map(|(i, q)| (*q, i)).collect();

        let max_label_width = rows.iter().map(|q| q.to_string().len()).max().unwrap_or(0);
        let label_padding = " ".repeat(max_label_width + 2);

        const GATE_WIDTH: usize = 7;
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // op_grid[row][time]: gate or wire segment
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_rows];
        // v_connect[row][time]: connector drawn below `row`
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_rows];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre_dashes),
                    symbol,
                    H_WIRE.to_string().repeat(post_dashes)
                )
            }
        }

        for (t, op) in ops.iter().enumerate() {
            match op {
                GateOp::X { target } | GateOp::H { target } => {
                    if let Some(r) = qubit_to_row.get(target) {
                        op_grid[*r][t] = format_gate(op.symbol());
                    }
                }
                GateOp::CX { control, target } => {
                    if let (Some(r_ctrl), Some(r_tgt)) = (qubit_to_row.get(control), qubit_to_row.get(target)) {
                        op_grid[*r_ctrl][t] = format_gate("@");
                        op_grid[*r_tgt][t] = format_gate(op.symbol());

                        let r_min = (*r_ctrl).min(*r_tgt);
                        let r_max = (*r_ctrl).max(*r_tgt);
                        for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                            row_vec[t] = V_WIRE;
                        }
                    }
                }
                GateOp::Measure { targets } => {
                    for target in targets {
                        if let Some(r) = qubit_to_row.get(target) {
                            op_grid[*r][t] = format_gate(op.symbol());
                        }
                    }
                }
            }
        }

        for r in 0..num_rows {
            let label = format!("{}: ", rows[r]);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_rows - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
