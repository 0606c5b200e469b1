//! Numeric constants shared by the simulator, validation and views.

/// Constants used across the pipeline.
pub mod bell_constants {
    /// Amplitude of each populated basis state in a Bell state.
    pub const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;
    /// Used for phase angles (`e^(iθ)`)
    pub const PI: f64 = std::f64::consts::PI;
    /// Qubits in every circuit the explorer builds.
    pub const NUM_QUBITS: usize = 2;
    /// Tolerance for normalization and unitarity checks.
    pub const NORM_TOLERANCE: f64 = 1e-9;
    /// Probabilities below this are treated as zero.
    pub const AMPLITUDE_TOLERANCE: f64 = 1e-12;
}
