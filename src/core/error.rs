//! Error handling logic

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BellError>;

/// Identifier of a qubit wire within a circuit.
/// Qubit `q` is bit `q` of a basis-state index (q0 is the least significant bit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub u64);

impl QubitId {
    /// Bit position of this qubit inside a basis-state index.
    pub fn bit(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Pipeline stage in which a fatal error surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Building the Bell circuit for a selector.
    CircuitBuild,
    /// Running the simulation adapter.
    Simulate,
    /// Turning simulation artifacts into drawable primitives.
    Map,
    /// Handing primitives to the rendering surface.
    Render,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::CircuitBuild => "circuit build",
            Stage::Simulate => "simulate",
            Stage::Map => "map",
            Stage::Render => "render",
        };
        f.write_str(name)
    }
}

/// Failures of the Bell-state pipeline.
///
/// None of these are retried: the causes (missing backend, broken numeric
/// artifact, unwritable scratch location) do not go away on a second attempt,
/// so every variant terminates the run with a diagnostic.
#[derive(Debug, Error)]
pub enum BellError {
    /// The simulation engine could not produce an artifact for a circuit.
    #[error("simulation failure: {message}")]
    SimulationFailure {
        /// SimulationFailure message
        message: String,
    },

    /// A generated image could not be read back from the asset directory.
    #[error("asset load failure ({}): {message}", path.display())]
    AssetLoadFailure {
        /// Location the asset was expected at.
        path: PathBuf,
        /// AssetLoadFailure message
        message: String,
    },

    /// A selector ordinal fell outside 0..3.
    #[error("invalid selector state: ordinal {ordinal} is outside 0..3")]
    InvalidSelectorState {
        /// The offending ordinal.
        ordinal: usize,
    },

    /// An amplitude magnitude was negative or not a number.
    #[error("invalid amplitude: {message}")]
    InvalidAmplitude {
        /// InvalidAmplitude message
        message: String,
    },

    /// A circuit or state was constructed with inconsistent parameters.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// InvalidOperation message
        message: String,
    },

    /// Terminal or filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Another error, tagged with the pipeline stage it came from.
    #[error("{stage} stage failed: {source}")]
    Stage {
        /// Stage that failed.
        stage: Stage,
        /// Underlying cause.
        #[source]
        source: Box<BellError>,
    },
}

impl BellError {
    /// Shorthand for [`BellError::SimulationFailure`].
    pub fn simulation(message: impl Into<String>) -> Self {
        Self::SimulationFailure { message: message.into() }
    }

    /// Shorthand for [`BellError::InvalidOperation`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidOperation { message: message.into() }
    }

    /// Tags the error with the stage it surfaced in. An error that already
    /// carries a stage keeps its original one.
    #[must_use]
    pub fn in_stage(self, stage: Stage) -> Self {
        match self {
            tagged @ BellError::Stage { .. } => tagged,
            other => BellError::Stage { stage, source: Box::new(other) },
        }
    }

    /// Stage the error was tagged with, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            BellError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
