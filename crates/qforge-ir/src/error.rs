//! Error types for the IR crate.

use qforge_qis::QisError;
use thiserror::Error;

/// Broad category of an [`IrError`], for callers that branch on the kind of
/// failure rather than the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value could not be constructed from the given shape or arguments.
    Construction,
    /// A value is numerically or semantically invalid.
    Value,
    /// A parameter vector or index does not fit.
    ParameterMismatch,
    /// A circuit mutation addressed something that does not exist.
    Structural,
    /// The gate lacks the requested capability.
    Capability,
}

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A value type rejected its input.
    #[error(transparent)]
    Qis(#[from] QisError),

    /// Parameter vector has the wrong length.
    #[error("'{name}' expects {expected} parameters, got {got}")]
    ParameterMismatch {
        /// Name of the gate or circuit.
        name: String,
        /// Expected number of parameters.
        expected: usize,
        /// Number of parameters provided.
        got: usize,
    },

    /// Parameter index past the end of the parameter vector.
    #[error("Parameter index {index} is out of range for {num_params} parameters")]
    ParamIndexOutOfRange { index: usize, num_params: usize },

    /// Location length differs from gate size.
    #[error("Gate '{gate}' acts on {expected} qudits, got a location of {got}")]
    LocationSizeMismatch {
        gate: String,
        expected: usize,
        got: usize,
    },

    /// Location is empty.
    #[error("Location must reference at least one qudit")]
    EmptyLocation,

    /// Location repeats a qudit.
    #[error("Duplicate qudit {qudit} in location")]
    DuplicateQudit { qudit: usize },

    /// Qudit index past the end of the register.
    #[error("Qudit {qudit} is out of range for a register of {size} qudits")]
    QuditOutOfRange { qudit: usize, size: usize },

    /// Register radix differs from the gate radix at a location position.
    #[error(
        "Gate '{gate}' expects radix {expected} at location position {position}, \
         but qudit {qudit} has radix {got}"
    )]
    RadixMismatch {
        gate: String,
        position: usize,
        qudit: usize,
        expected: usize,
        got: usize,
    },

    /// A circuit needs at least one qudit.
    #[error("Circuit must contain at least one qudit")]
    EmptyCircuit,

    /// Radix vector length disagrees with the qudit count.
    #[error("Expected {expected} radixes, got {got}")]
    RadixCountMismatch { expected: usize, got: usize },

    /// More fixed parameters than the subgate has.
    #[error("Cannot fix {got} parameters of '{gate}', which has only {max}")]
    TooManyFixedParams { gate: String, max: usize, got: usize },

    /// Fixed parameter index past the subgate's parameter count.
    #[error("Fixed parameter index {index} is out of range for '{gate}' with {num_params} parameters")]
    FixedParamIndexOutOfRange {
        gate: String,
        index: usize,
        num_params: usize,
    },

    /// Variable-location gate built without candidates.
    #[error("Variable location gate requires at least one candidate location")]
    NoCandidateLocations,

    /// Candidate location length differs from subgate size.
    #[error("Candidate location {location:?} has {got} qudits, '{gate}' acts on {expected}")]
    CandidateSizeMismatch {
        gate: String,
        location: Vec<usize>,
        expected: usize,
        got: usize,
    },

    /// Two candidates assign different radixes to the same qudit.
    #[error("Candidate locations disagree on the radix of qudit {qudit}: {first} vs {second}")]
    CandidateRadixMismatch {
        qudit: usize,
        first: usize,
        second: usize,
    },

    /// A qudit below the largest referenced index appears in no candidate.
    #[error("Qudit {qudit} is not referenced by any candidate location")]
    UnreferencedQudit { qudit: usize },

    /// Environment matrix does not match the gate dimension.
    #[error("Environment matrix is {rows}x{cols}, '{gate}' has dimension {dim}")]
    EnvironmentMismatch {
        gate: String,
        rows: usize,
        cols: usize,
        dim: usize,
    },

    /// Configuration failed to parse or validate.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Cycle index past the end of the circuit.
    #[error("Cycle {cycle} does not exist in a circuit of {num_cycles} cycles")]
    CycleOutOfRange { cycle: usize, num_cycles: usize },

    /// No operation touches the given point.
    #[error("No operation at cycle {cycle}, qudit {qudit}")]
    NoOperationAt { cycle: usize, qudit: usize },

    /// Gate to remove is not in the circuit.
    #[error("Gate '{gate}' is not present in the circuit")]
    GateNotFound { gate: String },

    /// Circuit bookkeeping is inconsistent.
    #[error("Circuit integrity violated: {0}")]
    IntegrityViolation(String),

    /// Gate has no analytic gradient.
    #[error("Gate '{gate}' is not differentiable")]
    NotDifferentiable { gate: String },

    /// Gate has no local optimizer.
    #[error("Gate '{gate}' does not support local optimization")]
    NotOptimizable { gate: String },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;

impl IrError {
    /// The broad category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IrError::Qis(e) if e.is_construction() => ErrorKind::Construction,
            IrError::Qis(_) => ErrorKind::Value,
            IrError::ParameterMismatch { .. } | IrError::ParamIndexOutOfRange { .. } => {
                ErrorKind::ParameterMismatch
            }
            IrError::LocationSizeMismatch { .. }
            | IrError::EmptyLocation
            | IrError::DuplicateQudit { .. }
            | IrError::QuditOutOfRange { .. }
            | IrError::EmptyCircuit
            | IrError::RadixCountMismatch { .. }
            | IrError::TooManyFixedParams { .. }
            | IrError::FixedParamIndexOutOfRange { .. }
            | IrError::NoCandidateLocations
            | IrError::CandidateSizeMismatch { .. } => ErrorKind::Construction,
            IrError::RadixMismatch { .. }
            | IrError::CandidateRadixMismatch { .. }
            | IrError::UnreferencedQudit { .. }
            | IrError::EnvironmentMismatch { .. }
            | IrError::InvalidConfig(_) => ErrorKind::Value,
            IrError::CycleOutOfRange { .. }
            | IrError::NoOperationAt { .. }
            | IrError::GateNotFound { .. }
            | IrError::IntegrityViolation(_) => ErrorKind::Structural,
            IrError::NotDifferentiable { .. } | IrError::NotOptimizable { .. } => {
                ErrorKind::Capability
            }
        }
    }
}
