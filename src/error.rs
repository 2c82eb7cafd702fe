//! Error taxonomy for instance loading, configuration, and the evolutionary run.
//!
//! Capacity overloads are deliberately absent: they are scored as a penalty
//! by the fitness evaluator and never surface as errors.

/// Errors produced by the solver.
#[derive(Debug, thiserror::Error)]
pub enum CvrpError {
    /// Reading the instance or writing a report failed at the OS level.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A token in the instance text could not be parsed as a number.
    #[error("cannot parse {field} from {token:?}")]
    Parse {
        /// Which value was being read.
        field: &'static str,
        /// The offending token.
        token: String,
    },

    /// The instance text ended before all values were read.
    #[error("instance ended while reading {field}")]
    UnexpectedEnd {
        /// Which value was being read.
        field: &'static str,
    },

    /// The instance parsed but describes an unusable problem.
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A chromosome is no longer a permutation of the customer ids.
    #[error("{} is not a permutation: {reason}", slot_name(.index))]
    InvariantViolation {
        /// Population slot of the broken chromosome (`None` for the elite).
        index: Option<usize>,
        /// What is wrong with the gene sequence.
        reason: String,
    },

    /// A driver transition was requested from the wrong phase.
    #[error("driver is {found}, expected {expected}")]
    InvalidPhase {
        /// Phase the transition requires.
        expected: &'static str,
        /// Phase the driver is in.
        found: String,
    },

    /// JSON (de)serialization of a config or a route plan failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CvrpError {
    /// Returns `true` for errors raised while reading or validating an instance.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CvrpError::Io(_)
                | CvrpError::Parse { .. }
                | CvrpError::UnexpectedEnd { .. }
                | CvrpError::InvalidInstance(_)
        )
    }
}

fn slot_name(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!("chromosome {i}"),
        None => "elite".to_string(),
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CvrpError>;
