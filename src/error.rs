use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core and its loader.
///
/// There is no retry policy anywhere: the simulation is a pure deterministic
/// computation over validated input, so every internal inconsistency is a
/// defect rather than a transient fault.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing scenario input; the run never starts.
    #[error("load error: {0}")]
    Load(String),

    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Physics state corrupted mid-run (e.g. a NaN collision prediction).
    /// Fatal; valid input should make this unreachable.
    #[error("invalid physics state: {0}")]
    InvalidState(String),

    /// Extraction from an empty event queue. The termination sentinel is
    /// supposed to guarantee loop closure, so this is fatal.
    #[error("event queue exhausted before the termination event")]
    EmptyQueue,

    /// Propagated I/O errors from the scenario loader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
