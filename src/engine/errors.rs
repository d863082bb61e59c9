//! Error types for the stepped execution engine
//!
//! [`EngineError`] covers every way a command to the engine can be refused
//! and every defect a run can hit. Cancellation is deliberately absent: a
//! stopped run is a normal outcome, reported through
//! [`RunOutcome::Cancelled`](super::controller::RunOutcome::Cancelled).

use std::io;

use thiserror::Error;

/// Errors raised by the run controller, the shared buffer and the catalog
#[derive(Error, Debug)]
pub enum EngineError {
    /// `start` was called while a run is still active
    #[error("a sort is already running")]
    AlreadyRunning,

    /// A marker or buffer access fell outside the buffer.
    ///
    /// Only a faulty algorithm can trigger this; the run that hit it is
    /// aborted.
    #[error("index {index} is out of range for a buffer of length {len}")]
    InvalidIndex { index: usize, len: usize },

    /// The buffer was about to be replaced while a run owns it
    #[error("cannot change the data while a sort is running")]
    MutationWhileRunning,

    /// Custom input contained something that is not an integer
    #[error("'{token}' is not a valid integer")]
    InvalidValue { token: String },

    /// More values were requested than one buffer may hold
    #[error("cannot generate {count} values (at most {max})")]
    TooManyValues { count: usize, max: usize },

    /// The operating system refused to start the worker thread
    #[error("failed to spawn sort worker: {0}")]
    WorkerSpawn(#[from] io::Error),

    /// The worker thread panicked before it could hand the buffer back
    #[error("sort worker panicked")]
    WorkerPanicked,
}

impl EngineError {
    /// Whether the error is a refused command rather than a broken run
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            EngineError::AlreadyRunning
                | EngineError::MutationWhileRunning
                | EngineError::InvalidValue { .. }
                | EngineError::TooManyValues { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = EngineError::InvalidIndex { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "index 7 is out of range for a buffer of length 3"
        );

        let err = EngineError::InvalidValue {
            token: "x1".to_string(),
        };
        assert_eq!(err.to_string(), "'x1' is not a valid integer");

        let err = EngineError::TooManyValues {
            count: 20_000,
            max: 10_000,
        };
        assert_eq!(err.to_string(), "cannot generate 20000 values (at most 10000)");
        assert!(err.is_rejection());
    }

    #[test]
    fn test_rejections() {
        assert!(EngineError::AlreadyRunning.is_rejection());
        assert!(EngineError::MutationWhileRunning.is_rejection());
        assert!(!EngineError::WorkerPanicked.is_rejection());
        assert!(!EngineError::InvalidIndex { index: 0, len: 0 }.is_rejection());
    }
}
