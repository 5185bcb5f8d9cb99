//! Errors surfaced by batch operations.

use thiserror::Error;

/// Failure of a batch before any session was counted.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Rejected input: zero sessions for a parallel batch, zero workers, or a
    /// session count whose rounded-up total does not fit in `u64`.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The worker pool could not be created with the requested thread count.
    #[error("Execution environment error: {reason}")]
    ExecutionEnvironment {
        reason: String,
        #[source]
        source: Option<rayon::ThreadPoolBuildError>,
    },
}

impl SimulationError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn unavailable(reason: impl Into<String>) -> Self {
        Self::ExecutionEnvironment {
            reason: reason.into(),
            source: None,
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for SimulationError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::ExecutionEnvironment {
            reason: format!("worker pool could not be built: {}", err),
            source: Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_pool_build_error_maps_to_execution_environment() {
        let build_err = rayon::ThreadPoolBuilder::new()
            .num_threads(2)
            .spawn_handler(|_| Err(std::io::Error::other("spawn refused")))
            .build()
            .unwrap_err();
        let err = SimulationError::from(build_err);
        assert!(matches!(err, SimulationError::ExecutionEnvironment { .. }));
        assert!(err.to_string().contains("spawn refused"), "{}", err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_unavailable_has_no_source() {
        let err = SimulationError::unavailable("too many workers");
        assert!(err.to_string().contains("too many workers"));
        assert!(err.source().is_none());
    }
}
