/// Errors reported by the filter and its controller.
///
/// None of these are expected during normal operation: they indicate a badly formed
/// configuration and are not recoverable on a per-tick basis.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
    /// The innovation covariance `S = H·P·Hᵀ + R` could not be inverted.
    #[error("innovation covariance is singular or ill-conditioned (determinant {determinant})")]
    SingularInnovationCovariance {
        /// The determinant of `S`, converted to `f64` for reporting.
        determinant: f64,
    },
    /// The snapshot stack is too shallow to roll back over the stale-data window.
    #[error("stale threshold of {stale_threshold} ticks needs {required} history entries, but the filter only keeps {depth}")]
    InsufficientHistoryDepth {
        /// The configured stale-data threshold, in ticks.
        stale_threshold: usize,
        /// The number of snapshots required to cover it.
        required: usize,
        /// The compiled-in snapshot capacity.
        depth: usize,
    },
    /// A configuration value that must be positive and finite is not.
    #[error("configuration value `{name}` must be positive and finite")]
    InvalidParameter {
        /// The name of the offending field.
        name: &'static str,
    },
}
