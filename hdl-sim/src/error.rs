//! Structured failures of a simulation run.

use thiserror::Error;

/// Fatal conditions that abort [`crate::Simulator::run`].
///
/// Every variant names the tick it was detected on and the offending
/// signals and parts, so a failing netlist can be located without a
/// debugger.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Two parts drove a single-driver signal.
    #[error("signal `{signal}` has multiple drivers at tick {tick}: {}", .drivers.join(", "))]
    MultipleDrivers {
        /// Tick on which the conflicting commit was attempted.
        tick: u64,
        /// Signal with more than one driver.
        signal: String,
        /// Names of the conflicting drivers.
        drivers: Vec<String>,
    },

    /// The payload's resolver rejected the pending driver set.
    #[error("signal `{signal}` received irreconcilable drives at tick {tick} from: {}", .drivers.join(", "))]
    UnresolvedDrive {
        /// Tick on which the commit was attempted.
        tick: u64,
        /// Signal whose drives could not be merged.
        signal: String,
        /// Names of the drivers involved.
        drivers: Vec<String>,
    },

    /// A tick failed to settle within the configured delta-cycle budget.
    #[error(
        "tick {tick} did not settle after {limit} delta cycles; still changing: {}; scheduled parts: {}",
        .signals.join(", "),
        .parts.join(", ")
    )]
    Oscillation {
        /// Tick that never reached a fixed point.
        tick: u64,
        /// The configured delta-cycle limit.
        limit: u32,
        /// Signals still changing when the limit was hit.
        signals: Vec<String>,
        /// Parts scheduled by those signals.
        parts: Vec<String>,
    },

    /// The worker pool could not be constructed.
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
