/*
 * Error Module
 *
 * Every fallible operation in the simulation reports through SimulationError.
 */

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors raised while building or advancing a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A configuration value is outside its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The double-buffered agent store could not be provisioned.
    #[error("failed to allocate agent store for {count} agents")]
    Allocation {
        count: usize,
        #[source]
        source: TryReserveError,
    },

    /// A write addressed an agent slot past the end of the grid.
    #[error("agent index {index} is out of range for a grid of {len} agents")]
    IndexOutOfRange { index: usize, len: usize },

    /// A kernel produced a NaN or infinite component; the tick was abandoned.
    #[error("agent {index} produced a non-finite state, tick abandoned")]
    NonFiniteState { index: usize },
}
