//! The payload contract between signals and the propagator.

use core::fmt;

use hdl_types::{Fixed, Logic};

/// Multiple drivers could not be reduced to one committed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("conflicting drive values")]
pub struct DriveConflict;

/// A value that can travel on a [`crate::Signal`].
///
/// The propagator only ever clones, compares and resolves payloads; the
/// arithmetic lives on the types themselves.
pub trait Value: Clone + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Reduce the pending per-driver values to one committed value.
    ///
    /// The default accepts a single driver and reports a conflict
    /// otherwise; payloads with a real resolution function override this.
    fn resolve(drives: &[Self]) -> Result<Self, DriveConflict> {
        match drives {
            [single] => Ok(single.clone()),
            _ => Err(DriveConflict),
        }
    }

    /// The value a register assumes while its reset input is asserted.
    fn cleared(&self) -> Self;
}

impl Value for Logic {
    fn resolve(drives: &[Self]) -> Result<Self, DriveConflict> {
        Ok(Logic::resolve(drives.iter().copied()))
    }

    fn cleared(&self) -> Self {
        Logic::Low
    }
}

impl Value for Fixed {
    /// Shape-preserving zero.
    fn cleared(&self) -> Self {
        self.zeroed()
    }
}

impl Value for bool {
    fn cleared(&self) -> Self {
        false
    }
}
