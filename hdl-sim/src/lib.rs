//! Discrete-event simulator for synchronous digital-logic netlists.
//!
//! A netlist is built from [`Signal`]s (typed wires), [`Bus`]es (ordered
//! groups of logic wires) and [`Part`]s (callbacks with declared input and
//! output signals). A distinguished testbench part drives stimuli; the
//! [`Simulator`] advances virtual time in ticks and, within each tick,
//! propagates changes through the netlist to a fixed point before moving
//! on.
//!
//! Every signal and part registers itself in a process-wide registry so
//! the simulator can enumerate the initial frontier; [`cleanup`] tears the
//! whole netlist down.
//!
//! ```
//! use hdl_sim::prelude::*;
//!
//! let input = Signal::with_name(Logic::Low, "input");
//! let output = Signal::with_name(Logic::Undefined, "output");
//! hdl_sim::parts::invert(&input, &output);
//!
//! let stimulus = input.clone();
//! let testbench = Part::new(
//!     &[],
//!     &[&input],
//!     move |t| stimulus.drive(Logic::from(t % 2 == 0)),
//!     "testbench",
//! );
//!
//! let mut sim = Simulator::new(testbench);
//! sim.run(2).unwrap();
//! // The last tick drove the input low, so the inverter reads high.
//! assert_eq!(output.read(), Logic::High);
//! hdl_sim::cleanup();
//! ```

mod bus;
mod config;
mod error;
mod part;
mod registry;
mod signal;
mod simulator;
mod value;

pub mod parts;

pub use bus::Bus;
pub use config::Config;
pub use error::SimulationError;
pub use part::Part;
pub use registry::{cleanup, PartId, SignalId};
pub use signal::{Connect, Signal};
pub use simulator::Simulator;
pub use value::{DriveConflict, Value};

/// Common imports for netlist construction.
pub mod prelude {
    pub use crate::{cleanup, Bus, Config, Part, Signal, SimulationError, Simulator, Value};
    pub use hdl_types::{Fixed, Logic};
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Mutex, MutexGuard, PoisonError};

    /// Unit tests share the process-wide registry, so they take this lock
    /// and reset the registry before touching it.
    pub(crate) fn fresh_netlist() -> MutexGuard<'static, ()> {
        static LOCK: Mutex<()> = Mutex::new(());
        let guard = LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        crate::cleanup();
        guard
    }
}
