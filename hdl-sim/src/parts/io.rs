//! Stdout probes.
//!
//! The propagator itself writes nothing; attaching one of these parts is
//! the standard way to watch a signal during a run.

use crate::bus::Bus;
use crate::part::Part;
use crate::signal::Signal;
use crate::value::Value;

/// Print `signal` whenever it changes.
pub fn print<T: Value>(signal: &Signal<T>) {
    let s = signal.clone();
    Part::new(&[signal], &[], move |time| {
        println!("[{time}] {}: {}", s.name(), s.read());
    }, "print");
}

/// Print `bus` (MSB first) whenever any of its wires changes.
pub fn print_bus(bus: &Bus) {
    let b = bus.clone();
    Part::new(&[bus], &[], move |time| {
        println!("[{time}] {}: {}", b.name(), b);
    }, "print");
}
