//! Value types carried on the wires of the HDL simulator.
//!
//! Two payloads cover nearly every netlist: [`Logic`], a single bit over
//! `{0, 1, Z, U}`, and [`Fixed`], an arbitrary-width two's-complement
//! fixed-point number. Both compare with `==`, print with `Display` and
//! support the arithmetic and bitwise operators a hardware description
//! needs.

mod fixed;
mod logic;

pub use fixed::{Fixed, Word};
pub use logic::{InvalidLogicChar, Logic};
