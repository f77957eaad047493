//! Pre-built part constructors.
//!
//! Nothing in this module is special to the propagator: every constructor
//! is an ordinary [`crate::Part`] built on the public core API, wiring a
//! closure to its input and output signals. They exist so netlists read
//! like structural descriptions instead of walls of closures.

mod arith;
mod convert;
mod dsp;
mod gates;
mod io;
mod register;

pub use arith::{
    add, add_with_carry, barrel_shift, barrel_shift_fixed, equal, greater, less, mul, negate,
    resize, sub, sub_with_borrow,
};
pub use convert::{bus_to_fixed, fixed_to_bus};
pub use dsp::{clkdiv, counter, differentiator, integrator, nco, pwm, sincos};
pub use gates::{and2, assign, assign_bus, invert, nand2, nor2, or2, xnor2, xor2};
pub use io::{print, print_bus};
pub use register::{delay, reg, reg_bus};
