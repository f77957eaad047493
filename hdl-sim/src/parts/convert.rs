//! Bridges between buses and fixed-point signals.

use hdl_types::{Fixed, Logic};

use crate::bus::Bus;
use crate::part::Part;
use crate::signal::Signal;

/// Reassemble the wires of `input` into the fixed-point `output`, LSB
/// first.
///
/// # Panics
///
/// Panics when the bus width differs from the fixed-point width.
/// Undefined or released wires read as zero bits.
pub fn bus_to_fixed(input: &Bus, output: &Signal<Fixed>) {
    assert_eq!(
        input.width() as u32,
        output.read().bits(),
        "wire count mismatch between `{}` and `{}`",
        input.name(),
        output.name()
    );
    let (bus, out) = (input.clone(), output.clone());
    Part::new(&[input], &[output], move |_| {
        let mut value = out.read().zeroed();
        for bit in 0..bus.width() {
            value.set_bit(bit as u32, bus[bit].read() == Logic::High);
        }
        out.drive(value);
    }, "assign");
}

/// Spread the bits of the fixed-point `input` over the wires of
/// `output`, LSB first.
///
/// # Panics
///
/// Panics when the bus width differs from the fixed-point width.
pub fn fixed_to_bus(input: &Signal<Fixed>, output: &Bus) {
    assert_eq!(
        input.read().bits(),
        output.width() as u32,
        "wire count mismatch between `{}` and `{}`",
        input.name(),
        output.name()
    );
    let (sig, bus) = (input.clone(), output.clone());
    Part::new(&[input], &[output], move |_| {
        let value = sig.read();
        for bit in 0..bus.width() {
            bus[bit].drive(Logic::from(value.bit(bit as u32)));
        }
    }, "assign");
}
