//! Signal-processing blocks composed from registers and arithmetic.

use std::f64::consts::TAU;

use hdl_types::{Fixed, Logic};

use crate::part::Part;
use crate::signal::Signal;
use crate::value::Value;

use super::{add, equal, invert, less, nor2, reg, resize, sub};

/// Accumulate `input` on every enabled rising clock edge.
pub fn integrator(
    clk: &Signal<Logic>,
    reset: &Signal<Logic>,
    enable: &Signal<Logic>,
    input: &Signal<Fixed>,
    output: &Signal<Fixed>,
) {
    let sum = Signal::new(output.read().cleared());
    add(output, input, &sum);
    reg(clk, reset, enable, &sum, output);
}

/// First difference of `input` across enabled rising clock edges.
pub fn differentiator(
    clk: &Signal<Logic>,
    reset: &Signal<Logic>,
    enable: &Signal<Logic>,
    input: &Signal<Fixed>,
    output: &Signal<Fixed>,
) {
    let held = Signal::new(input.read().cleared());
    reg(clk, reset, enable, input, &held);
    sub(input, &held, output);
}

/// Count enabled rising clock edges into `output`.
pub fn counter(
    clk: &Signal<Logic>,
    reset: &Signal<Logic>,
    enable: &Signal<Logic>,
    output: &Signal<Fixed>,
) {
    let shape = output.read();
    let one = Signal::new(Fixed::from_int(
        shape.is_signed(),
        shape.mbits(),
        shape.fbits(),
        1,
    ));
    integrator(clk, reset, enable, &one, output);
}

/// Sine and cosine of a phase expressed in turns, scaled to half range.
pub fn sincos(phase: &Signal<Fixed>, sin_out: &Signal<Fixed>, cos_out: &Signal<Fixed>) {
    let (p, s, c) = (phase.clone(), sin_out.clone(), cos_out.clone());
    Part::new(&[phase], &[sin_out, cos_out], move |_| {
        let angle = TAU * p.read().to_f64();
        let shape = s.read();
        s.drive(Fixed::from_f64(
            shape.is_signed(),
            shape.mbits(),
            shape.fbits(),
            0.5 * angle.sin(),
        ));
        let shape = c.read();
        c.drive(Fixed::from_f64(
            shape.is_signed(),
            shape.mbits(),
            shape.fbits(),
            0.5 * angle.cos(),
        ));
    }, "sincos");
}

/// Numerically controlled oscillator.
///
/// `freq` and `modulation` are phase increments in turns per tick; the
/// phase accumulator wraps naturally. `saw` receives the running phase
/// resized to its own shape.
pub fn nco(
    clk: &Signal<Logic>,
    reset: &Signal<Logic>,
    enable: &Signal<Logic>,
    freq: &Signal<Fixed>,
    modulation: &Signal<Fixed>,
    sine: &Signal<Fixed>,
    cosine: &Signal<Fixed>,
    saw: &Signal<Fixed>,
) {
    let phase = Signal::new(freq.read().cleared());
    let shifted = Signal::new(freq.read().cleared());
    integrator(clk, reset, enable, freq, &phase);
    add(&phase, modulation, &shifted);
    sincos(&shifted, sine, cosine);
    resize(&shifted, saw);
}

/// Pulse-width modulation over a counter of `period` states.
///
/// `output` stays high while the counter is below `ratio`.
pub fn pwm(
    period: u32,
    clk: &Signal<Logic>,
    reset: &Signal<Logic>,
    enable: &Signal<Logic>,
    ratio: &Signal<Fixed>,
    output: &Signal<Logic>,
) {
    let shape = ratio.read();
    let count = Signal::new(shape.cleared());
    let count_reset = Signal::new(Logic::Undefined);
    counter(clk, &count_reset, enable, &count);

    let limit = Signal::new(Fixed::from_int(
        shape.is_signed(),
        shape.mbits(),
        shape.fbits(),
        i128::from(period),
    ));
    let at_limit = Signal::new(Logic::Undefined);
    equal(&count, &limit, &at_limit);

    // Restart the counter on wrap or while the outer reset is asserted.
    let reset_inactive = Signal::new(Logic::Undefined);
    invert(reset, &reset_inactive);
    nor2(&at_limit, &reset_inactive, &count_reset);

    less(&count, ratio, output);
}

/// Divide `clk` by `divider`, producing a roughly square wave.
pub fn clkdiv(
    divider: u32,
    clk: &Signal<Logic>,
    reset: &Signal<Logic>,
    enable: &Signal<Logic>,
    clk_out: &Signal<Logic>,
) {
    assert!(divider > 0, "zero clock divider");
    let mbits = u32::BITS - divider.leading_zeros();
    let ratio = Signal::new(Fixed::from_int(false, mbits, 0, i128::from(divider / 2)));
    pwm(divider, clk, reset, enable, &ratio, clk_out);
}
