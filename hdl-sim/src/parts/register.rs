//! Clocked storage.

use hdl_types::Logic;

use crate::bus::Bus;
use crate::part::Part;
use crate::signal::Signal;
use crate::value::Value;

/// A rising-edge register with asynchronous active-low reset and an
/// enable input.
///
/// While `reset` is low the output holds its cleared value; otherwise a
/// rising clock edge with `enable` high loads `din`.
pub fn reg<T: Value>(
    clk: &Signal<Logic>,
    reset: &Signal<Logic>,
    enable: &Signal<Logic>,
    din: &Signal<T>,
    dout: &Signal<T>,
) {
    let (clk2, reset2, enable2, din2, dout2) = (
        clk.clone(),
        reset.clone(),
        enable.clone(),
        din.clone(),
        dout.clone(),
    );
    Part::new(&[clk, reset, enable, din], &[dout], move |_| {
        if reset2.read() == Logic::Low {
            let cleared = dout2.read().cleared();
            dout2.drive(cleared);
        } else if clk2.rising_edge() && enable2.read() == Logic::High {
            dout2.drive(din2.read());
        }
    }, "reg");
}

/// One [`reg`] per bit of a bus pair.
///
/// # Panics
///
/// Panics on width mismatch.
pub fn reg_bus(
    clk: &Signal<Logic>,
    reset: &Signal<Logic>,
    enable: &Signal<Logic>,
    din: &Bus,
    dout: &Bus,
) {
    assert_eq!(
        din.width(),
        dout.width(),
        "wire count mismatch between `{}` and `{}`",
        din.name(),
        dout.name()
    );
    for bit in 0..din.width() {
        reg(clk, reset, enable, &din[bit], &dout[bit]);
    }
}

/// A chain of `stages` registers between `din` and `dout`.
pub fn delay<T: Value>(
    stages: u32,
    clk: &Signal<Logic>,
    reset: &Signal<Logic>,
    enable: &Signal<Logic>,
    din: &Signal<T>,
    dout: &Signal<T>,
) {
    let mut prev = din.clone();
    for _ in 0..stages {
        let next = Signal::new(din.read().cleared());
        reg(clk, reset, enable, &prev, &next);
        prev = next;
    }
    super::assign(&prev, dout);
}
