//! Combinational gates over any payload with the matching operator.

use core::ops::{BitAnd, BitOr, BitXor, Not};

use crate::bus::Bus;
use crate::part::Part;
use crate::signal::Signal;
use crate::value::Value;

/// Continuous assignment: `output` follows `input`.
pub fn assign<T: Value>(input: &Signal<T>, output: &Signal<T>) {
    let (i, o) = (input.clone(), output.clone());
    Part::new(&[input], &[output], move |_| o.drive(i.read()), "assign");
}

/// Continuous assignment between equal-width buses.
///
/// # Panics
///
/// Panics on width mismatch.
pub fn assign_bus(input: &Bus, output: &Bus) {
    assert_eq!(
        input.width(),
        output.width(),
        "wire count mismatch between `{}` and `{}`",
        input.name(),
        output.name()
    );
    let (i, o) = (input.clone(), output.clone());
    Part::new(&[input], &[output], move |_| {
        for bit in 0..i.width() {
            o[bit].drive(i[bit].read());
        }
    }, "assign");
}

/// `output = !input`.
pub fn invert<T>(input: &Signal<T>, output: &Signal<T>)
where
    T: Value + Not<Output = T>,
{
    let (i, o) = (input.clone(), output.clone());
    Part::new(&[input], &[output], move |_| o.drive(!i.read()), "invert");
}

/// `out = in1 & in2`.
pub fn and2<T>(in1: &Signal<T>, in2: &Signal<T>, out: &Signal<T>)
where
    T: Value + BitAnd<Output = T>,
{
    let (a, b, o) = (in1.clone(), in2.clone(), out.clone());
    Part::new(&[in1, in2], &[out], move |_| o.drive(a.read() & b.read()), "and2");
}

/// `out = !(in1 & in2)`.
pub fn nand2<T>(in1: &Signal<T>, in2: &Signal<T>, out: &Signal<T>)
where
    T: Value + BitAnd<Output = T> + Not<Output = T>,
{
    let tmp = Signal::new(out.read().cleared());
    and2(in1, in2, &tmp);
    invert(&tmp, out);
}

/// `out = in1 | in2`.
pub fn or2<T>(in1: &Signal<T>, in2: &Signal<T>, out: &Signal<T>)
where
    T: Value + BitOr<Output = T>,
{
    let (a, b, o) = (in1.clone(), in2.clone(), out.clone());
    Part::new(&[in1, in2], &[out], move |_| o.drive(a.read() | b.read()), "or2");
}

/// `out = !(in1 | in2)`.
pub fn nor2<T>(in1: &Signal<T>, in2: &Signal<T>, out: &Signal<T>)
where
    T: Value + BitOr<Output = T> + Not<Output = T>,
{
    let tmp = Signal::new(out.read().cleared());
    or2(in1, in2, &tmp);
    invert(&tmp, out);
}

/// `out = in1 ^ in2`.
pub fn xor2<T>(in1: &Signal<T>, in2: &Signal<T>, out: &Signal<T>)
where
    T: Value + BitXor<Output = T>,
{
    let (a, b, o) = (in1.clone(), in2.clone(), out.clone());
    Part::new(&[in1, in2], &[out], move |_| o.drive(a.read() ^ b.read()), "xor2");
}

/// `out = !(in1 ^ in2)`.
pub fn xnor2<T>(in1: &Signal<T>, in2: &Signal<T>, out: &Signal<T>)
where
    T: Value + BitXor<Output = T> + Not<Output = T>,
{
    let tmp = Signal::new(out.read().cleared());
    xor2(in1, in2, &tmp);
    invert(&tmp, out);
}
