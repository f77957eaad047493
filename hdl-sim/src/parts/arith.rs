//! Arithmetic blocks over fixed-point signals.

use core::cmp::Ordering;

use hdl_types::{Fixed, Logic};

use crate::part::Part;
use crate::signal::Signal;

/// `out = in1 + in2`, same shape throughout.
pub fn add(in1: &Signal<Fixed>, in2: &Signal<Fixed>, out: &Signal<Fixed>) {
    let (a, b, o) = (in1.clone(), in2.clone(), out.clone());
    Part::new(&[in1, in2], &[out], move |_| {
        let mut carry = false;
        o.drive(a.read().sum_with_carry(&b.read(), &mut carry));
    }, "add");
}

/// Adder stage with carry input and output, so stages can chain.
pub fn add_with_carry(
    in1: &Signal<Fixed>,
    in2: &Signal<Fixed>,
    carry_in: &Signal<Logic>,
    out: &Signal<Fixed>,
    carry_out: &Signal<Logic>,
) {
    let (a, b, ci, o, co) = (
        in1.clone(),
        in2.clone(),
        carry_in.clone(),
        out.clone(),
        carry_out.clone(),
    );
    Part::new(&[in1, in2, carry_in], &[out, carry_out], move |_| {
        let mut carry = ci.read() == Logic::High;
        o.drive(a.read().sum_with_carry(&b.read(), &mut carry));
        co.drive(Logic::from(carry));
    }, "add");
}

/// `out = in1 - in2`, same shape throughout.
pub fn sub(in1: &Signal<Fixed>, in2: &Signal<Fixed>, out: &Signal<Fixed>) {
    let (a, b, o) = (in1.clone(), in2.clone(), out.clone());
    Part::new(&[in1, in2], &[out], move |_| {
        let mut borrow = false;
        o.drive(a.read().diff_with_borrow(&b.read(), &mut borrow));
    }, "sub");
}

/// Subtractor stage with borrow input and output.
pub fn sub_with_borrow(
    in1: &Signal<Fixed>,
    in2: &Signal<Fixed>,
    borrow_in: &Signal<Logic>,
    out: &Signal<Fixed>,
    borrow_out: &Signal<Logic>,
) {
    let (a, b, bi, o, bo) = (
        in1.clone(),
        in2.clone(),
        borrow_in.clone(),
        out.clone(),
        borrow_out.clone(),
    );
    Part::new(&[in1, in2, borrow_in], &[out, borrow_out], move |_| {
        let mut borrow = bi.read() == Logic::High;
        o.drive(a.read().diff_with_borrow(&b.read(), &mut borrow));
        bo.drive(Logic::from(borrow));
    }, "sub");
}

/// `output = -input`.
pub fn negate(input: &Signal<Fixed>, output: &Signal<Fixed>) {
    let (i, o) = (input.clone(), output.clone());
    Part::new(&[input], &[output], move |_| o.drive(-i.read()), "negate");
}

/// Widening multiply; `out` carries the product shape
/// `(m1 + m2, f1 + f2)`.
pub fn mul(in1: &Signal<Fixed>, in2: &Signal<Fixed>, out: &Signal<Fixed>) {
    let (a, b, o) = (in1.clone(), in2.clone(), out.clone());
    Part::new(&[in1, in2], &[out], move |_| o.drive(a.read() * b.read()), "mul");
}

/// Reshape `input` into the shape of `output`.
pub fn resize(input: &Signal<Fixed>, output: &Signal<Fixed>) {
    let (i, o) = (input.clone(), output.clone());
    Part::new(&[input], &[output], move |_| {
        let shape = o.read();
        o.drive(i.read().resize(shape.mbits(), shape.fbits()));
    }, "resize");
}

/// Shift by a fixed amount. Negative amounts shift right.
pub fn barrel_shift_fixed(input: &Signal<Fixed>, amount: i32, output: &Signal<Fixed>) {
    let (i, o) = (input.clone(), output.clone());
    Part::new(&[input], &[output], move |_| o.drive(i.read() << amount), "barrel_shift_fixed");
}

/// Shift by a signal-controlled amount.
pub fn barrel_shift(input: &Signal<Fixed>, amount: &Signal<Fixed>, output: &Signal<Fixed>) {
    let (i, n, o) = (input.clone(), amount.clone(), output.clone());
    Part::new(&[input, amount], &[output], move |_| {
        o.drive(i.read() << n.read().to_i128() as i32);
    }, "barrel_shift");
}

/// `out = (in1 == in2)`.
pub fn equal(in1: &Signal<Fixed>, in2: &Signal<Fixed>, out: &Signal<Logic>) {
    let (a, b, o) = (in1.clone(), in2.clone(), out.clone());
    Part::new(&[in1, in2], &[out], move |_| {
        o.drive(Logic::from(a.read() == b.read()));
    }, "equal");
}

/// `out = (in1 < in2)`.
pub fn less(in1: &Signal<Fixed>, in2: &Signal<Fixed>, out: &Signal<Logic>) {
    let (a, b, o) = (in1.clone(), in2.clone(), out.clone());
    Part::new(&[in1, in2], &[out], move |_| {
        o.drive(Logic::from(
            a.read().partial_cmp(&b.read()) == Some(Ordering::Less),
        ));
    }, "less");
}

/// `out = (in1 > in2)`.
pub fn greater(in1: &Signal<Fixed>, in2: &Signal<Fixed>, out: &Signal<Logic>) {
    let (a, b, o) = (in1.clone(), in2.clone(), out.clone());
    Part::new(&[in1, in2], &[out], move |_| {
        o.drive(Logic::from(
            a.read().partial_cmp(&b.read()) == Some(Ordering::Greater),
        ));
    }, "greater");
}
