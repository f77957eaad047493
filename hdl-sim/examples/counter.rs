//! A registered counter and its square, printed while the clock runs.

use hdl_sim::parts;
use hdl_sim::prelude::*;

fn main() {
    const BITS: u32 = 9;

    let clk = Signal::with_name(Logic::Low, "clk");
    let reset = Signal::with_name(Logic::Low, "reset");
    let enable = Signal::with_name(Logic::High, "enable");

    let one = Signal::new(Fixed::from_int(true, BITS, 0, 1));
    let next = Signal::new(Fixed::new(true, BITS, 0));
    let count = Signal::with_name(Fixed::new(true, BITS, 0), "count");
    let square = Signal::with_name(Fixed::new(true, 2 * BITS, 0), "square");

    parts::add(&count, &one, &next);
    parts::reg(&clk, &reset, &enable, &next, &count);
    parts::mul(&count, &count, &square);

    parts::print(&clk);
    parts::print(&reset);
    parts::print(&count);
    parts::print(&square);

    let testbench = {
        let (c, r) = (clk.clone(), reset.clone());
        Part::new(
            &[],
            &[&clk, &reset],
            move |time| {
                c.drive(Logic::from(time % 2 == 1));
                r.drive(Logic::from(time >= 10));
            },
            "testbench",
        )
    };

    let mut sim = Simulator::new(testbench);
    sim.run(100).expect("simulation failed");
    cleanup();
}
