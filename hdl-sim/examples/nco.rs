//! A numerically controlled oscillator sweeping out a sine wave.

use hdl_sim::parts;
use hdl_sim::prelude::*;

fn main() {
    const FREQ_BITS: u32 = 16;

    let clk = Signal::with_name(Logic::Low, "clk");
    let reset = Signal::with_name(Logic::Low, "reset");
    let enable = Signal::with_name(Logic::High, "enable");

    // 1024 / 65536 turns per tick.
    let freq = Signal::with_name(
        Fixed::from_f64(false, 0, FREQ_BITS, 1024.0 / 65536.0),
        "freq",
    );
    let modulation = Signal::new(Fixed::new(false, 0, FREQ_BITS));
    let sine = Signal::with_name(Fixed::new(true, 1, 15), "sine");
    let cosine = Signal::new(Fixed::new(true, 1, 15));
    let saw = Signal::with_name(Fixed::new(false, 0, FREQ_BITS), "saw");

    parts::nco(&clk, &reset, &enable, &freq, &modulation, &sine, &cosine, &saw);
    parts::print(&sine);

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
    sim.run(10_000).expect("simulation failed");
    cleanup();
}
