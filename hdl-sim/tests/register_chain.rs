use std::sync::{Mutex, MutexGuard, PoisonError};

use hdl_sim::parts;
use hdl_sim::prelude::*;

fn fresh_netlist() -> MutexGuard<'static, ()> {
    static LOCK: Mutex<()> = Mutex::new(());
    let guard = LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    hdl_sim::cleanup();
    guard
}

/// Two registers, the second clocked by the first one's output, each fed
/// by an inverter from its own output. The first stage divides the clock
/// by two, the second by four.
#[test]
fn chained_registers_divide_the_clock() {
    let _guard = fresh_netlist();
    let clk = Signal::with_name(Logic::Low, "clk");
    let reset = Signal::with_name(Logic::Low, "reset");
    let enable = Signal::with_name(Logic::High, "enable");

    let din = Signal::with_name(Logic::Undefined, "din");
    let dout = Signal::with_name(Logic::Undefined, "dout");
    let din2 = Signal::with_name(Logic::Undefined, "din2");
    let dout2 = Signal::with_name(Logic::Undefined, "dout2");

    parts::reg(&clk, &reset, &enable, &din, &dout);
    parts::invert(&dout, &din);
    parts::reg(&dout, &reset, &enable, &din2, &dout2);
    parts::invert(&dout2, &din2);

    let tb = {
        let (c, r) = (clk.clone(), reset.clone());
        Part::new(
            &[],
            &[&clk, &reset],
            move |time| {
                c.drive(Logic::from(time % 2 == 1));
                // Reset is released after two ticks.
                r.drive(Logic::from(time >= 2));
            },
            "testbench",
        )
    };
    let mut sim = Simulator::new(tb);

    // First rising clock edge after release is tick 3: both stages load.
    sim.run(4).unwrap();
    assert_eq!(dout.read(), Logic::High);
    assert_eq!(dout2.read(), Logic::High);

    // dout toggles on every rising clock edge (every two ticks)...
    sim.run(2).unwrap();
    assert_eq!(dout.read(), Logic::Low);
    assert_eq!(dout2.read(), Logic::High);

    // ...and dout2 toggles on every rising edge of dout (every four).
    sim.run(2).unwrap();
    assert_eq!(dout.read(), Logic::High);
    assert_eq!(dout2.read(), Logic::Low);

    sim.run(4).unwrap();
    assert_eq!(dout.read(), Logic::High);
    assert_eq!(dout2.read(), Logic::High);

    // Period 4 and period 8 wave, checked after a long run: tick 41 is
    // the 20th toggle of dout and tick 39 the 10th toggle of dout2.
    sim.run(30).unwrap();
    assert_eq!(dout.read(), Logic::Low);
    assert_eq!(dout2.read(), Logic::Low);
}

#[test]
fn delay_line_shifts_by_its_stage_count() {
    let _guard = fresh_netlist();
    let clk = Signal::with_name(Logic::Low, "clk");
    let reset = Signal::with_name(Logic::Low, "reset");
    let enable = Signal::with_name(Logic::High, "enable");
    let din = Signal::with_name(Logic::Low, "din");
    let dout = Signal::with_name(Logic::Undefined, "dout");

    parts::delay(2, &clk, &reset, &enable, &din, &dout);

    let tb = {
        let (c, r, d) = (clk.clone(), reset.clone(), din.clone());
        Part::new(
            &[],
            &[&clk, &reset, &din],
            move |time| {
                c.drive(Logic::from(time % 2 == 1));
                r.drive(Logic::from(time >= 2));
                // A single high pulse wide enough for one rising edge.
                d.drive(Logic::from(time == 4 || time == 5));
            },
            "testbench",
        )
    };
    let mut sim = Simulator::new(tb);

    // The pulse is sampled on tick 5 and emerges one edge later.
    sim.run(6).unwrap();
    assert_eq!(dout.read(), Logic::Low);
    sim.run(2).unwrap();
    assert_eq!(dout.read(), Logic::High);
    sim.run(2).unwrap();
    assert_eq!(dout.read(), Logic::Low);
}
