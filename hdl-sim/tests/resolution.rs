//! Multi-driver resolution over one shared wire.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hdl_sim::prelude::*;

fn fresh_netlist() -> MutexGuard<'static, ()> {
    static LOCK: Mutex<()> = Mutex::new(());
    let guard = LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    hdl_sim::cleanup();
    guard
}

fn toggling_testbench(clk: &Signal<Logic>, reset: &Signal<Logic>, release_at: u64) -> Part {
    let (c, r) = (clk.clone(), reset.clone());
    Part::new(
        &[],
        &[clk, reset],
        move |time| {
            c.drive(Logic::from(time % 2 == 1));
            r.drive(Logic::from(time >= release_at));
        },
        "testbench",
    )
}

#[test]
fn released_driver_yields_to_the_active_one() {
    let _guard = fresh_netlist();
    let clk = Signal::with_name(Logic::Low, "clk");
    let reset = Signal::with_name(Logic::Low, "reset");
    let shared = Signal::with_name(Logic::HighZ, "shared");

    // Driver A owns the wire while reset is asserted, driver B afterwards.
    {
        let (r, s) = (reset.clone(), shared.clone());
        Part::new(
            &[&reset],
            &[&shared],
            move |_| {
                s.drive(if r.read() == Logic::Low { Logic::Low } else { Logic::HighZ });
            },
            "driver_a",
        );
    }
    {
        let (r, s) = (reset.clone(), shared.clone());
        Part::new(
            &[&reset],
            &[&shared],
            move |_| {
                s.drive(if r.read() == Logic::Low { Logic::HighZ } else { Logic::High });
            },
            "driver_b",
        );
    }

    let trace = Arc::new(Mutex::new(Vec::new()));
    {
        let (s, t) = (shared.clone(), trace.clone());
        Part::new(&[&shared], &[], move |time| {
            t.lock().unwrap().push((time, s.read()));
        }, "watch");
    }

    let mut sim = Simulator::new(toggling_testbench(&clk, &reset, 5));
    sim.run(5).unwrap();
    assert_eq!(shared.read(), Logic::Low);
    sim.run(5).unwrap();
    assert_eq!(shared.read(), Logic::High);

    let trace = trace.lock().unwrap();
    assert!(!trace.is_empty());
    assert!(
        trace.iter().all(|(_, v)| *v != Logic::Undefined),
        "handover glitched: {trace:?}"
    );
}

#[test]
fn simultaneous_definite_drivers_commit_undefined() {
    let _guard = fresh_netlist();
    let clk = Signal::with_name(Logic::Low, "clk");
    let reset = Signal::with_name(Logic::Low, "reset");
    let shared = Signal::with_name(Logic::HighZ, "shared");

    {
        let s = shared.clone();
        Part::new(&[&reset], &[&shared], move |_| s.drive(Logic::High), "driver_a");
    }
    {
        let s = shared.clone();
        Part::new(&[&reset], &[&shared], move |_| s.drive(Logic::Low), "driver_b");
    }

    let mut sim = Simulator::new(toggling_testbench(&clk, &reset, 5));
    sim.run(1).unwrap();
    assert_eq!(shared.read(), Logic::Undefined);
}

#[test]
fn agreeing_definite_drivers_still_short_circuit() {
    let _guard = fresh_netlist();
    let clk = Signal::with_name(Logic::Low, "clk");
    let reset = Signal::with_name(Logic::Low, "reset");
    let shared = Signal::with_name(Logic::HighZ, "shared");

    for name in ["driver_a", "driver_b"] {
        let s = shared.clone();
        Part::new(&[&reset], &[&shared], move |_| s.drive(Logic::High), name);
    }

    let mut sim = Simulator::new(toggling_testbench(&clk, &reset, 5));
    sim.run(1).unwrap();
    assert_eq!(shared.read(), Logic::Undefined);
}
