//! A combinational loop must be caught, not spun forever.

use std::sync::{Mutex, MutexGuard, PoisonError};

use hdl_sim::prelude::*;

fn fresh_netlist() -> MutexGuard<'static, ()> {
    static LOCK: Mutex<()> = Mutex::new(());
    let guard = LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    hdl_sim::cleanup();
    guard
}

#[test]
fn self_inverting_wire_reports_oscillation() {
    let _guard = fresh_netlist();
    let out = Signal::with_name(Logic::Low, "out");
    {
        let o = out.clone();
        Part::new(&[&out], &[&out], move |_| o.drive(!o.read()), "p");
    }
    let testbench = Part::new(&[], &[], |_| (), "testbench");

    let config = Config {
        worker_threads: 1,
        max_delta_cycles_per_tick: 1000,
    };
    let mut sim = Simulator::with_config(testbench, config).unwrap();

    let err = sim.run(1).unwrap_err();
    match &err {
        SimulationError::Oscillation { tick, limit, signals, parts } => {
            assert_eq!(*tick, 0);
            assert_eq!(*limit, 1000);
            assert_eq!(signals, &vec!["out".to_owned()]);
            assert_eq!(parts, &vec!["p".to_owned()]);
        }
        other => panic!("expected an oscillation error, got {other}"),
    }
    let report = err.to_string();
    assert!(report.contains("out") && report.contains("p"), "{report}");
}

#[test]
fn stable_netlists_are_not_flagged() {
    let _guard = fresh_netlist();
    let a = Signal::with_name(Logic::Low, "a");
    let b = Signal::with_name(Logic::Undefined, "b");
    hdl_sim::parts::invert(&a, &b);

    let clk = Signal::with_name(Logic::Low, "clk");
    let tb = {
        let c = clk.clone();
        Part::new(&[], &[&clk], move |t| c.drive(Logic::from(t % 2 == 1)), "testbench")
    };
    let config = Config {
        worker_threads: 1,
        max_delta_cycles_per_tick: 4,
    };
    let mut sim = Simulator::with_config(tb, config).unwrap();
    sim.run(16).unwrap();
    assert_eq!(b.read(), Logic::High);
}
