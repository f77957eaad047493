//! The per-tick delta-cycle propagator.

use std::sync::Arc;

use itertools::Itertools;
use rayon::prelude::*;
use tracing::{debug_span, trace};

use crate::config::Config;
use crate::error::SimulationError;
use crate::part::{Part, PartCore};
use crate::registry::{self, PartId, SignalId};
use crate::signal::SignalNode;

/// Drives a netlist from a testbench part, one tick at a time.
///
/// Each tick runs the testbench, then repeats commit / schedule / run /
/// gather until no signal changes. All parts scheduled in one delta
/// cycle observe the same committed snapshot, and their drives stay
/// pending until the next commit, so the outcome of a tick does not
/// depend on intra-phase execution order. That discipline is what makes
/// running the commit and part phases on a worker pool safe.
pub struct Simulator {
    testbench: Part,
    config: Config,
    pool: Option<rayon::ThreadPool>,
    time: u64,
    first: bool,
}

impl Simulator {
    /// A serial simulator with default configuration.
    pub fn new(testbench: Part) -> Self {
        Self {
            testbench,
            config: Config::default(),
            pool: None,
            time: 0,
            first: true,
        }
    }

    /// A simulator with explicit configuration. Spawns a worker pool
    /// when `config.worker_threads > 1`.
    pub fn with_config(testbench: Part, config: Config) -> Result<Self, SimulationError> {
        let pool = if config.worker_threads > 1 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(config.worker_threads as usize)
                    .build()?,
            )
        } else {
            None
        };
        Ok(Self {
            testbench,
            config,
            pool,
            time: 0,
            first: true,
        })
    }

    /// Current virtual time in ticks.
    pub const fn time(&self) -> u64 {
        self.time
    }

    /// Advance the netlist by `duration` ticks.
    ///
    /// Aborts on the first configuration error, irreconcilable drive or
    /// oscillating tick, reporting the tick and the nodes involved.
    pub fn run(&mut self, duration: u64) -> Result<(), SimulationError> {
        let testbench = self.testbench.core();
        for _ in 0..duration {
            let tick = self.time;
            let _span = debug_span!("tick", tick).entered();

            testbench.update(tick);

            // The very first tick settles the whole netlist; afterwards
            // only testbench stimuli can start a tick.
            let mut frontier = if self.first {
                self.first = false;
                registry::all_signals()
            } else {
                registry::signals(&testbench.children())
            };
            frontier.retain(|signal| signal.changed());

            let mut deltas = 0u32;
            while !frontier.is_empty() {
                deltas += 1;
                let limit = self.config.max_delta_cycles_per_tick;
                if limit != 0 && deltas > limit {
                    return Err(oscillation(tick, limit, &frontier));
                }
                trace!(
                    delta = deltas,
                    signals = %frontier.iter().map(|s| s.name()).join(", "),
                    "commit"
                );

                self.commit_phase(&frontier, tick)?;

                let mut part_ids: Vec<PartId> =
                    frontier.iter().flat_map(|signal| signal.children()).collect();
                part_ids.sort_unstable();
                part_ids.dedup();
                let scheduled: Vec<Arc<PartCore>> = registry::parts(&part_ids)
                    .into_iter()
                    .filter(|part| part.mark_scheduled())
                    .collect();
                trace!(
                    delta = deltas,
                    parts = %scheduled.iter().map(|p| p.name()).join(", "),
                    "update"
                );

                self.part_phase(&scheduled, tick);

                let mut signal_ids: Vec<SignalId> =
                    scheduled.iter().flat_map(|part| part.children()).collect();
                signal_ids.sort_unstable();
                signal_ids.dedup();
                frontier = registry::signals(&signal_ids);
                frontier.retain(|signal| signal.changed());
            }

            self.time += 1;
        }
        Ok(())
    }

    /// Commit every frontier signal. The frontier is deduplicated, so
    /// workers touch disjoint signals.
    fn commit_phase(
        &self,
        frontier: &[Arc<dyn SignalNode>],
        tick: u64,
    ) -> Result<(), SimulationError> {
        let results: Vec<_> = match &self.pool {
            Some(pool) => {
                pool.install(|| frontier.par_iter().map(|signal| signal.commit()).collect())
            }
            None => frontier.iter().map(|signal| signal.commit()).collect(),
        };
        for result in results {
            result.map_err(|e| e.at_tick(tick))?;
        }
        Ok(())
    }

    /// Run every scheduled part against the snapshot just committed.
    fn part_phase(&self, scheduled: &[Arc<PartCore>], tick: u64) {
        match &self.pool {
            Some(pool) => pool.install(|| scheduled.par_iter().for_each(|part| part.update(tick))),
            None => scheduled.iter().for_each(|part| part.update(tick)),
        }
    }
}

fn oscillation(tick: u64, limit: u32, frontier: &[Arc<dyn SignalNode>]) -> SimulationError {
    let signals = frontier.iter().map(|signal| signal.name()).collect();
    let mut part_ids: Vec<PartId> = frontier.iter().flat_map(|signal| signal.children()).collect();
    part_ids.sort_unstable();
    part_ids.dedup();
    let parts = registry::parts(&part_ids)
        .iter()
        .map(|part| part.name())
        .collect();
    SimulationError::Oscillation {
        tick,
        limit,
        signals,
        parts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Signal;
    use crate::testing;
    use hdl_types::Logic;

    fn toggler(clk: &Signal<Logic>) -> Part {
        let clk = clk.clone();
        let output = clk.clone();
        Part::new(
            &[],
            &[&clk],
            move |t| output.drive(Logic::from(t % 2 == 1)),
            "testbench",
        )
    }

    #[test]
    fn initial_values_settle_on_the_first_tick() {
        let _guard = testing::fresh_netlist();
        let a = Signal::with_name(Logic::Low, "a");
        let b = Signal::with_name(Logic::Undefined, "b");
        crate::parts::invert(&a, &b);

        let clk = Signal::with_name(Logic::Low, "clk");
        let mut sim = Simulator::new(toggler(&clk));
        sim.run(1).unwrap();
        // The inverter ran even though no input of it changed this tick.
        assert_eq!(b.read(), Logic::High);
    }

    #[test]
    fn changes_ripple_through_combinational_chains() {
        let _guard = testing::fresh_netlist();
        let clk = Signal::with_name(Logic::Low, "clk");
        let stage1 = Signal::new(Logic::Undefined);
        let stage2 = Signal::new(Logic::Undefined);
        crate::parts::invert(&clk, &stage1);
        crate::parts::invert(&stage1, &stage2);

        let mut sim = Simulator::new(toggler(&clk));
        sim.run(2).unwrap();
        // After the high tick: stage1 = !1 = 0, stage2 = !0 = 1.
        assert_eq!(stage1.read(), Logic::Low);
        assert_eq!(stage2.read(), Logic::High);
        assert_eq!(sim.time(), 2);
    }

    #[test]
    fn unconnected_parts_do_not_rerun() {
        let _guard = testing::fresh_netlist();
        use std::sync::atomic::{AtomicU64, Ordering};
        use std::sync::Arc as StdArc;

        let runs = StdArc::new(AtomicU64::new(0));
        let quiet = Signal::new(Logic::Low);
        {
            let runs = runs.clone();
            Part::new(&[&quiet], &[], move |_| {
                runs.fetch_add(1, Ordering::Relaxed);
            }, "observer");
        }
        let clk = Signal::new(Logic::Low);
        let mut sim = Simulator::new(toggler(&clk));
        sim.run(5).unwrap();
        // Only the first tick touches the quiet wire.
        assert_eq!(runs.load(Ordering::Relaxed), 1);
    }
}
