//! User callbacks with declared input and output signals.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::registry::{self, PartId, SignalId};
use crate::signal::Connect;

thread_local! {
    /// The part whose callback is executing on this thread, if any.
    /// [`crate::Signal::drive`] reads it to attribute the write.
    static CURRENT_PART: Cell<Option<PartId>> = Cell::new(None);
}

pub(crate) fn current_part() -> Option<PartId> {
    CURRENT_PART.with(Cell::get)
}

pub(crate) struct PartCore {
    id: PartId,
    name: Mutex<String>,
    logic: Box<dyn Fn(u64) + Send + Sync>,
    /// Output signals, re-scanned for changes after the callback ran.
    children: Mutex<Vec<SignalId>>,
    /// Set while the part waits in the current delta cycle's schedule,
    /// so one part runs at most once per cycle.
    changed: AtomicBool,
}

impl PartCore {
    pub(crate) fn id(&self) -> PartId {
        self.id
    }

    pub(crate) fn name(&self) -> String {
        self.name.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub(crate) fn set_name(&self, name: &str) {
        *self.name.lock().unwrap_or_else(PoisonError::into_inner) = name.to_owned();
    }

    pub(crate) fn children(&self) -> Vec<SignalId> {
        self.children.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Claim a slot in the current schedule. Returns false when the part
    /// is already queued.
    pub(crate) fn mark_scheduled(&self) -> bool {
        self.changed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Run the callback with this part installed as the current driver.
    pub(crate) fn update(&self, time: u64) {
        CURRENT_PART.with(|current| current.set(Some(self.id)));
        (self.logic)(time);
        CURRENT_PART.with(|current| current.set(None));
        self.changed.store(false, Ordering::Release);
    }
}

/// A combinational or sequential block of the netlist.
///
/// The callback runs whenever one of the declared inputs changes, reading
/// any signal and driving the declared outputs. Handles are cheap clones
/// of a shared core that stays registered until [`crate::cleanup`].
#[derive(Clone)]
pub struct Part {
    core: Arc<PartCore>,
}

impl Part {
    /// Build a part and wire it into the netlist.
    ///
    /// Every signal in `inputs` schedules the part when it changes; every
    /// signal in `outputs` is re-examined after the callback ran. An
    /// empty `name` gets a generated one.
    pub fn new(
        inputs: &[&dyn Connect],
        outputs: &[&dyn Connect],
        logic: impl Fn(u64) + Send + Sync + 'static,
        name: &str,
    ) -> Self {
        let mut input_ids = Vec::new();
        for input in inputs {
            input.collect_signals(&mut input_ids);
        }
        let mut output_ids = Vec::new();
        for output in outputs {
            output.collect_signals(&mut output_ids);
        }
        output_ids.sort_unstable();
        output_ids.dedup();

        let mut reg = registry::lock();
        let id = PartId(reg.part_count());
        let name = if name.is_empty() {
            format!("part{}", id.0)
        } else {
            name.to_owned()
        };
        let core = Arc::new(PartCore {
            id,
            name: Mutex::new(name),
            logic: Box::new(logic),
            children: Mutex::new(output_ids),
            changed: AtomicBool::new(false),
        });
        reg.push_part(core.clone());

        input_ids.sort_unstable();
        input_ids.dedup();
        for input in input_ids {
            if let Some(signal) = reg.signal(input) {
                signal.add_child(id);
            }
        }
        Self { core }
    }

    /// The part's name.
    pub fn name(&self) -> String {
        self.core.name()
    }

    /// Rename the part.
    pub fn set_name(&self, name: &str) {
        self.core.set_name(name);
    }

    pub(crate) fn core(&self) -> Arc<PartCore> {
        self.core.clone()
    }
}

impl std::fmt::Debug for Part {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "part `{}`", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{Signal, SignalNode};
    use crate::testing;
    use hdl_types::Logic;

    #[test]
    fn drives_are_attributed_to_the_running_part() {
        let _guard = testing::fresh_netlist();
        assert_eq!(current_part(), None);
        let observed = Signal::new(Logic::Low);
        let probe = Signal::new(Logic::Low);
        let p = {
            let probe = probe.clone();
            let probe_for_closure = probe.clone();
            Part::new(
                &[&observed],
                &[&probe],
                move |_| probe_for_closure.drive(Logic::High),
                "p",
            )
        };
        p.core().update(0);
        // The slot is cleared once the callback returns.
        assert_eq!(current_part(), None);
    }

    #[test]
    fn scheduling_is_claimed_once() {
        let _guard = testing::fresh_netlist();
        let p = Part::new(&[], &[], |_| (), "noop");
        assert!(p.core().mark_scheduled());
        assert!(!p.core().mark_scheduled());
        p.core().update(0);
        assert!(p.core().mark_scheduled());
    }

    #[test]
    fn input_signals_learn_their_children() {
        let _guard = testing::fresh_netlist();
        let a = Signal::new(Logic::Low);
        let b = Signal::new(Logic::Low);
        let p = Part::new(&[&a, &a], &[&b], |_| (), "gate");
        let children = a.node().children();
        assert_eq!(children, vec![p.core().id()]);
        assert!(b.node().children().is_empty());
    }
}
