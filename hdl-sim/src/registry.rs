//! Process-wide netlist registry.
//!
//! Every signal and part registers itself here on construction, in
//! construction order. The simulator uses the registry to enumerate the
//! initial frontier and to map the IDs stored in `children` sets back to
//! live nodes. Holding plain IDs in the graph edges keeps the
//! signal/part reference cycle out of the `Arc` graph: dropping the two
//! vectors is enough to tear everything down.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::part::PartCore;
use crate::signal::SignalNode;

/// Identity of a signal, assigned in construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignalId(pub(crate) usize);

/// Identity of a part, assigned in construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartId(pub(crate) usize);

pub(crate) struct Registry {
    signals: Vec<Arc<dyn SignalNode>>,
    parts: Vec<Arc<PartCore>>,
}

impl Registry {
    const fn new() -> Self {
        Self {
            signals: Vec::new(),
            parts: Vec::new(),
        }
    }

    pub(crate) fn signal_count(&self) -> usize {
        self.signals.len()
    }

    pub(crate) fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub(crate) fn push_signal(&mut self, signal: Arc<dyn SignalNode>) {
        self.signals.push(signal);
    }

    pub(crate) fn push_part(&mut self, part: Arc<PartCore>) {
        self.parts.push(part);
    }

    pub(crate) fn signal(&self, id: SignalId) -> Option<Arc<dyn SignalNode>> {
        self.signals.get(id.0).cloned()
    }

    pub(crate) fn part(&self, id: PartId) -> Option<Arc<PartCore>> {
        self.parts.get(id.0).cloned()
    }
}

static REGISTRY: Mutex<Registry> = Mutex::new(Registry::new());

pub(crate) fn lock() -> MutexGuard<'static, Registry> {
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

/// All registered signals, in construction order.
pub(crate) fn all_signals() -> Vec<Arc<dyn SignalNode>> {
    lock().signals.clone()
}

/// Look up a batch of signals, skipping IDs that are no longer live.
pub(crate) fn signals(ids: &[SignalId]) -> Vec<Arc<dyn SignalNode>> {
    let reg = lock();
    ids.iter().filter_map(|id| reg.signal(*id)).collect()
}

/// Look up a batch of parts, skipping IDs that are no longer live.
pub(crate) fn parts(ids: &[PartId]) -> Vec<Arc<PartCore>> {
    let reg = lock();
    ids.iter().filter_map(|id| reg.part(*id)).collect()
}

/// Name of the part behind `id`, for log and error text.
pub(crate) fn part_name(id: PartId) -> String {
    lock()
        .part(id)
        .map_or_else(|| format!("part{}", id.0), |p| p.name())
}

/// Drop every registered signal and part.
///
/// The netlist graph stores IDs rather than references, so clearing the
/// registry releases all nodes that user code no longer holds handles to.
/// A [`crate::Simulator`] must not be used across a `cleanup` call.
pub fn cleanup() {
    let mut reg = lock();
    reg.signals.clear();
    reg.parts.clear();
}
