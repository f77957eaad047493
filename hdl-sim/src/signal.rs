//! Typed, shared wires.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use itertools::Itertools;
use tracing::warn;

use hdl_types::Logic;

use crate::error::SimulationError;
use crate::part;
use crate::registry::{self, PartId, SignalId};
use crate::value::{DriveConflict, Value};

/// A commit could not produce a single committed value. The simulator
/// attaches the tick before surfacing this to the caller.
#[derive(Debug)]
pub(crate) enum CommitError {
    MultipleDrivers { signal: String, drivers: Vec<String> },
    UnresolvedDrive { signal: String, drivers: Vec<String> },
}

impl CommitError {
    pub(crate) fn at_tick(self, tick: u64) -> SimulationError {
        match self {
            Self::MultipleDrivers { signal, drivers } => {
                SimulationError::MultipleDrivers { tick, signal, drivers }
            }
            Self::UnresolvedDrive { signal, drivers } => {
                SimulationError::UnresolvedDrive { tick, signal, drivers }
            }
        }
    }
}

/// The type-erased face a signal shows to the propagator.
pub(crate) trait SignalNode: Send + Sync {
    fn id(&self) -> SignalId;
    fn name(&self) -> String;
    fn set_name(&self, name: &str);
    /// Whether the pending drive differs from the committed value. True
    /// once unconditionally before the first commit, so freshly built
    /// netlists settle their initial values.
    fn changed(&self) -> bool;
    fn commit(&self) -> Result<(), CommitError>;
    fn children(&self) -> Vec<PartId>;
    fn add_child(&self, part: PartId);
}

struct State<T> {
    cur: T,
    prev: T,
    /// Last value driven per driver. Single-driver mode keeps one entry.
    pending: Vec<(Option<PartId>, T)>,
    changed: bool,
    first: bool,
    /// Two distinct parts drove this single-driver signal.
    conflict: Option<[Option<PartId>; 2]>,
    /// Callers that already observed the current edge.
    seen: HashSet<Option<PartId>>,
}

pub(crate) struct SignalCore<T> {
    id: SignalId,
    name: Mutex<String>,
    children: Mutex<Vec<PartId>>,
    state: Mutex<State<T>>,
}

impl<T: Value> SignalCore<T> {
    fn state(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn driver_label(driver: Option<PartId>) -> String {
    driver.map_or_else(|| "testbench".to_owned(), registry::part_name)
}

fn driver_labels(drivers: impl IntoIterator<Item = Option<PartId>>) -> Vec<String> {
    let mut labels: Vec<String> = drivers.into_iter().map(driver_label).collect();
    labels.sort();
    labels
}

impl<T: Value> SignalNode for SignalCore<T> {
    fn id(&self) -> SignalId {
        self.id
    }

    fn name(&self) -> String {
        self.name.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_name(&self, name: &str) {
        *self.name.lock().unwrap_or_else(PoisonError::into_inner) = name.to_owned();
    }

    fn changed(&self) -> bool {
        let st = self.state();
        st.first || st.changed
    }

    fn commit(&self) -> Result<(), CommitError> {
        let mut st = self.state();
        if let Some(conflict) = st.conflict.take() {
            return Err(CommitError::MultipleDrivers {
                signal: self.name(),
                drivers: driver_labels(conflict),
            });
        }

        if !st.pending.is_empty() {
            let values: Vec<T> = st.pending.iter().map(|(_, v)| v.clone()).collect();
            let resolved = match T::resolve(&values) {
                Ok(resolved) => resolved,
                Err(DriveConflict) => {
                    let drivers = driver_labels(st.pending.iter().map(|(d, _)| *d));
                    return Err(CommitError::UnresolvedDrive {
                        signal: self.name(),
                        drivers,
                    });
                }
            };
            if st.pending.len() > 1 && !values.contains(&resolved) {
                warn!(
                    signal = %self.name(),
                    drivers = %st.pending.iter().map(|(d, _)| driver_label(*d)).join(", "),
                    committed = %resolved,
                    "conflicting drivers"
                );
            }
            let prev = std::mem::replace(&mut st.cur, resolved);
            st.prev = prev;
        } else {
            st.prev = st.cur.clone();
        }

        st.seen.clear();
        st.changed = false;
        st.first = false;
        Ok(())
    }

    fn children(&self) -> Vec<PartId> {
        self.children.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn add_child(&self, part: PartId) {
        let mut children = self.children.lock().unwrap_or_else(PoisonError::into_inner);
        if !children.contains(&part) {
            children.push(part);
        }
    }
}

/// A typed wire of the netlist.
///
/// Handles are cheap to clone and share one underlying cell; the cell
/// stays registered until [`crate::cleanup`] runs. Reads always observe
/// the committed value — drives become visible only after the propagator
/// commits the signal in the next delta cycle.
pub struct Signal<T: Value> {
    core: Arc<SignalCore<T>>,
}

impl<T: Value> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self { core: self.core.clone() }
    }
}

impl<T: Value> Signal<T> {
    /// Create a signal holding `initial`, with a generated name.
    pub fn new(initial: T) -> Self {
        Self::create(initial, None)
    }

    /// Create a named signal holding `initial`.
    pub fn with_name(initial: T, name: &str) -> Self {
        Self::create(initial, Some(name))
    }

    fn create(initial: T, name: Option<&str>) -> Self {
        let mut reg = registry::lock();
        let id = SignalId(reg.signal_count());
        let name = name.map_or_else(|| format!("wire{}", id.0), str::to_owned);
        let core = Arc::new(SignalCore {
            id,
            name: Mutex::new(name),
            children: Mutex::new(Vec::new()),
            state: Mutex::new(State {
                cur: initial.clone(),
                prev: initial,
                pending: Vec::new(),
                changed: false,
                first: true,
                conflict: None,
                seen: HashSet::new(),
            }),
        });
        reg.push_signal(core.clone());
        Self { core }
    }

    /// The committed value. Safe from any context.
    pub fn read(&self) -> T {
        self.core.state().cur.clone()
    }

    /// Drive a new value. It becomes the committed value in the next
    /// delta cycle, never immediately.
    ///
    /// The driving part is taken from the part currently executing on
    /// this thread; drives from outside any part count as testbench
    /// stimuli.
    pub fn drive(&self, value: T) {
        let driver = part::current_part();
        let mut st = self.core.state();
        if cfg!(feature = "multi-driver") {
            match st.pending.iter().position(|(d, _)| *d == driver) {
                Some(i) => st.pending[i].1 = value,
                None => st.pending.push((driver, value)),
            }
        } else {
            if cfg!(feature = "driver-check") && st.conflict.is_none() {
                let existing = st.pending.first().and_then(|(d, _)| *d);
                if let (Some(a), Some(b)) = (existing, driver) {
                    if a != b {
                        st.conflict = Some([Some(a), Some(b)]);
                    }
                }
            }
            st.pending.clear();
            st.pending.push((driver, value));
        }

        let values: Vec<T> = st.pending.iter().map(|(_, v)| v.clone()).collect();
        st.changed = match T::resolve(&values) {
            Ok(resolved) => resolved != st.cur,
            Err(DriveConflict) => true,
        };
    }

    /// Whether this signal changed in the last commit, reported once per
    /// asking part per change.
    pub fn event(&self) -> bool {
        let caller = part::current_part();
        let mut st = self.core.state();
        if st.prev != st.cur && !st.seen.contains(&caller) {
            st.seen.insert(caller);
            true
        } else {
            false
        }
    }

    /// The signal's name.
    pub fn name(&self) -> String {
        SignalNode::name(&*self.core)
    }

    /// Rename the signal.
    pub fn set_name(&self, name: &str) {
        SignalNode::set_name(&*self.core, name);
    }

    pub(crate) fn node(&self) -> Arc<dyn SignalNode> {
        self.core.clone()
    }

    pub(crate) fn id(&self) -> SignalId {
        self.core.id
    }
}

impl Signal<Logic> {
    /// Just rose to high. Consumes the edge for the asking part only when
    /// the level is high, so a falling-edge check on the same wire still
    /// sees it.
    pub fn rising_edge(&self) -> bool {
        self.read() == Logic::High && self.event()
    }

    /// Just left the high state.
    pub fn falling_edge(&self) -> bool {
        self.read() != Logic::High && self.event()
    }
}

impl<T: Value> fmt::Display for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.read())
    }
}

impl<T: Value> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name(), self.read())
    }
}

/// Anything that exposes wires to connect to a [`crate::Part`]: a single
/// [`Signal`] or a whole [`crate::Bus`].
pub trait Connect {
    /// Append the IDs of the underlying wires.
    fn collect_signals(&self, into: &mut Vec<SignalId>);
}

impl<T: Value> Connect for Signal<T> {
    fn collect_signals(&self, into: &mut Vec<SignalId>) {
        into.push(self.core.id);
    }
}
