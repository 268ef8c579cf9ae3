//

use std::thread::panicking;

use parking_lot::{Condvar, Mutex, MutexGuard};

use crate::core::barrier::Barrier;

// single-capacity mailbox between the producer and the consumers
#[derive(Debug, Default)]
pub struct Slot(Option<i64>);

impl Slot {
    pub fn put(&mut self, value: i64) {
        let Self(inner) = self;
        debug_assert!(inner.is_none(), "slot already holds an unconsumed value");
        *inner = Some(value);
    }

    pub fn take(&mut self) -> Option<i64> {
        self.0.take()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub writes: usize,
    pub reads: usize,
    // barrier count seen by the first write, None if nothing was written
    pub registered_at_first_write: Option<usize>,
}

struct Shared {
    slot: Slot,
    alive: bool,
    barrier: Barrier,
    stats: Stats,
}

/// State shared by every worker of one pipeline run.
///
/// A single mutex guards the slot, the liveness flag and the barrier
/// counters. Three condition variables split the wakeups: `started` for
/// the barrier, `filled` for consumers waiting on data and `drained` for
/// the producer waiting on consumption. Every wait re-checks its
/// predicate in a loop.
pub struct RunState {
    shared: Mutex<Shared>,
    started: Condvar,
    filled: Condvar,
    drained: Condvar,
}

impl RunState {
    pub fn new(expected: usize) -> Self {
        Self {
            shared: Mutex::new(Shared {
                slot: Slot::default(),
                alive: true,
                barrier: Barrier::new(expected),
                stats: Stats::default(),
            }),
            started: Condvar::new(),
            filled: Condvar::new(),
            drained: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<Shared> {
        self.shared.lock()
    }

    /// Blocks until every expected participant registered, or until the
    /// run is closed before the barrier filled.
    pub fn register_and_wait(&self) {
        let mut shared = self.lock();
        if shared.barrier.register() {
            debug!(
                "barrier open with {} participants",
                shared.barrier.registered()
            );
            self.started.notify_all();
        }
        while !shared.barrier.is_open() && shared.alive {
            self.started.wait(&mut shared);
        }
    }

    /// Places `value` in the empty slot, wakes one consumer and blocks
    /// until the value was taken. Returns false without writing when the
    /// run is already closed.
    pub fn offer(&self, value: i64) -> bool {
        let mut shared = self.lock();
        if !shared.alive {
            return false;
        }
        shared.slot.put(value);
        if shared.stats.writes == 0 {
            let registered = shared.barrier.registered();
            shared.stats.registered_at_first_write = Some(registered);
        }
        shared.stats.writes += 1;
        self.filled.notify_one();
        while !shared.slot.is_empty() && shared.alive {
            self.drained.wait(&mut shared);
        }
        true
    }

    /// Blocks until a value is available and takes it, waking the
    /// producer. Returns None once the run is closed and the slot is
    /// empty.
    pub fn take(&self) -> Option<i64> {
        let mut shared = self.lock();
        while shared.slot.is_empty() && shared.alive {
            self.filled.wait(&mut shared);
        }
        let value = shared.slot.take()?;
        shared.stats.reads += 1;
        self.drained.notify_one();
        Some(value)
    }

    /// Flips the liveness flag and wakes every waiter. Only the first call
    /// has an effect.
    pub fn close(&self) {
        let mut shared = self.lock();
        if !shared.alive {
            return;
        }
        shared.alive = false;
        self.started.notify_all();
        self.filled.notify_all();
        self.drained.notify_all();
    }

    pub fn is_alive(&self) -> bool {
        self.lock().alive
    }

    pub fn stats(&self) -> Stats {
        self.lock().stats.clone()
    }

    pub fn is_locked(&self) -> bool {
        self.shared.is_locked()
    }

    /// Returns a guard that closes the run if the holding thread unwinds.
    pub fn close_on_unwind(&self) -> CloseOnUnwind {
        CloseOnUnwind(self)
    }
}

pub struct CloseOnUnwind<'a>(&'a RunState);

impl<'a> Drop for CloseOnUnwind<'a> {
    fn drop(&mut self) {
        if panicking() {
            let Self(state) = self;
            warn!("worker unwinding, closing the run");
            state.close();
        }
    }
}
