//

use std::cell::Cell;
use std::io::{stderr, Write};

use crossbeam::channel::Sender;
use parking_lot::{const_mutex, Mutex};

struct IdGen(usize);

impl IdGen {
    const fn new() -> Self {
        IdGen(0)
    }

    fn create(&mut self) -> usize {
        let Self(next_id) = self;
        let id = *next_id;
        *next_id += 1;
        id
    }
}

// independent of any run state lock
static THREAD_IDS: Mutex<IdGen> = const_mutex(IdGen::new());

thread_local! {
    static THREAD_ID: Cell<Option<usize>> = Cell::new(None);
}

/// Small per-thread id for trace output, assigned on first call.
pub fn thread_id() -> usize {
    THREAD_ID.with(|id| match id.get() {
        Some(id) => id,
        None => {
            let fresh = THREAD_IDS.lock().create();
            id.set(Some(fresh));
            fresh
        }
    })
}

pub trait TraceSink: Sync {
    fn record(&self, thread_id: usize, partial: i64);
}

pub struct StderrTrace;

impl TraceSink for StderrTrace {
    fn record(&self, thread_id: usize, partial: i64) {
        // diagnostics only, a failed write must not disturb the run
        let _ = writeln!(stderr().lock(), "({}, {})", thread_id, partial);
    }
}

impl TraceSink for Sender<(usize, i64)> {
    fn record(&self, thread_id: usize, partial: i64) {
        let _ = self.send((thread_id, partial));
    }
}
