//

use std::time::Duration;

use crate::core::cancel::CancelToken;
use crate::core::error::Result;
use crate::core::state::RunState;
use crate::util::trace::{thread_id, TraceSink};
use crate::workers::pause;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub partial: i64,
    pub consumed: usize,
}

pub struct Consumer<'a> {
    state: &'a RunState,
    token: &'a CancelToken,
    max_delay: Duration,
    trace: Option<&'a dyn TraceSink>,
}

impl<'a> Consumer<'a> {
    pub fn new(state: &'a RunState, token: &'a CancelToken, max_delay: Duration) -> Self {
        Self {
            state,
            token,
            max_delay,
            trace: None,
        }
    }

    pub fn with_trace(mut self, trace: &'a dyn TraceSink) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Drains the slot until the run closes and returns the partial sum.
    ///
    /// Cancellation is masked before anything else, so requests arriving
    /// at any point of the thread's life are deferred forever and the
    /// only exit is the closed run.
    pub fn run(self) -> Result<Tally> {
        self.token.mask();
        let _unwind = self.state.close_on_unwind();
        let tally = self.drain();
        self.token.finish();
        if let Ok(tally) = &tally {
            debug!(
                "consumer {} done: {} values, partial {}, {} cancellations ignored",
                thread_id(),
                tally.consumed,
                tally.partial,
                self.token.requests()
            );
        }
        tally
    }

    fn drain(&self) -> Result<Tally> {
        self.state.register_and_wait();
        let mut tally = Tally::default();
        while let Some(value) = self.state.take() {
            tally.partial = tally.partial.wrapping_add(value);
            tally.consumed += 1;
            if let Some(trace) = self.trace {
                trace.record(thread_id(), tally.partial);
            }
            pause(self.max_delay);
            self.token.test_cancel()?;
        }
        Ok(tally)
    }
}
