//

use crossbeam::thread::scope;

use crate::config::Config;
use crate::core::cancel::CancelToken;
use crate::core::error::{Error, Result};
use crate::core::state::RunState;
use crate::util::trace::TraceSink;
use crate::workers::{Consumer, Interruptor, Producer, Rounds, Tally};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    pub total: i64,
    pub partials: Vec<i64>,
    pub produced: usize,
    pub consumed: usize,
    pub rounds: usize,
    pub attempts: usize,
    pub delivered: usize,
    pub registered_at_first_write: Option<usize>,
}

impl Report {
    fn aggregate(produced: usize, tallies: &[Tally], rounds: Rounds, state: &RunState) -> Self {
        let stats = state.stats();
        Self {
            total: tallies
                .iter()
                .fold(0i64, |total, tally| total.wrapping_add(tally.partial)),
            partials: tallies.iter().map(|tally| tally.partial).collect(),
            produced,
            consumed: tallies.iter().map(|tally| tally.consumed).sum(),
            rounds: rounds.rounds,
            attempts: rounds.attempts,
            delivered: rounds.delivered,
            registered_at_first_write: stats.registered_at_first_write,
        }
    }
}

/// One run of the producer, the consumer pool and the interruptor.
pub struct Pipeline {
    config: Config,
    state: RunState,
    tokens: Vec<CancelToken>,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        // producer and interruptor register with the barrier too
        let state = RunState::new(config.consumers + 2);
        let tokens = (0..config.consumers).map(|_| CancelToken::new()).collect();
        Ok(Self {
            config,
            state,
            tokens,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn tokens(&self) -> &[CancelToken] {
        &self.tokens
    }

    /// Streams `source` through the consumers and returns the aggregated
    /// report once every worker has been joined.
    pub fn run<S>(&self, source: S, trace: Option<&dyn TraceSink>) -> Result<Report>
    where
        S: IntoIterator<Item = i64> + Send,
    {
        let state = &self.state;
        let max_delay = self.config.max_delay;
        info!(
            "starting {} consumers with max delay {:?}",
            self.config.consumers, max_delay
        );

        let report = scope(|s| {
            let producer = s.spawn(move |_| Producer::new(state, source).run());
            let consumers: Vec<_> = self
                .tokens
                .iter()
                .map(|token| {
                    let mut consumer = Consumer::new(state, token, max_delay);
                    if let Some(trace) = trace {
                        consumer = consumer.with_trace(trace);
                    }
                    s.spawn(move |_| consumer.run())
                })
                .collect();
            let interruptor =
                s.spawn(move |_| Interruptor::new(state, &self.tokens, max_delay).run());

            // workers close the run when they unwind, so these joins return
            let produced = producer.join().map_err(|_| {
                state.close();
                Error::WorkerPanicked("producer")
            });
            let mut tallies = Vec::with_capacity(consumers.len());
            let mut failure = None;
            for consumer in consumers {
                match consumer.join() {
                    Ok(Ok(tally)) => tallies.push(tally),
                    Ok(Err(err)) => {
                        state.close();
                        failure.get_or_insert(err);
                    }
                    Err(_) => {
                        state.close();
                        failure.get_or_insert(Error::WorkerPanicked("consumer"));
                    }
                }
            }
            let rounds = interruptor
                .join()
                .map_err(|_| Error::WorkerPanicked("interruptor"));

            let produced = produced?;
            if let Some(err) = failure {
                return Err(err);
            }
            Ok(Report::aggregate(produced, &tallies, rounds?, state))
        })
        .map_err(|_| Error::WorkerPanicked("pipeline"))??;

        info!(
            "total {} from {} values, {} cancellation requests ignored",
            report.total, report.consumed, report.delivered
        );
        Ok(report)
    }
}
