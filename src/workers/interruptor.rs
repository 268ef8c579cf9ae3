//

use std::time::Duration;

use crate::core::cancel::CancelToken;
use crate::core::state::RunState;
use crate::workers::pause_or_yield;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rounds {
    pub rounds: usize,
    pub attempts: usize,
    // requests that reached a consumer still running
    pub delivered: usize,
}

/// Keeps firing cancellation requests at every consumer until the run
/// closes.
pub struct Interruptor<'a> {
    state: &'a RunState,
    targets: &'a [CancelToken],
    max_delay: Duration,
}

impl<'a> Interruptor<'a> {
    pub fn new(state: &'a RunState, targets: &'a [CancelToken], max_delay: Duration) -> Self {
        Self {
            state,
            targets,
            max_delay,
        }
    }

    pub fn run(self) -> Rounds {
        let _unwind = self.state.close_on_unwind();
        self.state.register_and_wait();
        let mut rounds = Rounds::default();
        loop {
            for target in self.targets {
                rounds.attempts += 1;
                if target.cancel() {
                    rounds.delivered += 1;
                }
            }
            rounds.rounds += 1;
            if !self.state.is_alive() {
                break;
            }
            pause_or_yield(self.max_delay);
        }
        trace!(
            "interruptor stopped after {} rounds, {} requests delivered",
            rounds.rounds,
            rounds.delivered
        );
        rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread::sleep;

    use crossbeam::thread::scope;

    #[test]
    fn test_stops_when_closed() {
        let state = RunState::new(1);
        let targets: Vec<CancelToken> = (0..3).map(|_| CancelToken::new()).collect();
        let rounds = scope(|s| {
            let interruptor =
                s.spawn(|_| Interruptor::new(&state, &targets, Duration::from_millis(1)).run());
            sleep(Duration::from_millis(20));
            state.close();
            interruptor.join().unwrap()
        })
        .unwrap();
        assert!(rounds.rounds >= 1);
        assert_eq!(rounds.attempts, rounds.rounds * 3);
        assert_eq!(rounds.delivered, rounds.attempts);
        assert!(targets.iter().all(|target| target.requests() == rounds.rounds));
    }

    #[test]
    fn test_finished_targets_untouched() {
        let state = RunState::new(1);
        state.close();
        let targets = vec![CancelToken::new(), CancelToken::new()];
        targets[0].finish();
        let rounds = Interruptor::new(&state, &targets, Duration::from_secs(0)).run();
        assert_eq!(rounds.rounds, 1);
        assert_eq!(rounds.attempts, 2);
        assert_eq!(rounds.delivered, 1);
        assert_eq!(targets[0].requests(), 0);
    }
}
