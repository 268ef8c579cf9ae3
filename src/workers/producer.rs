//

use crate::core::state::RunState;

pub struct Producer<'a, I> {
    state: &'a RunState,
    source: I,
}

impl<'a, I> Producer<'a, I>
where
    I: Iterator<Item = i64>,
{
    pub fn new<S>(state: &'a RunState, source: S) -> Self
    where
        S: IntoIterator<Item = i64, IntoIter = I>,
    {
        Self {
            state,
            source: source.into_iter(),
        }
    }

    /// Hands every value of the source to the consumers one at a time,
    /// then closes the run. Returns the number of values handed over.
    pub fn run(self) -> usize {
        let Self { state, source } = self;
        let _unwind = state.close_on_unwind();
        state.register_and_wait();
        let mut produced = 0;
        for value in source {
            if !state.offer(value) {
                warn!("run closed before value {} could be offered", value);
                break;
            }
            produced += 1;
        }
        debug!("producer exhausted after {} values", produced);
        state.close();
        produced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossbeam::thread::scope;

    #[test]
    fn test_empty_source_closes() {
        let state = RunState::new(1);
        let produced = Producer::new(&state, Vec::new()).run();
        assert_eq!(produced, 0);
        assert!(!state.is_alive());
    }

    #[test]
    fn test_waits_for_each_take() {
        let state = RunState::new(2);
        let (produced, taken) = scope(|s| {
            let producer = s.spawn(|_| Producer::new(&state, vec![3, 1, 4]).run());
            state.register_and_wait();
            let mut taken = Vec::new();
            while let Some(value) = state.take() {
                taken.push(value);
            }
            (producer.join().unwrap(), taken)
        })
        .unwrap();
        assert_eq!(produced, 3);
        assert_eq!(taken, vec![3, 1, 4]);
    }
}
