//

use std::convert::TryFrom;
use std::thread::{sleep, yield_now};
use std::time::Duration;

use rand::{thread_rng, Rng};

pub mod consumer;
pub mod interruptor;
pub mod producer;

pub use self::consumer::{Consumer, Tally};
pub use self::interruptor::{Interruptor, Rounds};
pub use self::producer::Producer;

// uniform in [0, max_delay]
pub fn random_delay(max_delay: Duration) -> Duration {
    let max_micros = u64::try_from(max_delay.as_micros()).unwrap_or(u64::MAX);
    Duration::from_micros(thread_rng().gen_range(0, max_micros.saturating_add(1)))
}

// a zero bound means no sleep at all
pub fn pause(max_delay: Duration) {
    if max_delay > Duration::from_secs(0) {
        sleep(random_delay(max_delay));
    }
}

// like pause, but always gives up the processor
pub fn pause_or_yield(max_delay: Duration) {
    if max_delay > Duration::from_secs(0) {
        sleep(random_delay(max_delay));
    } else {
        yield_now();
    }
}
