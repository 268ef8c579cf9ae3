//

use std::io::BufRead;
use std::vec::IntoIter;

/// Whitespace-separated integers read lazily from `R`.
///
/// The sequence ends at end of input, at the first malformed token, or on
/// a read error.
pub struct TokenReader<R> {
    input: R,
    pending: IntoIter<String>,
    done: bool,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            pending: Vec::new().into_iter(),
            done: false,
        }
    }

    fn refill(&mut self) -> bool {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => false,
            Ok(_) => {
                let tokens: Vec<String> = line.split_whitespace().map(String::from).collect();
                self.pending = tokens.into_iter();
                true
            }
            Err(err) => {
                warn!("input read failed, treating as end of input: {}", err);
                false
            }
        }
    }
}

impl<R: BufRead> Iterator for TokenReader<R> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.done {
            return None;
        }
        loop {
            if let Some(token) = self.pending.next() {
                let parsed: Option<i64> = token.parse().ok();
                if parsed.is_none() {
                    debug!("malformed token {:?} ends the input", token);
                    self.done = true;
                }
                return parsed;
            }
            if !self.refill() {
                self.done = true;
                return None;
            }
        }
    }
}
