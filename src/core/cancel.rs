//

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::core::error::{Error, Result};

/// Cooperative cancellation handle owned by one consumer thread.
///
/// Other threads call [`cancel`](CancelToken::cancel); the owner decides
/// whether a pending request matters at its cancellation points. Once the
/// owner called [`mask`](CancelToken::mask), requests are recorded but
/// never honored.
#[derive(Debug, Default)]
pub struct CancelToken {
    requests: AtomicUsize,
    masked: AtomicBool,
    finished: AtomicBool,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers a cancellation request. A no-op returning false once the
    /// owner has finished.
    pub fn cancel(&self) -> bool {
        if self.finished.load(Ordering::Acquire) {
            return false;
        }
        self.requests.fetch_add(1, Ordering::AcqRel);
        true
    }

    /// Defers every request for the rest of the owner's lifetime.
    pub fn mask(&self) {
        self.masked.store(true, Ordering::Release);
    }

    pub fn is_masked(&self) -> bool {
        self.masked.load(Ordering::Acquire)
    }

    pub fn test_cancel(&self) -> Result<()> {
        if self.requests() > 0 && !self.is_masked() {
            return Err(Error::Cancelled);
        }
        Ok(())
    }

    pub fn finish(&self) {
        self.finished.store(true, Ordering::Release);
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmasked_request_cancels() {
        let token = CancelToken::new();
        assert!(token.test_cancel().is_ok());
        assert!(token.cancel());
        match token.test_cancel() {
            Err(Error::Cancelled) => {}
            other => panic!("expected cancellation, got {:?}", other),
        }
    }

    #[test]
    fn test_masked_request_ignored() {
        let token = CancelToken::new();
        token.mask();
        for _ in 0..100 {
            token.cancel();
        }
        assert_eq!(token.requests(), 100);
        assert!(token.test_cancel().is_ok());
    }

    #[test]
    fn test_cancel_after_finish_is_noop() {
        let token = CancelToken::new();
        token.finish();
        assert!(!token.cancel());
        assert_eq!(token.requests(), 0);
        assert!(token.is_finished());
    }
}
