//! Last-request-wins ordering
//!
//! Each view tags an in-flight call with a token from its
//! [`RequestSequence`]. When the call resolves, its result is applied only
//! if no newer call has been started since; otherwise it is dropped.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic per-call token
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceToken(u64);

impl SequenceToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Generation counter for one view
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a call; every earlier token becomes stale
    pub fn begin(&self) -> SequenceToken {
        SequenceToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `token` belongs to the most recently started call
    pub fn is_latest(&self, token: SequenceToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }
}

/// What happened to a resolved call
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    /// The result became the visible state
    Applied(T),
    /// A newer call was started first; the result was discarded
    Superseded,
}

impl<T> Resolution<T> {
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(v) => Some(v),
            Self::Superseded => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_token_wins() {
        let seq = RequestSequence::new();
        let a = seq.begin();
        let b = seq.begin();

        assert!(a < b);
        assert!(!seq.is_latest(a));
        assert!(seq.is_latest(b));
    }

    #[test]
    fn test_single_call_is_latest() {
        let seq = RequestSequence::new();
        let a = seq.begin();
        assert!(seq.is_latest(a));
        assert_eq!(a.value(), 1);
    }

    #[test]
    fn test_resolution_helpers() {
        assert_eq!(Resolution::Applied(3).applied(), Some(3));
        assert!(Resolution::<i32>::Superseded.is_superseded());
        assert_eq!(Resolution::<i32>::Superseded.applied(), None);
    }
}
