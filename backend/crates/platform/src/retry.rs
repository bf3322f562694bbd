//! CSRF retry policy
//!
//! One request may be retried at most once, and only after a CSRF rejection.

/// Position of a request in its refresh-and-retry cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// The original dispatch
    #[default]
    FirstAttempt,
    /// The single retry after a token refresh; terminal
    RetriedOnce,
}

impl RetryPolicy {
    /// State for the next attempt, `None` once the cap is reached
    #[inline]
    pub const fn next(self) -> Option<Self> {
        match self {
            RetryPolicy::FirstAttempt => Some(RetryPolicy::RetriedOnce),
            RetryPolicy::RetriedOnce => None,
        }
    }

    #[inline]
    pub const fn is_retry(self) -> bool {
        matches!(self, RetryPolicy::RetriedOnce)
    }
}
