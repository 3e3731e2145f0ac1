/// Classification for retry policy.
///
/// Used by callers to decide whether a failed quote fetch is worth retrying.
///
/// | Class | Retry? |
/// |-------|--------|
/// | `Never` | No, the request itself is invalid |
/// | `WithBackoff` | Yes, after an exponential backoff |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - bad symbol, validation error, or terminal failure.
    /// The request is fundamentally invalid and retrying won't help.
    Never,

    /// Transient failure (rate limiting, timeout, network trouble).
    /// The same request may succeed later.
    WithBackoff,
}

impl RetryClass {
    /// Returns true when a retry may succeed.
    pub fn is_retryable(self) -> bool {
        matches!(self, RetryClass::WithBackoff)
    }
}
