use std::time::{Duration, Instant};

/// Per-call execution context handed to every repository operation.
///
/// Carries the optional deadline after which the operation must give up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationContext {
    deadline: Option<Instant>,
}

impl OperationContext {
    /// A context without a deadline.
    pub fn background() -> Self {
        Self { deadline: None }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, `None` when unbounded.
    /// Saturates at zero once the deadline has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    pub fn is_expired(&self) -> bool {
        matches!(self.remaining(), Some(remaining) if remaining.is_zero())
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::background()
    }
}
