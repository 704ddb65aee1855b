use std::time::{Duration, Instant};

/// A scheduled render that has not fired yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRender {
    pub generation: u64,
    pub deadline: Instant,
}

/// Holds at most one [`PendingRender`]. Arming replaces the previous one,
/// which is how an edit cancels the render scheduled by the edit before it.
///
/// Time is always passed in, never read, so callers decide what "now" is.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    pending: Option<PendingRender>,
    generation: u64,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
            generation: 0,
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    pub fn pending(&self) -> Option<PendingRender> {
        self.pending
    }

    /// Schedule a render one quiet period after `now`, replacing any pending one.
    pub fn arm(&mut self, now: Instant) -> PendingRender {
        self.generation = self.generation.wrapping_add(1);
        let task = PendingRender {
            generation: self.generation,
            deadline: now + self.quiet,
        };
        self.pending = Some(task);
        task
    }

    pub fn cancel(&mut self) -> Option<PendingRender> {
        self.pending.take()
    }

    /// Take the pending render if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<PendingRender> {
        match self.pending {
            Some(task) if now >= task.deadline => self.pending.take(),
            _ => None,
        }
    }
}
