//! Submission generation tracking.
//!
//! Each submitted query is tagged with a [`Generation`]. Only the newest
//! generation may update session state; outcomes from older generations are
//! stale and are dropped when they arrive. Nothing is aborted: superseded
//! requests may still finish, they just no longer count.

use std::fmt;

/// Tag identifying one submission.
///
/// Generations are totally ordered; a larger value is a newer submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// Returns the raw counter value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic source of generations.
///
/// Starts at generation 0, which no submission ever carries.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: Generation,
    superseded: u64,
}

impl GenerationCounter {
    /// Creates a counter at generation 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation and returns it.
    ///
    /// Every earlier generation becomes stale.
    pub fn advance(&mut self) -> Generation {
        self.current = Generation(self.current.0 + 1);
        self.current
    }

    /// Returns the newest generation handed out.
    pub fn current(&self) -> Generation {
        self.current
    }

    /// Checks whether `generation` is still the newest one.
    pub fn is_current(&self, generation: Generation) -> bool {
        generation == self.current
    }

    /// Records that an outcome of a stale generation was dropped.
    pub fn note_superseded(&mut self) {
        self.superseded += 1;
    }

    /// Number of stale outcomes dropped so far.
    pub fn superseded_count(&self) -> u64 {
        self.superseded
    }
}
