// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixel access instrumentation.
//
// Rasters report reads, writes, and comparisons to an optional observer
// instead of bumping global counters. `PixelCounters` is the stock observer
// used for complexity measurements.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::types::PixelEvent;

/// Receiver of pixel-level events.
pub trait PixelObserver: fmt::Debug + Send + Sync {
    /// Record `count` occurrences of `event`.
    fn add(&self, event: PixelEvent, count: u64);

    /// Record a single occurrence of `event`.
    fn increment(&self, event: PixelEvent) {
        self.add(event, 1);
    }
}

/// Atomic event counters.
#[derive(Debug, Default)]
pub struct PixelCounters {
    reads: AtomicU64,
    writes: AtomicU64,
    comparisons: AtomicU64,
}

/// Point-in-time copy of [`PixelCounters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CounterSnapshot {
    pub reads: u64,
    pub writes: u64,
    pub comparisons: u64,
    /// Reads plus writes.
    pub accesses: u64,
}

impl PixelCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        let reads = self.reads.load(Ordering::Relaxed);
        let writes = self.writes.load(Ordering::Relaxed);
        CounterSnapshot {
            reads,
            writes,
            comparisons: self.comparisons.load(Ordering::Relaxed),
            accesses: reads + writes,
        }
    }

    /// Zero every counter.
    pub fn reset(&self) {
        self.reads.store(0, Ordering::Relaxed);
        self.writes.store(0, Ordering::Relaxed);
        self.comparisons.store(0, Ordering::Relaxed);
    }
}

impl PixelObserver for PixelCounters {
    fn add(&self, event: PixelEvent, count: u64) {
        let counter = match event {
            PixelEvent::Read => &self.reads,
            PixelEvent::Write => &self.writes,
            PixelEvent::Compare => &self.comparisons,
        };
        counter.fetch_add(count, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_event_separately() {
        let counters = PixelCounters::new();
        counters.increment(PixelEvent::Read);
        counters.increment(PixelEvent::Read);
        counters.add(PixelEvent::Write, 10);
        counters.increment(PixelEvent::Compare);

        let snap = counters.snapshot();
        assert_eq!(snap.reads, 2);
        assert_eq!(snap.writes, 10);
        assert_eq!(snap.comparisons, 1);
        assert_eq!(snap.accesses, 12);
    }

    #[test]
    fn reset_zeroes_everything() {
        let counters = PixelCounters::new();
        counters.add(PixelEvent::Compare, 5);
        counters.reset();
        assert_eq!(counters.snapshot(), CounterSnapshot::default());
    }
}
