//! Protocol number allocation.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Datelike, Utc};

/// Single-writer allocator for protocol numbers.
///
/// Format: `{prefix}-{year}-{seq}` with the sequence zero-padded to four
/// digits (widening past 9999). The sequence is a process-wide atomic,
/// so concurrent synthesize calls always receive distinct numbers. An
/// embedding that persists sessions must re-seed the allocator above the
/// stored high-water mark on reload.
#[derive(Debug)]
pub struct ProtocolAllocator {
    prefix: String,
    next: AtomicU64,
}

impl ProtocolAllocator {
    /// Allocator starting at sequence 1.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::seeded(prefix, 1)
    }

    /// Allocator starting at `next_seq` (reload path).
    pub fn seeded(prefix: impl Into<String>, next_seq: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(next_seq.max(1)),
        }
    }

    /// Allocate the next protocol number for the current year.
    pub fn allocate(&self) -> String {
        self.allocate_for_year(Utc::now().year())
    }

    /// Allocate the next protocol number for a given year.
    pub fn allocate_for_year(&self, year: i32) -> String {
        let seq = self.next.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}-{:04}", self.prefix, year, seq)
    }

    /// The sequence the next allocation will use.
    pub fn next_sequence(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}
