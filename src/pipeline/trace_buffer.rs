//! Bounded in-memory history of recent records.

use std::collections::VecDeque;

use crate::record::LogRecord;

/// Records retained by a logger's trace buffer.
pub const TRACE_CAPACITY: usize = 50;

/// Ring buffer of the most recent records, oldest first.
#[derive(Debug, Clone)]
pub struct TraceBuffer {
    entries: VecDeque<LogRecord>,
    capacity: usize,
}

impl TraceBuffer {
    pub fn new() -> Self {
        Self::with_capacity(TRACE_CAPACITY)
    }

    /// A buffer holding at most `capacity` records (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append at the tail, evicting the head when full.
    pub fn push(&mut self, record: LogRecord) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest retained record.
    pub fn head(&self) -> Option<&LogRecord> {
        self.entries.front()
    }

    /// Most recent record.
    pub fn latest(&self) -> Option<&LogRecord> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogRecord> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<LogRecord> {
        self.entries.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for TraceBuffer {
    fn default() -> Self {
        Self::new()
    }
}
