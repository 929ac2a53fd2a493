//! Priority frontier for the path search.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::StopIndex;

/// A stop waiting to be settled, with the time it was reached in.
#[derive(Debug, Clone, Copy)]
pub(super) struct FrontierEntry {
    pub time: f64,
    /// Push order, for breaking ties between equal times.
    pub seq: u64,
    pub stop: StopIndex,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the smallest time, then the earliest push.
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of stops keyed by accumulated time, first-in-first-out on ties.
#[derive(Debug, Default)]
pub(super) struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stop: StopIndex, time: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(FrontierEntry { time, seq, stop });
    }

    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }
}
