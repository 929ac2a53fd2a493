//! Live and snapshotted stop attribute state.
//!
//! The only attribute that changes at runtime is a stop's elevator status.
//! It lives in one `AtomicBool` per stop, so a reader always sees either the
//! value before or after a concurrent update and never needs a lock.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::StopAttributes;

use super::{StopIndex, TransitGraph};

/// Read access to the current accessibility state of stops.
///
/// The search engine is written against this trait so that it can run over
/// live state or over a snapshot taken when the query started.
pub trait AttributeView {
    /// Returns the attributes of a stop as of this read.
    ///
    /// Each call reads the mutable elevator flag exactly once, so the
    /// returned value is internally consistent.
    fn stop_attributes(&self, stop: StopIndex) -> StopAttributes;
}

/// Mutable per-stop state, indexed by `StopIndex`.
#[derive(Debug, Default)]
pub(crate) struct LiveAttributes {
    elevator_working: Vec<AtomicBool>,
}

impl LiveAttributes {
    pub(crate) fn push(&mut self, elevator_working: bool) {
        self.elevator_working.push(AtomicBool::new(elevator_working));
    }

    pub(crate) fn elevator_working(&self, stop: StopIndex) -> bool {
        self.elevator_working[stop.0].load(Ordering::Acquire)
    }

    /// Stores a new elevator status and returns the previous one.
    pub(crate) fn set_elevator_working(&self, stop: StopIndex, working: bool) -> bool {
        self.elevator_working[stop.0].swap(working, Ordering::AcqRel)
    }

    fn copy(&self) -> Vec<bool> {
        self.elevator_working
            .iter()
            .map(|flag| flag.load(Ordering::Acquire))
            .collect()
    }
}

/// A copy of every stop's mutable state, taken at one point in time.
///
/// Queries run against a snapshot see none of the updates made after it was
/// taken. Copying is O(V); each flag is read atomically but the copy as a
/// whole is not a single atomic step, so an update racing the copy may or
/// may not be included.
#[derive(Debug)]
pub struct AttributeSnapshot<'g> {
    graph: &'g TransitGraph,
    elevator_working: Vec<bool>,
}

impl<'g> AttributeSnapshot<'g> {
    pub(crate) fn new(graph: &'g TransitGraph) -> Self {
        Self {
            graph,
            elevator_working: graph.live().copy(),
        }
    }
}

impl AttributeView for TransitGraph {
    fn stop_attributes(&self, stop: StopIndex) -> StopAttributes {
        self.static_attributes(stop, self.live().elevator_working(stop))
    }
}

impl AttributeView for AttributeSnapshot<'_> {
    fn stop_attributes(&self, stop: StopIndex) -> StopAttributes {
        self.graph
            .static_attributes(stop, self.elevator_working[stop.0])
    }
}
