//! Runtime accessibility updates.
//!
//! Outage reporters hold an `UpdateChannel` and flip elevator status while
//! queries run against the same graph. The channel is the only way to change
//! a built graph from outside the crate.

use std::sync::Arc;

use crate::domain::StopId;
use crate::graph::{GraphError, TransitGraph};

/// Handle for reporting elevator outages and repairs.
///
/// Cloning is cheap; every clone updates the same graph.
#[derive(Debug, Clone)]
pub struct UpdateChannel {
    graph: Arc<TransitGraph>,
}

impl UpdateChannel {
    /// Create a channel over a shared graph.
    pub fn new(graph: Arc<TransitGraph>) -> Self {
        Self { graph }
    }

    /// Set whether the elevator at `stop` is working.
    ///
    /// Returns the previous status, so a repeated report can be told apart
    /// from a real transition. Queries already running see the change from
    /// their next read of this stop onward.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::UnknownStop` if the stop is not in the graph.
    pub fn set_elevator_status(&self, stop: &StopId, working: bool) -> Result<bool, GraphError> {
        self.graph.set_elevator_status(stop, working)
    }

    /// The graph this channel updates.
    pub fn graph(&self) -> &Arc<TransitGraph> {
        &self.graph
    }
}
