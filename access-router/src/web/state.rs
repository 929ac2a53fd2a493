//! Application state for the web layer.

use std::sync::Arc;

use crate::accessibility::RequirementRegistry;
use crate::graph::TransitGraph;
use crate::planner::Planner;
use crate::updates::UpdateChannel;

/// Shared application state.
///
/// Every clone refers to the same graph, so outages reported through
/// `updates` are seen by the next route query.
#[derive(Clone)]
pub struct AppState {
    /// Transit network
    pub graph: Arc<TransitGraph>,

    /// Known accessibility requirements
    pub registry: Arc<RequirementRegistry>,

    /// Outage reporting handle over `graph`
    pub updates: UpdateChannel,
}

impl AppState {
    /// Create a new app state.
    pub fn new(graph: TransitGraph, registry: RequirementRegistry) -> Self {
        let graph = Arc::new(graph);
        Self {
            updates: UpdateChannel::new(Arc::clone(&graph)),
            graph,
            registry: Arc::new(registry),
        }
    }

    /// A planner over the shared graph and registry.
    pub fn planner(&self) -> Planner<'_> {
        Planner::new(&self.graph, &self.registry)
    }
}
