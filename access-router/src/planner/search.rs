//! Accessibility-constrained shortest path search.
//!
//! A Dijkstra search over the transit graph in which a stop or segment is
//! only traversed if it is usable under the query's requirement set.
//! Attribute state is read through an `AttributeView` at the moment each
//! stop is considered, so a query sees elevator outages reported before
//! that read and never holds a lock across the search.

use std::collections::VecDeque;

use crate::accessibility::{
    RequirementRegistry, RequirementSet, UnknownRequirement, segment_usable, stop_usable,
};
use crate::domain::StopId;
use crate::graph::{AttributeView, SegmentIndex, StopIndex, TransitGraph};

use super::frontier::Frontier;
use super::path::{Leg, Path};

/// Error from path search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// Source or destination is not in the graph
    #[error("unknown stop: {0}")]
    UnknownStop(StopId),

    /// A requirement name is not registered
    #[error(transparent)]
    UnknownRequirement(#[from] UnknownRequirement),

    /// Destination is unreachable even ignoring accessibility
    #[error("no path from {from} to {to}")]
    NoPath { from: StopId, to: StopId },

    /// Destination is reachable, but not under the requested requirements
    #[error("no accessible path from {from} to {to} satisfying [{}]", .requirements.join(", "))]
    NoAccessiblePath {
        from: StopId,
        to: StopId,
        requirements: Vec<String>,
    },
}

/// Path search over one transit graph.
///
/// Holds only shared references, so one planner (or many) can run queries
/// from several threads while outages are being reported.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    graph: &'a TransitGraph,
    registry: &'a RequirementRegistry,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a TransitGraph, registry: &'a RequirementRegistry) -> Self {
        Self { graph, registry }
    }

    /// Find the fastest path from `source` to `destination` that satisfies
    /// every named requirement, reading live attribute state.
    ///
    /// # Errors
    ///
    /// - `SearchError::UnknownRequirement` if a name is not registered
    /// - `SearchError::UnknownStop` if either endpoint is not in the graph
    /// - `SearchError::NoAccessiblePath` if the source itself is unusable, or
    ///   every route to the destination fails some requirement
    /// - `SearchError::NoPath` if the destination cannot be reached at all
    pub fn find_path<I, S>(
        &self,
        source: &StopId,
        destination: &StopId,
        requirements: I,
    ) -> Result<Path, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requirements = self.registry.resolve(requirements)?;
        self.find_path_resolved(source, destination, &requirements)
    }

    /// Like `find_path`, for a requirement set that has already been resolved.
    pub fn find_path_resolved(
        &self,
        source: &StopId,
        destination: &StopId,
        requirements: &RequirementSet,
    ) -> Result<Path, SearchError> {
        self.search_with(self.graph, source, destination, requirements)
    }

    /// Like `find_path`, but every attribute is read from a snapshot taken
    /// when the query starts, so updates made during the search are not seen.
    pub fn find_path_isolated<I, S>(
        &self,
        source: &StopId,
        destination: &StopId,
        requirements: I,
    ) -> Result<Path, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requirements = self.registry.resolve(requirements)?;
        let snapshot = self.graph.snapshot();
        self.search_with(&snapshot, source, destination, &requirements)
    }

    /// Run a query against any attribute view of this planner's graph.
    pub(crate) fn search_with<V: AttributeView>(
        &self,
        view: &V,
        source: &StopId,
        destination: &StopId,
        requirements: &RequirementSet,
    ) -> Result<Path, SearchError> {
        let src = self.require_stop(source)?;
        let dst = self.require_stop(destination)?;

        if !stop_usable(&view.stop_attributes(src), requirements) {
            return Err(no_accessible_path(source, destination, requirements));
        }

        if src == dst {
            return Ok(Path::single(source.clone()));
        }

        match self.dijkstra(view, src, dst, requirements) {
            Some(path) => Ok(path),
            None if requirements.is_empty() || !self.reachable(src, dst) => {
                Err(SearchError::NoPath {
                    from: source.clone(),
                    to: destination.clone(),
                })
            }
            None => Err(no_accessible_path(source, destination, requirements)),
        }
    }

    fn require_stop(&self, id: &StopId) -> Result<StopIndex, SearchError> {
        self.graph
            .stop_index(id)
            .ok_or_else(|| SearchError::UnknownStop(id.clone()))
    }

    /// Constrained Dijkstra from `source` to `destination`.
    ///
    /// Equal-time candidates never replace an existing best, and the
    /// frontier pops equal times in push order, so the first-discovered
    /// route wins ties. A stop counts as discovered even if its time has
    /// overflowed to infinity.
    fn dijkstra<V: AttributeView>(
        &self,
        view: &V,
        source: StopIndex,
        destination: StopIndex,
        requirements: &RequirementSet,
    ) -> Option<Path> {
        let graph = self.graph;
        let n = graph.len();

        let mut best: Vec<Option<f64>> = vec![None; n];
        let mut predecessor: Vec<Option<SegmentIndex>> = vec![None; n];
        let mut settled = vec![false; n];
        let mut frontier = Frontier::new();

        best[source.0] = Some(0.0);
        frontier.push(source, 0.0);

        while let Some(entry) = frontier.pop() {
            let stop = entry.stop;
            if settled[stop.0] {
                continue;
            }
            settled[stop.0] = true;

            // Re-check on first visit: an outage may have landed since the
            // stop was pushed.
            if !stop_usable(&view.stop_attributes(stop), requirements) {
                continue;
            }

            if stop == destination {
                return Some(self.reconstruct(destination, entry.time, &predecessor));
            }

            for &segment_idx in graph.outgoing(stop) {
                let segment = graph.segment(segment_idx);
                let next = segment.to_index();
                if settled[next.0] {
                    continue;
                }
                if !segment_usable(&segment.attributes(), requirements) {
                    continue;
                }
                if !stop_usable(&view.stop_attributes(next), requirements) {
                    continue;
                }

                let time = entry.time + segment.travel_time();
                if best[next.0].is_none_or(|known| time < known) {
                    best[next.0] = Some(time);
                    predecessor[next.0] = Some(segment_idx);
                    frontier.push(next, time);
                }
            }
        }

        None
    }

    /// Walk predecessors back from `destination` and build the path.
    ///
    /// Each leg ends where the next one starts because it was found by
    /// stepping back from that stop.
    fn reconstruct(
        &self,
        destination: StopIndex,
        total_time: f64,
        predecessor: &[Option<SegmentIndex>],
    ) -> Path {
        let mut legs = Vec::new();
        let mut current = destination;
        while let Some(segment_idx) = predecessor[current.0] {
            let segment = self.graph.segment(segment_idx);
            legs.push(Leg::from_segment(segment));
            current = segment.from_index();
        }
        legs.reverse();
        Path::from_chain(self.graph.stop_id(current).clone(), legs, total_time)
    }

    /// Breadth-first reachability, ignoring accessibility entirely.
    fn reachable(&self, source: StopIndex, destination: StopIndex) -> bool {
        let mut visited = vec![false; self.graph.len()];
        let mut queue = VecDeque::from([source]);
        visited[source.0] = true;

        while let Some(stop) = queue.pop_front() {
            if stop == destination {
                return true;
            }
            for &segment_idx in self.graph.outgoing(stop) {
                let next = self.graph.segment(segment_idx).to_index();
                if !visited[next.0] {
                    visited[next.0] = true;
                    queue.push_back(next);
                }
            }
        }

        false
    }
}

fn no_accessible_path(
    source: &StopId,
    destination: &StopId,
    requirements: &RequirementSet,
) -> SearchError {
    SearchError::NoAccessiblePath {
        from: source.clone(),
        to: destination.clone(),
        requirements: requirements.names().map(str::to_string).collect(),
    }
}
