//! The transit graph: stops, route segments and their attributes.

use std::collections::HashMap;

use crate::accessibility::{RequirementSet, stop_usable};
use crate::domain::{PlatformGap, RouteId, SegmentAttributes, SegmentKey, StopAttributes, StopId};

use super::attributes::{AttributeSnapshot, AttributeView, LiveAttributes};
use super::error::GraphError;

/// Dense index of a stop within one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopIndex(pub(crate) usize);

/// Dense index of a segment within one graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentIndex(pub(crate) usize);

/// Static part of a stop, fixed at ingestion.
#[derive(Debug)]
struct StopRecord {
    id: StopId,
    name: Option<String>,
    wheelchair_accessible: bool,
    has_elevator: bool,
    platform_gap: PlatformGap,
}

/// A stop and its attributes as of the moment it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub id: StopId,
    pub name: Option<String>,
    pub attributes: StopAttributes,
}

/// A directed route segment between two stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    key: SegmentKey,
    from: StopIndex,
    to: StopIndex,
    travel_time: f64,
    attributes: SegmentAttributes,
}

impl Segment {
    pub fn key(&self) -> &SegmentKey {
        &self.key
    }

    pub fn from_stop(&self) -> &StopId {
        &self.key.from
    }

    pub fn to_stop(&self) -> &StopId {
        &self.key.to
    }

    pub fn route_id(&self) -> &RouteId {
        &self.key.route_id
    }

    /// Travel time in minutes. Always positive and finite.
    pub fn travel_time(&self) -> f64 {
        self.travel_time
    }

    pub fn attributes(&self) -> SegmentAttributes {
        self.attributes
    }

    pub(crate) fn from_index(&self) -> StopIndex {
        self.from
    }

    pub(crate) fn to_index(&self) -> StopIndex {
        self.to
    }
}

/// Directed weighted graph of stops and route segments.
///
/// Topology (stops, segments, static attributes) is only modified through
/// `&mut self` during ingestion. Elevator status is held separately and can
/// be changed through a shared reference, which is what lets one graph be
/// queried and updated concurrently behind an `Arc`. Nothing is ever removed.
#[derive(Debug, Default)]
pub struct TransitGraph {
    stops: Vec<StopRecord>,
    stop_index: HashMap<StopId, StopIndex>,
    segments: Vec<Segment>,
    segment_index: HashMap<SegmentKey, SegmentIndex>,
    /// Outgoing segments per stop, in insertion order.
    outgoing: Vec<Vec<SegmentIndex>>,
    live: LiveAttributes,
}

impl TransitGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop.
    ///
    /// # Errors
    ///
    /// Returns `GraphError::DuplicateStop` if a stop with this id exists.
    pub fn add_stop(
        &mut self,
        id: StopId,
        attributes: StopAttributes,
    ) -> Result<StopIndex, GraphError> {
        self.add_stop_with_name(id, None, attributes)
    }

    /// Add a stop with a display name.
    pub fn add_stop_with_name(
        &mut self,
        id: StopId,
        name: Option<String>,
        attributes: StopAttributes,
    ) -> Result<StopIndex, GraphError> {
        if self.stop_index.contains_key(&id) {
            return Err(GraphError::DuplicateStop(id));
        }

        let index = StopIndex(self.stops.len());
        self.stops.push(StopRecord {
            id: id.clone(),
            name,
            wheelchair_accessible: attributes.wheelchair_accessible,
            has_elevator: attributes.has_elevator,
            platform_gap: attributes.platform_gap,
        });
        self.stop_index.insert(id, index);
        self.outgoing.push(Vec::new());
        self.live.push(attributes.elevator_working);

        Ok(index)
    }

    /// Add a directed segment from `from` to `to` on `route_id`.
    ///
    /// # Errors
    ///
    /// - `GraphError::UnknownStop` if either endpoint has not been added
    /// - `GraphError::InvalidWeight` if `travel_time` is not a positive finite number
    /// - `GraphError::DuplicateSegment` if `(from, to, route_id)` already exists
    pub fn add_segment(
        &mut self,
        from: &StopId,
        to: &StopId,
        route_id: RouteId,
        travel_time: f64,
        wheelchair_accessible: bool,
    ) -> Result<SegmentIndex, GraphError> {
        let from_idx = self.require_stop(from)?;
        let to_idx = self.require_stop(to)?;

        let key = SegmentKey::new(from.clone(), to.clone(), route_id);

        // NaN fails the comparison too.
        if !(travel_time > 0.0 && travel_time.is_finite()) {
            return Err(GraphError::InvalidWeight { key, travel_time });
        }

        if self.segment_index.contains_key(&key) {
            return Err(GraphError::DuplicateSegment(key));
        }

        let index = SegmentIndex(self.segments.len());
        self.segments.push(Segment {
            key: key.clone(),
            from: from_idx,
            to: to_idx,
            travel_time,
            attributes: SegmentAttributes {
                wheelchair_accessible,
            },
        });
        self.segment_index.insert(key, index);
        self.outgoing[from_idx.0].push(index);

        Ok(index)
    }

    /// Returns the outgoing segments of a stop, in insertion order.
    ///
    /// A stop without outgoing routes yields an empty iterator.
    pub fn neighbors<'g>(
        &'g self,
        stop: &StopId,
    ) -> Result<impl Iterator<Item = &'g Segment> + use<'g>, GraphError> {
        let index = self.require_stop(stop)?;
        Ok(self.outgoing_segments(index))
    }

    /// Returns a stop with its current attributes.
    pub fn get_stop(&self, id: &StopId) -> Result<Stop, GraphError> {
        let index = self.require_stop(id)?;
        let record = &self.stops[index.0];
        Ok(Stop {
            id: record.id.clone(),
            name: record.name.clone(),
            attributes: self.stop_attributes(index),
        })
    }

    /// Returns the segment identified by `(from, to, route_id)`.
    pub fn get_segment(
        &self,
        from: &StopId,
        to: &StopId,
        route_id: &RouteId,
    ) -> Result<&Segment, GraphError> {
        let key = SegmentKey::new(from.clone(), to.clone(), route_id.clone());
        match self.segment_index.get(&key) {
            Some(index) => Ok(&self.segments[index.0]),
            None => Err(GraphError::UnknownSegment(key)),
        }
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns true if the graph has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Stop ids in insertion order.
    pub fn stop_ids(&self) -> impl Iterator<Item = &StopId> {
        self.stops.iter().map(|record| &record.id)
    }

    /// All segments in insertion order.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Ids of the stops usable under `requirements`, in insertion order.
    pub fn accessible_stops(&self, requirements: &RequirementSet) -> Vec<&StopId> {
        (0..self.stops.len())
            .map(StopIndex)
            .filter(|&index| stop_usable(&self.stop_attributes(index), requirements))
            .map(|index| &self.stops[index.0].id)
            .collect()
    }

    /// Copy the current elevator state of every stop.
    pub fn snapshot(&self) -> AttributeSnapshot<'_> {
        AttributeSnapshot::new(self)
    }

    /// Set a stop's elevator status, returning the previous value.
    ///
    /// Callers outside the crate go through `UpdateChannel`.
    pub(crate) fn set_elevator_status(
        &self,
        stop: &StopId,
        working: bool,
    ) -> Result<bool, GraphError> {
        let index = self.require_stop(stop)?;
        Ok(self.live.set_elevator_working(index, working))
    }

    pub(crate) fn stop_index(&self, id: &StopId) -> Option<StopIndex> {
        self.stop_index.get(id).copied()
    }

    pub(crate) fn stop_id(&self, index: StopIndex) -> &StopId {
        &self.stops[index.0].id
    }

    pub(crate) fn segment(&self, index: SegmentIndex) -> &Segment {
        &self.segments[index.0]
    }

    pub(crate) fn outgoing(&self, stop: StopIndex) -> &[SegmentIndex] {
        &self.outgoing[stop.0]
    }

    pub(crate) fn live(&self) -> &LiveAttributes {
        &self.live
    }

    /// Combine a stop's static attributes with an elevator status read elsewhere.
    pub(crate) fn static_attributes(&self, stop: StopIndex, elevator_working: bool) -> StopAttributes {
        let record = &self.stops[stop.0];
        StopAttributes {
            wheelchair_accessible: record.wheelchair_accessible,
            has_elevator: record.has_elevator,
            elevator_working,
            platform_gap: record.platform_gap,
        }
    }

    fn outgoing_segments(&self, stop: StopIndex) -> impl Iterator<Item = &Segment> {
        self.outgoing[stop.0]
            .iter()
            .map(move |index| &self.segments[index.0])
    }

    fn require_stop(&self, id: &StopId) -> Result<StopIndex, GraphError> {
        self.stop_index(id)
            .ok_or_else(|| GraphError::UnknownStop(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessibility::RequirementRegistry;

    fn id(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn route(s: &str) -> RouteId {
        RouteId::parse(s).unwrap()
    }

    fn two_stop_graph() -> TransitGraph {
        let mut graph = TransitGraph::new();
        graph.add_stop(id("A"), StopAttributes::step_free()).unwrap();
        graph.add_stop(id("B"), StopAttributes::inaccessible()).unwrap();
        graph
    }

    #[test]
    fn empty_graph() {
        let graph = TransitGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        assert_eq!(graph.segment_count(), 0);
    }

    #[test]
    fn add_and_get_stop() {
        let mut graph = TransitGraph::new();
        graph
            .add_stop_with_name(
                id("UNI"),
                Some("Union Station".into()),
                StopAttributes::with_elevator(),
            )
            .unwrap();

        let stop = graph.get_stop(&id("UNI")).unwrap();
        assert_eq!(stop.id, id("UNI"));
        assert_eq!(stop.name.as_deref(), Some("Union Station"));
        assert_eq!(stop.attributes, StopAttributes::with_elevator());
    }

    #[test]
    fn duplicate_stop_rejected() {
        let mut graph = two_stop_graph();
        let err = graph
            .add_stop(id("A"), StopAttributes::inaccessible())
            .unwrap_err();
        assert_eq!(err, GraphError::DuplicateStop(id("A")));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn get_unknown_stop() {
        let graph = two_stop_graph();
        assert_eq!(
            graph.get_stop(&id("Z")).unwrap_err(),
            GraphError::UnknownStop(id("Z"))
        );
    }

    #[test]
    fn add_segment_requires_both_endpoints() {
        let mut graph = two_stop_graph();

        let err = graph
            .add_segment(&id("A"), &id("Z"), route("1"), 3.0, true)
            .unwrap_err();
        assert_eq!(err, GraphError::UnknownStop(id("Z")));

        let err = graph
            .add_segment(&id("Z"), &id("A"), route("1"), 3.0, true)
            .unwrap_err();
        assert_eq!(err, GraphError::UnknownStop(id("Z")));

        assert_eq!(graph.segment_count(), 0);
    }

    #[test]
    fn add_segment_rejects_bad_weights() {
        let mut graph = two_stop_graph();

        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = graph
                .add_segment(&id("A"), &id("B"), route("1"), bad, true)
                .unwrap_err();
            assert!(
                matches!(err, GraphError::InvalidWeight { .. }),
                "{bad} should be rejected"
            );
        }
        assert_eq!(graph.segment_count(), 0);
    }

    #[test]
    fn duplicate_segment_rejected_but_parallel_routes_allowed() {
        let mut graph = two_stop_graph();
        graph
            .add_segment(&id("A"), &id("B"), route("1"), 3.0, true)
            .unwrap();
        graph
            .add_segment(&id("A"), &id("B"), route("2"), 4.0, false)
            .unwrap();

        let err = graph
            .add_segment(&id("A"), &id("B"), route("1"), 5.0, true)
            .unwrap_err();
        assert!(matches!(err, GraphError::DuplicateSegment(_)));
        assert_eq!(graph.segment_count(), 2);
    }

    #[test]
    fn get_segment() {
        let mut graph = two_stop_graph();
        graph
            .add_segment(&id("A"), &id("B"), route("1"), 3.0, true)
            .unwrap();

        let segment = graph.get_segment(&id("A"), &id("B"), &route("1")).unwrap();
        assert_eq!(segment.travel_time(), 3.0);
        assert!(segment.attributes().wheelchair_accessible);
        assert_eq!(segment.from_stop(), &id("A"));
        assert_eq!(segment.to_stop(), &id("B"));

        let err = graph
            .get_segment(&id("B"), &id("A"), &route("1"))
            .unwrap_err();
        assert!(matches!(err, GraphError::UnknownSegment(_)));
    }

    #[test]
    fn neighbors_in_insertion_order() {
        let mut graph = two_stop_graph();
        graph.add_stop(id("C"), StopAttributes::step_free()).unwrap();
        graph
            .add_segment(&id("A"), &id("C"), route("2"), 7.0, true)
            .unwrap();
        graph
            .add_segment(&id("A"), &id("B"), route("1"), 3.0, true)
            .unwrap();

        let targets: Vec<_> = graph
            .neighbors(&id("A"))
            .unwrap()
            .map(|s| s.to_stop().as_str())
            .collect();
        assert_eq!(targets, vec!["C", "B"]);
    }

    #[test]
    fn neighbors_of_sink_is_empty() {
        let mut graph = two_stop_graph();
        graph
            .add_segment(&id("A"), &id("B"), route("1"), 3.0, true)
            .unwrap();

        assert_eq!(graph.neighbors(&id("B")).unwrap().count(), 0);
        assert!(graph.neighbors(&id("Z")).is_err());
    }

    #[test]
    fn get_stop_reflects_elevator_updates() {
        let mut graph = TransitGraph::new();
        graph.add_stop(id("X"), StopAttributes::with_elevator()).unwrap();

        graph.set_elevator_status(&id("X"), false).unwrap();
        let stop = graph.get_stop(&id("X")).unwrap();
        assert!(stop.attributes.has_elevator);
        assert!(!stop.attributes.elevator_working);
    }

    #[test]
    fn set_elevator_status_unknown_stop() {
        let graph = two_stop_graph();
        assert_eq!(
            graph.set_elevator_status(&id("Z"), false).unwrap_err(),
            GraphError::UnknownStop(id("Z"))
        );
    }

    #[test]
    fn accessible_stops_filters_by_requirements() {
        let registry = RequirementRegistry::standard();
        let mut graph = TransitGraph::new();
        graph.add_stop(id("A"), StopAttributes::step_free()).unwrap();
        graph.add_stop(id("B"), StopAttributes::inaccessible()).unwrap();
        graph.add_stop(id("C"), StopAttributes::with_elevator()).unwrap();

        let none = RequirementSet::empty();
        assert_eq!(graph.accessible_stops(&none).len(), 3);

        let wheelchair = registry.resolve(["wheelchair_accessible"]).unwrap();
        let ids: Vec<_> = graph
            .accessible_stops(&wheelchair)
            .into_iter()
            .map(|s| s.as_str())
            .collect();
        assert_eq!(ids, vec!["A", "C"]);

        graph.set_elevator_status(&id("C"), false).unwrap();
        let no_stairs = registry.resolve(["no_stairs"]).unwrap();
        let ids: Vec<_> = graph
            .accessible_stops(&no_stairs)
            .into_iter()
            .map(|s| s.as_str())
            .collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn graph_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransitGraph>();
    }
}
