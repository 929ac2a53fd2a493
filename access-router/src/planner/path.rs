//! Search results.
//!
//! A `Path` is the answer to a query: the stops visited, the segment taken
//! between each consecutive pair, and the total travel time.

use crate::domain::{RouteId, StopId};
use crate::graph::Segment;

/// One hop of a path along a single route segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub from: StopId,
    pub to: StopId,
    pub route_id: RouteId,
    /// Minutes.
    pub travel_time: f64,
}

impl Leg {
    pub(crate) fn from_segment(segment: &Segment) -> Self {
        Self {
            from: segment.from_stop().clone(),
            to: segment.to_stop().clone(),
            route_id: segment.route_id().clone(),
            travel_time: segment.travel_time(),
        }
    }
}

/// An ordered sequence of stops with the legs joining them.
///
/// # Invariants
///
/// - At least one stop
/// - `legs.len() == stops.len() - 1`
/// - Leg `i` runs from `stops[i]` to `stops[i + 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    stops: Vec<StopId>,
    legs: Vec<Leg>,
    total_time: f64,
}

impl Path {
    /// A path that starts and ends at the same stop.
    pub(crate) fn single(stop: StopId) -> Self {
        Self {
            stops: vec![stop],
            legs: Vec::new(),
            total_time: 0.0,
        }
    }

    /// Build a path that starts at `origin` and follows `legs` in order.
    ///
    /// The caller guarantees that each leg starts where the previous one
    /// ended, the first one at `origin`.
    pub(crate) fn from_chain(origin: StopId, legs: Vec<Leg>, total_time: f64) -> Self {
        debug_assert!(
            legs.first().is_none_or(|leg| leg.from == origin)
                && legs.windows(2).all(|pair| pair[0].to == pair[1].from),
            "legs must form a chain from the origin"
        );
        let stops = std::iter::once(origin)
            .chain(legs.iter().map(|leg| leg.to.clone()))
            .collect();
        Self {
            stops,
            legs,
            total_time,
        }
    }

    /// Stops in travel order, origin first.
    pub fn stops(&self) -> &[StopId] {
        &self.stops
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Total travel time in minutes.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn origin(&self) -> &StopId {
        &self.stops[0]
    }

    pub fn destination(&self) -> &StopId {
        &self.stops[self.stops.len() - 1]
    }

    /// Number of route changes along the path.
    pub fn transfers(&self) -> usize {
        self.legs
            .windows(2)
            .filter(|pair| pair[0].route_id != pair[1].route_id)
            .count()
    }

    /// Routes in riding order, with consecutive repeats collapsed.
    pub fn routes(&self) -> Vec<&RouteId> {
        let mut routes: Vec<&RouteId> = Vec::new();
        for leg in &self.legs {
            if routes.last() != Some(&&leg.route_id) {
                routes.push(&leg.route_id);
            }
        }
        routes
    }
}
