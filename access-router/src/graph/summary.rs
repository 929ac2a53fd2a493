//! Aggregate statistics over a transit graph.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::PlatformGap;

use super::{AttributeView, StopIndex, TransitGraph};

/// Counts and travel-time statistics for a network, read at one moment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSummary {
    pub stops: usize,
    pub segments: usize,
    pub routes: usize,
    /// `None` when the graph has no segments.
    pub min_travel_time: Option<f64>,
    pub max_travel_time: Option<f64>,
    pub mean_travel_time: Option<f64>,
    pub wheelchair_accessible_stops: usize,
    pub wheelchair_accessible_segments: usize,
    pub stops_with_elevator: usize,
    /// Stops whose elevator is currently reported broken.
    pub elevators_out_of_service: usize,
    pub large_gap_stops: usize,
}

impl TransitGraph {
    /// Summarise the network.
    ///
    /// Elevator counts reflect live state, so two calls may differ if an
    /// outage is reported in between.
    pub fn summary(&self) -> NetworkSummary {
        let mut summary = NetworkSummary {
            stops: self.len(),
            segments: self.segment_count(),
            routes: 0,
            min_travel_time: None,
            max_travel_time: None,
            mean_travel_time: None,
            wheelchair_accessible_stops: 0,
            wheelchair_accessible_segments: 0,
            stops_with_elevator: 0,
            elevators_out_of_service: 0,
            large_gap_stops: 0,
        };

        for index in (0..self.len()).map(StopIndex) {
            let attrs = self.stop_attributes(index);
            if attrs.wheelchair_accessible {
                summary.wheelchair_accessible_stops += 1;
            }
            if attrs.has_elevator {
                summary.stops_with_elevator += 1;
            }
            if attrs.elevator_out_of_service() {
                summary.elevators_out_of_service += 1;
            }
            if attrs.platform_gap == PlatformGap::Large {
                summary.large_gap_stops += 1;
            }
        }

        let mut routes = HashSet::new();
        let mut total = 0.0;
        for segment in self.segments() {
            routes.insert(segment.route_id());
            total += segment.travel_time();

            let t = segment.travel_time();
            summary.min_travel_time = Some(summary.min_travel_time.map_or(t, |m| m.min(t)));
            summary.max_travel_time = Some(summary.max_travel_time.map_or(t, |m| m.max(t)));

            if segment.attributes().wheelchair_accessible {
                summary.wheelchair_accessible_segments += 1;
            }
        }
        summary.routes = routes.len();
        if summary.segments > 0 {
            summary.mean_travel_time = Some(total / summary.segments as f64);
        }

        summary
    }
}
