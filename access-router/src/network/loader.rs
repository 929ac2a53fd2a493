//! JSON network documents.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{PlatformGap, RouteId, StopAttributes, StopId};
use crate::graph::TransitGraph;

use super::error::{NetworkError, Record};

/// A whole network as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkFile {
    #[serde(default)]
    pub stops: Vec<StopRecord>,
    #[serde(default)]
    pub segments: Vec<SegmentRecord>,
}

/// One stop in a network document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub wheelchair_accessible: bool,
    #[serde(default)]
    pub has_elevator: bool,
    /// Absent means the elevator (if any) is working.
    #[serde(default = "working")]
    pub elevator_working: bool,
    #[serde(default)]
    pub platform_gap: PlatformGap,
}

/// One directed segment in a network document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub from: String,
    pub to: String,
    pub route_id: String,
    /// Minutes
    pub travel_time: f64,
    #[serde(default)]
    pub wheelchair_accessible: bool,
}

fn working() -> bool {
    true
}

impl StopRecord {
    fn attributes(&self) -> StopAttributes {
        StopAttributes {
            wheelchair_accessible: self.wheelchair_accessible,
            has_elevator: self.has_elevator,
            elevator_working: self.elevator_working,
            platform_gap: self.platform_gap,
        }
    }
}

impl NetworkFile {
    /// Parse a network document.
    pub fn from_json(json: &str) -> Result<Self, NetworkError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a transit graph, adding each stop and then each segment once.
    ///
    /// Stops are added before segments, so a segment may refer to a stop
    /// listed anywhere in the document. The first bad record aborts the
    /// build.
    pub fn into_graph(self) -> Result<TransitGraph, NetworkError> {
        let mut graph = TransitGraph::new();

        for (index, stop) in self.stops.into_iter().enumerate() {
            let record = Record::Stop(index);
            let attributes = stop.attributes();
            let id = StopId::parse(&stop.id)
                .map_err(|source| NetworkError::InvalidStopId { record, source })?;
            graph
                .add_stop_with_name(id, stop.name, attributes)
                .map_err(|source| NetworkError::Graph { record, source })?;
        }

        for (index, segment) in self.segments.into_iter().enumerate() {
            let record = Record::Segment(index);
            let from = StopId::parse(&segment.from)
                .map_err(|source| NetworkError::InvalidStopId { record, source })?;
            let to = StopId::parse(&segment.to)
                .map_err(|source| NetworkError::InvalidStopId { record, source })?;
            let route_id = RouteId::parse(&segment.route_id)
                .map_err(|source| NetworkError::InvalidRouteId { record, source })?;
            graph
                .add_segment(
                    &from,
                    &to,
                    route_id,
                    segment.travel_time,
                    segment.wheelchair_accessible,
                )
                .map_err(|source| NetworkError::Graph { record, source })?;
        }

        debug!(
            stops = graph.len(),
            segments = graph.segment_count(),
            "Built transit graph"
        );

        Ok(graph)
    }
}

/// Parse a network document and build its graph.
pub fn parse_network(json: &str) -> Result<TransitGraph, NetworkError> {
    NetworkFile::from_json(json)?.into_graph()
}

/// Load a network document from disk and build its graph.
pub fn load_network(path: impl AsRef<Path>) -> Result<TransitGraph, NetworkError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| NetworkError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = parse_network(&contents)?;

    info!(
        path = %path.display(),
        stops = graph.len(),
        segments = graph.segment_count(),
        "Loaded transit network"
    );

    Ok(graph)
}
