//! Network loading errors.

use std::fmt;
use std::path::PathBuf;

use crate::domain::{InvalidRouteId, InvalidStopId};
use crate::graph::GraphError;

/// Position of a record in the network document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    /// Index into `stops`
    Stop(usize),
    /// Index into `segments`
    Segment(usize),
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Stop(index) => write!(f, "stop #{index}"),
            Record::Segment(index) => write!(f, "segment #{index}"),
        }
    }
}

/// Errors that can occur while loading a network.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// Network file could not be read
    #[error("failed to read network file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Document is not valid network JSON
    #[error("invalid network JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A stop id in a record failed validation
    #[error("{record}: {source}")]
    InvalidStopId {
        record: Record,
        source: InvalidStopId,
    },

    /// A route id in a segment record failed validation
    #[error("{record}: {source}")]
    InvalidRouteId {
        record: Record,
        source: InvalidRouteId,
    },

    /// The graph rejected a record
    #[error("{record}: {source}")]
    Graph { record: Record, source: GraphError },
}

impl NetworkError {
    /// The record that caused the failure, if loading got that far.
    pub fn record(&self) -> Option<Record> {
        match self {
            NetworkError::Io { .. } | NetworkError::Json(_) => None,
            NetworkError::InvalidStopId { record, .. }
            | NetworkError::InvalidRouteId { record, .. }
            | NetworkError::Graph { record, .. } => Some(*record),
        }
    }
}
