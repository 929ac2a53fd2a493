//! Transit graph error types.

use crate::domain::{SegmentKey, StopId};

/// Errors from building or querying the transit graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// No stop with this id exists
    #[error("unknown stop: {0}")]
    UnknownStop(StopId),

    /// No segment with this key exists
    #[error("unknown segment: {0}")]
    UnknownSegment(SegmentKey),

    /// A stop with this id was already added
    #[error("duplicate stop: {0}")]
    DuplicateStop(StopId),

    /// A segment with this key was already added
    #[error("duplicate segment: {0}")]
    DuplicateSegment(SegmentKey),

    /// Travel time is zero, negative or not finite
    #[error("invalid travel time {travel_time} for segment {key}: must be positive and finite")]
    InvalidWeight { key: SegmentKey, travel_time: f64 },
}
