//! Transit graph: the structural network plus live accessibility state.
//!
//! Stops and segments are added once during ingestion. After that the only
//! thing that changes is each stop's elevator status, which is stored
//! outside the topology so queries can read it without locking.

mod attributes;
mod error;
mod summary;
mod transit_graph;

pub use attributes::{AttributeSnapshot, AttributeView};
pub use error::GraphError;
pub use summary::NetworkSummary;
pub use transit_graph::{Segment, SegmentIndex, Stop, StopIndex, TransitGraph};
