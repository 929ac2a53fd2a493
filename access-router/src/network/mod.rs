//! Network ingestion.
//!
//! Reads a JSON description of stops and segments and builds a
//! `TransitGraph` from it, once, before any query runs.

mod error;
mod loader;

pub use error::{NetworkError, Record};
pub use loader::{NetworkFile, SegmentRecord, StopRecord, load_network, parse_network};
