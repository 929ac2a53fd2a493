//! Path search engine.
//!
//! Answers "what is the fastest way from this stop to that one, using only
//! stops and segments that meet these accessibility requirements?"
//!
//! The search is Dijkstra's algorithm with a usability check on every
//! candidate stop and segment. There is no precomputation: accessibility
//! state can change between queries, so every query starts from scratch.

mod frontier;
mod path;
mod search;


pub use path::{Leg, Path};
pub use search::{Planner, SearchError};
