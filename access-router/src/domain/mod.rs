//! Domain types for the accessible route planner.
//!
//! Identifiers are validated at construction time, so code that receives a
//! `StopId` or `RouteId` can trust it is well-formed.

mod segment;
mod stop;

pub use segment::{InvalidRouteId, RouteId, SegmentAttributes, SegmentKey};
pub use stop::{InvalidStopId, PlatformGap, StopAttributes, StopId};
