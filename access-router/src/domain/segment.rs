//! Route identifiers and segment keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::StopId;
use super::stop::check_identifier;

/// Error returned when parsing an invalid route identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route id {value:?}: {reason}")]
pub struct InvalidRouteId {
    value: String,
    reason: &'static str,
}

/// Identifier of a transit route (a line such as `"Line 1"` or `"504"`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteId(String);

impl RouteId {
    /// Parse a route identifier.
    pub fn parse(s: &str) -> Result<Self, InvalidRouteId> {
        check_identifier(s).map_err(|reason| InvalidRouteId {
            value: s.to_string(),
            reason,
        })?;
        Ok(RouteId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RouteId {
    type Error = InvalidRouteId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match check_identifier(&value) {
            Ok(()) => Ok(RouteId(value)),
            Err(reason) => Err(InvalidRouteId { value, reason }),
        }
    }
}

impl From<RouteId> for String {
    fn from(id: RouteId) -> Self {
        id.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a route segment.
///
/// Several segments may join the same ordered pair of stops as long as they
/// belong to different routes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentKey {
    pub from: StopId,
    pub to: StopId,
    pub route_id: RouteId,
}

impl SegmentKey {
    pub fn new(from: StopId, to: StopId, route_id: RouteId) -> Self {
        Self { from, to, route_id }
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} via {}", self.from, self.to, self.route_id)
    }
}

/// Accessibility attributes of a route segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentAttributes {
    pub wheelchair_accessible: bool,
}
