//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::accessibility::AccessibilitySummary;
use crate::domain::PlatformGap;
use crate::graph::Stop;
use crate::planner::{Leg, Path};

/// Request to find a route between two stops.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Origin stop id
    pub from: String,

    /// Destination stop id
    pub to: String,

    /// Accessibility requirement names (all must hold)
    #[serde(default)]
    pub requirements: Vec<String>,
}

/// A route found by the planner.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Stops in travel order, origin first
    pub stops: Vec<String>,

    pub legs: Vec<LegResult>,

    /// Total travel time in minutes
    pub total_time: f64,

    /// Number of route changes
    pub transfers: usize,
}

/// One segment ridden on a route.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub from: String,
    pub to: String,
    pub route_id: String,
    pub travel_time: f64,
}

/// Query for listing stops.
#[derive(Debug, Deserialize)]
pub struct StopsQuery {
    /// Comma-separated requirement names
    pub requirements: Option<String>,
}

impl StopsQuery {
    /// Requirement names, with blanks dropped.
    pub fn requirement_names(&self) -> Vec<&str> {
        self.requirements
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Stops usable under a requirement set.
#[derive(Debug, Serialize)]
pub struct StopsResponse {
    pub requirements: Vec<String>,
    pub stops: Vec<String>,
}

/// Current state of one stop.
#[derive(Debug, Serialize)]
pub struct StopResponse {
    pub id: String,
    pub name: Option<String>,
    pub wheelchair_accessible: bool,
    pub has_elevator: bool,
    pub elevator_working: bool,
    pub platform_gap: PlatformGap,

    /// Rating from current attributes, including elevator status
    pub accessibility: AccessibilitySummary,
}

/// Requirement names the server understands.
#[derive(Debug, Serialize)]
pub struct RequirementsResponse {
    pub requirements: Vec<String>,
}

/// Report of an elevator outage or repair.
#[derive(Debug, Deserialize)]
pub struct OutageRequest {
    /// Stop id
    pub stop: String,

    /// Whether the elevator now works
    pub working: bool,
}

/// Result of an outage report.
#[derive(Debug, Serialize)]
pub struct OutageResponse {
    pub stop: String,
    pub working: bool,

    /// Status before this report
    pub previous: bool,

    /// False if the report repeated the current status
    pub changed: bool,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Machine-readable error kind
    pub kind: &'static str,
}

// Conversion implementations

impl RouteResponse {
    /// Create from a planner path.
    pub fn from_path(path: &Path) -> Self {
        Self {
            stops: path.stops().iter().map(|s| s.to_string()).collect(),
            legs: path.legs().iter().map(LegResult::from_leg).collect(),
            total_time: path.total_time(),
            transfers: path.transfers(),
        }
    }
}

impl LegResult {
    /// Create from a planner leg.
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            from: leg.from.to_string(),
            to: leg.to.to_string(),
            route_id: leg.route_id.to_string(),
            travel_time: leg.travel_time,
        }
    }
}

impl StopResponse {
    /// Create from a stop view.
    pub fn from_stop(stop: &Stop) -> Self {
        let attributes = stop.attributes;
        Self {
            id: stop.id.to_string(),
            name: stop.name.clone(),
            wheelchair_accessible: attributes.wheelchair_accessible,
            has_elevator: attributes.has_elevator,
            elevator_working: attributes.elevator_working,
            platform_gap: attributes.platform_gap,
            accessibility: AccessibilitySummary::of(&attributes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(requirements: Option<&str>) -> StopsQuery {
        StopsQuery {
            requirements: requirements.map(str::to_string),
        }
    }

    #[test]
    fn requirement_names_split_and_trim() {
        assert!(query(None).requirement_names().is_empty());
        assert!(query(Some("")).requirement_names().is_empty());
        assert_eq!(
            query(Some("wheelchair_accessible, no_stairs,")).requirement_names(),
            vec!["wheelchair_accessible", "no_stairs"]
        );
    }

    #[test]
    fn route_request_defaults_requirements() {
        let req: RouteRequest = serde_json::from_str(r#"{"from": "A", "to": "B"}"#).unwrap();
        assert_eq!(req.from, "A");
        assert!(req.requirements.is_empty());
    }

    #[test]
    fn error_response_serializes_kind() {
        let body = ErrorResponse {
            error: "unknown stop: Z".to_string(),
            kind: "unknown_stop",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "error": "unknown stop: Z", "kind": "unknown_stop" })
        );
    }
}
