//! Stop identifiers and accessibility attributes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id {value:?}: {reason}")]
pub struct InvalidStopId {
    value: String,
    reason: &'static str,
}

/// Identifier of a stop in the transit network.
///
/// Any non-empty string without surrounding whitespace is accepted. The
/// value is opaque: `"Union Station"` and `"union station"` are different
/// stops.
///
/// # Examples
///
/// ```
/// use access_router::domain::StopId;
///
/// let union = StopId::parse("Union Station").unwrap();
/// assert_eq!(union.as_str(), "Union Station");
///
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse(" King").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopId(String);

impl StopId {
    /// Parse a stop identifier.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        check_identifier(s).map_err(|reason| InvalidStopId {
            value: s.to_string(),
            reason,
        })?;
        Ok(StopId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopId {
    type Error = InvalidStopId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match check_identifier(&value) {
            Ok(()) => Ok(StopId(value)),
            Err(reason) => Err(InvalidStopId { value, reason }),
        }
    }
}

impl From<StopId> for String {
    fn from(id: StopId) -> Self {
        id.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared validation for stop and route identifiers.
pub(super) fn check_identifier(s: &str) -> Result<(), &'static str> {
    if s.is_empty() {
        return Err("must not be empty");
    }
    if s.trim() != s {
        return Err("must not have leading or trailing whitespace");
    }
    Ok(())
}

/// Size of the gap between platform edge and vehicle floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformGap {
    /// Level boarding.
    #[default]
    None,
    /// Passable with a small step.
    Small,
    /// Needs a ramp or assistance.
    Large,
}

/// Accessibility attributes of a stop as supplied at ingestion.
///
/// Only `elevator_working` changes after the stop is added to a graph; the
/// others are fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopAttributes {
    pub wheelchair_accessible: bool,
    pub has_elevator: bool,
    pub elevator_working: bool,
    pub platform_gap: PlatformGap,
}

impl StopAttributes {
    /// Attributes of a stop with no accessibility features.
    pub fn inaccessible() -> Self {
        Self {
            wheelchair_accessible: false,
            has_elevator: false,
            elevator_working: false,
            platform_gap: PlatformGap::None,
        }
    }

    /// Attributes of a step-free, wheelchair-accessible stop without an elevator.
    pub fn step_free() -> Self {
        Self {
            wheelchair_accessible: true,
            has_elevator: false,
            elevator_working: false,
            platform_gap: PlatformGap::None,
        }
    }

    /// Attributes of a wheelchair-accessible stop served by a working elevator.
    pub fn with_elevator() -> Self {
        Self {
            wheelchair_accessible: true,
            has_elevator: true,
            elevator_working: true,
            platform_gap: PlatformGap::None,
        }
    }

    /// Returns these attributes with a different platform gap.
    pub fn with_gap(mut self, gap: PlatformGap) -> Self {
        self.platform_gap = gap;
        self
    }

    /// Returns true if the stop has an elevator that is currently broken.
    pub fn elevator_out_of_service(&self) -> bool {
        self.has_elevator && !self.elevator_working
    }
}
