//! Accessibility rating of a single stop.
//!
//! A stop earns points for each feature it has, out of a possible 100. The
//! rating is informational: it never affects which stops a search may use.

use std::fmt;

use serde::Serialize;

use crate::domain::{PlatformGap, StopAttributes};

const WHEELCHAIR_POINTS: u32 = 35;
const ELEVATOR_POINTS: u32 = 20;
const WORKING_ELEVATOR_POINTS: u32 = 25;
const LEVEL_BOARDING_POINTS: u32 = 20;
const SMALL_GAP_POINTS: u32 = 10;
const MAX_POINTS: u32 =
    WHEELCHAIR_POINTS + ELEVATOR_POINTS + WORKING_ELEVATOR_POINTS + LEVEL_BOARDING_POINTS;

/// Coarse grade derived from a stop's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessibilityLevel {
    Poor,
    Limited,
    Fair,
    Good,
    Excellent,
}

impl AccessibilityLevel {
    fn from_points(points: u32) -> Self {
        match points {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            20..=39 => Self::Limited,
            _ => Self::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Poor => "poor",
            Self::Limited => "limited",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

impl fmt::Display for AccessibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score, level and suggested improvements for one stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessibilitySummary {
    /// Between 0.0 and 1.0 inclusive.
    pub score: f64,
    pub level: AccessibilityLevel,
    pub recommendations: Vec<&'static str>,
}

impl AccessibilitySummary {
    pub fn of(attrs: &StopAttributes) -> Self {
        Self {
            score: accessibility_score(attrs),
            level: AccessibilityLevel::from_points(points(attrs)),
            recommendations: recommendations(attrs),
        }
    }
}

/// Accessibility score of a stop, from 0.0 (no features) to 1.0.
pub fn accessibility_score(attrs: &StopAttributes) -> f64 {
    f64::from(points(attrs)) / f64::from(MAX_POINTS)
}

fn points(attrs: &StopAttributes) -> u32 {
    let mut points = 0;
    if attrs.wheelchair_accessible {
        points += WHEELCHAIR_POINTS;
    }
    if attrs.has_elevator {
        points += ELEVATOR_POINTS;
        if attrs.elevator_working {
            points += WORKING_ELEVATOR_POINTS;
        }
    }
    points += match attrs.platform_gap {
        PlatformGap::None => LEVEL_BOARDING_POINTS,
        PlatformGap::Small => SMALL_GAP_POINTS,
        PlatformGap::Large => 0,
    };
    points
}

fn recommendations(attrs: &StopAttributes) -> Vec<&'static str> {
    let mut out = Vec::new();
    if !attrs.wheelchair_accessible {
        out.push("Add wheelchair accessibility");
    }
    if !attrs.has_elevator {
        out.push("Install elevator or ramp");
    } else if !attrs.elevator_working {
        out.push("Repair elevator");
    }
    if attrs.platform_gap == PlatformGap::Large {
        out.push("Add boarding ramp or raise platform");
    }
    out
}
