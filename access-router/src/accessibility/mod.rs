//! Accessibility filter.
//!
//! Requirements are looked up by name in a `RequirementRegistry` and
//! resolved into a `RequirementSet` once per query. Usability of a stop or
//! segment is then a pure function of its attributes and that set.
//! Stops can also be rated on their own, independent of any query.

mod filter;
mod requirement;
mod score;

pub use filter::{Element, is_usable, segment_usable, stop_usable};
pub use requirement::{
    Requirement, RequirementRegistry, RequirementSet, RequirementValidation, SegmentPredicate,
    StopPredicate, UnknownRequirement,
};
pub use score::{AccessibilityLevel, AccessibilitySummary, accessibility_score};
