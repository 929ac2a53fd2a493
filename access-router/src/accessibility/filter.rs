//! Usability checks for stops and segments.
//!
//! These are pure functions of the attribute values passed in. The caller
//! decides whether those values come from live state or a snapshot.

use crate::domain::{SegmentAttributes, StopAttributes};

use super::RequirementSet;

/// An element of the network that can be checked for usability.
#[derive(Debug, Clone, Copy)]
pub enum Element<'a> {
    Stop(&'a StopAttributes),
    Segment(&'a SegmentAttributes),
}

/// Returns true if `element` satisfies every requirement in the set.
///
/// The empty set accepts everything.
pub fn is_usable(element: Element<'_>, requirements: &RequirementSet) -> bool {
    match element {
        Element::Stop(attrs) => requirements.iter().all(|r| (r.stop)(attrs)),
        Element::Segment(attrs) => requirements.iter().all(|r| (r.segment)(attrs)),
    }
}

/// Shorthand for `is_usable(Element::Stop(attrs), requirements)`.
pub fn stop_usable(attrs: &StopAttributes, requirements: &RequirementSet) -> bool {
    is_usable(Element::Stop(attrs), requirements)
}

/// Shorthand for `is_usable(Element::Segment(attrs), requirements)`.
pub fn segment_usable(attrs: &SegmentAttributes, requirements: &RequirementSet) -> bool {
    is_usable(Element::Segment(attrs), requirements)
}
