//! Named accessibility requirements and the registry that resolves them.

use std::collections::BTreeMap;

use crate::domain::{PlatformGap, SegmentAttributes, StopAttributes};

/// Error returned when a query names a requirement the registry does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown accessibility requirement: {name}")]
pub struct UnknownRequirement {
    pub name: String,
}

/// Predicate applied to a stop's attributes.
pub type StopPredicate = fn(&StopAttributes) -> bool;

/// Predicate applied to a segment's attributes.
pub type SegmentPredicate = fn(&SegmentAttributes) -> bool;

/// One accessibility dimension: what it demands of stops and of segments.
#[derive(Debug, Clone, Copy)]
pub struct Requirement {
    pub stop: StopPredicate,
    pub segment: SegmentPredicate,
}

impl Requirement {
    /// A requirement that only constrains stops.
    pub fn on_stops(stop: StopPredicate) -> Self {
        Self {
            stop,
            segment: |_| true,
        }
    }
}

/// Wheelchair access at both stops and on the vehicle.
fn wheelchair_accessible() -> Requirement {
    Requirement {
        stop: |s| s.wheelchair_accessible,
        segment: |s| s.wheelchair_accessible,
    }
}

/// No stairs: a broken elevator or a large platform gap both rule a stop out.
fn no_stairs() -> Requirement {
    Requirement::on_stops(|s| !s.elevator_out_of_service() && s.platform_gap != PlatformGap::Large)
}

/// An elevator that is present and currently working.
fn working_elevator() -> Requirement {
    Requirement::on_stops(|s| s.has_elevator && s.elevator_working)
}

/// Mapping from requirement name to predicates.
///
/// New accessibility dimensions are added with `register`; the search
/// algorithm never inspects names itself.
#[derive(Debug, Clone)]
pub struct RequirementRegistry {
    entries: BTreeMap<String, Requirement>,
}

impl RequirementRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The built-in requirements: `wheelchair_accessible`, `no_stairs` and
    /// `working_elevator`.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("wheelchair_accessible", wheelchair_accessible());
        registry.register("no_stairs", no_stairs());
        registry.register("working_elevator", working_elevator());
        registry
    }

    /// Register a requirement, returning the one it replaced, if any.
    pub fn register(&mut self, name: impl Into<String>, requirement: Requirement) -> Option<Requirement> {
        self.entries.insert(name.into(), requirement)
    }

    /// Look up a requirement by name.
    pub fn get(&self, name: &str) -> Option<&Requirement> {
        self.entries.get(name)
    }

    /// Names of all registered requirements, sorted.
    pub fn supported(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Resolve requirement names into a set.
    ///
    /// Duplicate names collapse. An empty input gives the empty set, which
    /// constrains nothing.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRequirement` for the first name that is not registered.
    pub fn resolve<I, S>(&self, names: I) -> Result<RequirementSet, UnknownRequirement>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut requirements = BTreeMap::new();
        for name in names {
            let name = name.as_ref();
            let requirement = self.get(name).ok_or_else(|| UnknownRequirement {
                name: name.to_string(),
            })?;
            requirements.insert(name.to_string(), *requirement);
        }
        Ok(RequirementSet { requirements })
    }

    /// Split names into those the registry knows and those it does not.
    pub fn validate<I, S>(&self, names: I) -> RequirementValidation
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut validation = RequirementValidation::default();
        for name in names {
            let name = name.as_ref().to_string();
            if self.entries.contains_key(&name) {
                validation.valid.push(name);
            } else {
                validation.invalid.push(name);
            }
        }
        validation
    }
}

impl Default for RequirementRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Result of `RequirementRegistry::validate`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementValidation {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

impl RequirementValidation {
    pub fn all_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// A resolved conjunction of requirements for one query.
#[derive(Debug, Clone, Default)]
pub struct RequirementSet {
    requirements: BTreeMap<String, Requirement>,
}

impl RequirementSet {
    /// The set that constrains nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Requirement names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.requirements.keys().map(String::as_str)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements.values()
    }
}
