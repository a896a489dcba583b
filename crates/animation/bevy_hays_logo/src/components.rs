use bevy::prelude::*;

/// Marker component designating the root of a subtree to bind sequence targets under.
/// The binding system walks descendants of every entity with this marker.
#[derive(Component, Debug, Default)]
pub struct SequenceRoot;

/// Optional per-entity override for the target name.
/// When present, this name is used instead of the entity's `Name`.
#[derive(Component, Debug, Clone)]
pub struct SequenceTarget {
    pub name: String,
}

impl SequenceTarget {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Set on mesh entities once their material has been replaced from the plan.
#[derive(Component, Debug)]
pub struct PlannedMaterial;
