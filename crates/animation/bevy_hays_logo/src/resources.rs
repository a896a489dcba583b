use bevy::prelude::*;
use hashbrown::HashMap;
use hays_logo_core::{Change, HandleTable, MaterialPlan, RestPose, Sequencer};

/// The core sequencer.
#[derive(Resource)]
pub struct LogoSequencer(pub Sequencer);

/// Elapsed sequence seconds. Advanced from `Time` while `running`; tests and
/// scrubbing UIs can stop it and write `elapsed` directly.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SequenceClock {
    pub elapsed: f32,
    pub running: bool,
}

impl Default for SequenceClock {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            running: true,
        }
    }
}

impl SequenceClock {
    /// A stopped clock parked at `t`.
    pub fn at(t: f32) -> Self {
        Self {
            elapsed: t,
            running: false,
        }
    }
}

/// Target name to entity. Populated by the binding system by walking under
/// `SequenceRoot`.
#[derive(Resource, Default)]
pub struct TargetIndex(pub HandleTable<Entity>);

/// Rest poses captured the first time each named entity is seen, before the
/// sequencer writes to it. Derived endpoints resolve against these.
#[derive(Resource, Default)]
pub struct RestPoses(pub HashMap<String, RestPose>);

/// Material rules applied to meshes under `SequenceRoot`.
#[derive(Resource, Default)]
pub struct LogoMaterials(pub Option<MaterialPlan>);

/// Outputs staged from `Sequencer::evaluate` to be applied in a separate system
/// (keeps ordering explicit: Compute -> Apply).
#[derive(Resource, Default)]
pub struct PendingOutputs {
    pub changes: Vec<Change>,
}
