//! Bevy adapter for the Hays logo sequencer.
//!
//! Systems run in `Update`, chained:
//! clock -> bind targets -> resolve references -> assign materials -> compute -> apply.

use bevy::prelude::*;
use hays_logo_core::{presets, Config, HandleTable, MaterialPlan, Sequence, SequenceError, Sequencer};

pub mod components;
pub mod resources;
pub mod systems;

pub use components::{PlannedMaterial, SequenceRoot, SequenceTarget};
pub use resources::{
    LogoMaterials, LogoSequencer, PendingOutputs, RestPoses, SequenceClock, TargetIndex,
};

/// Ordering label for the plugin's chained systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct HaysLogoSet;

/// Plugin that owns a [`Sequencer`] and drives named entities under [`SequenceRoot`].
pub struct HaysLogoPlugin {
    sequencer: Sequencer,
    materials: Option<MaterialPlan>,
    clock: SequenceClock,
}

impl HaysLogoPlugin {
    /// Build from any validated sequence.
    pub fn new(config: Config, sequence: &Sequence) -> Result<Self, SequenceError> {
        Ok(Self {
            sequencer: Sequencer::new(config, sequence)?,
            materials: None,
            clock: SequenceClock::default(),
        })
    }

    /// Spotlight orbit, slide-in and triangle dock.
    pub fn reveal() -> Result<Self, SequenceError> {
        Ok(Self::new(Config::default(), &presets::reveal())?
            .with_materials(presets::materials_reveal()))
    }

    /// Eased triangle arrival and letter fade.
    pub fn tween() -> Result<Self, SequenceError> {
        Ok(Self::new(Config::default(), &presets::tween())?
            .with_materials(presets::materials_tween()))
    }

    pub fn with_materials(mut self, plan: MaterialPlan) -> Self {
        self.materials = Some(plan);
        self
    }

    /// Start with a specific clock (e.g. stopped for manual scrubbing).
    pub fn with_clock(mut self, clock: SequenceClock) -> Self {
        self.clock = clock;
        self
    }
}

impl Plugin for HaysLogoPlugin {
    fn build(&self, app: &mut App) {
        let index = HandleTable::with_targets(self.sequencer.targets());
        app.insert_resource(LogoSequencer(self.sequencer.clone()))
            .insert_resource(TargetIndex(index))
            .insert_resource(LogoMaterials(self.materials.clone()))
            .insert_resource(self.clock)
            .init_resource::<RestPoses>()
            .init_resource::<PendingOutputs>()
            .add_systems(
                Update,
                (
                    systems::advance_clock_system,
                    systems::bind_targets_system,
                    systems::resolve_references_system,
                    systems::assign_materials_system,
                    systems::compute_outputs_system,
                    systems::apply_outputs_system,
                )
                    .chain()
                    .in_set(HaysLogoSet),
            );
    }
}
