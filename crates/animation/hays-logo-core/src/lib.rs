//! Hays Logo Core (engine-agnostic)
//!
//! A time-keyed sequencer for the decorative logo reveal. Each animated target
//! owns an ordered list of keyframe ranges; evaluating the sequencer at a given
//! elapsed time recomputes every channel from scratch, so the result is a pure
//! function of time (plus derived endpoints resolved once from the model graph).
//!
//! Adapters (Bevy/WASM) fill a [`HandleTable`] with host handles, resolve derived
//! endpoints through [`ReferenceLookup`], and write [`Outputs`] back into the host.

pub mod binding;
pub mod config;
pub mod data;
pub mod error;
pub mod interp;
pub mod materials;
pub mod outputs;
pub mod presets;
pub mod scene;
pub mod sequencer;
pub mod stored_sequence;
pub mod value;

// Re-exports for consumers (adapters)
pub use binding::{HandleTable, TargetResolver};
pub use config::Config;
pub use data::{Endpoint, Motion, OrbitPlane, RestSource, Segment, Sequence, TimeRange, Track};
pub use error::SequenceError;
pub use interp::Easing;
pub use materials::{MaterialPlan, MaterialRule, MaterialSpec};
pub use outputs::{ApplyReport, Change, Outputs};
pub use scene::{ModelGraph, ReferenceLookup, RestPose, SceneNode};
pub use sequencer::{PoseSink, Sequencer};
pub use stored_sequence::{parse_scene_json, parse_sequence_json, sequence_to_json, SceneDocument};
pub use value::{Channel, Vec3};
