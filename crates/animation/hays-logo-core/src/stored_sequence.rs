use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::data::Sequence;
use crate::error::SequenceError;
use crate::materials::MaterialPlan;

/// Parse a sequence from JSON and validate it.
///
/// The schema is the serde form of [`Sequence`]: tracks with a target name, a
/// channel (`position`, `rotation`, `base_color`, `emissive`) and segments whose
/// motion is tagged by `kind` (`hold`, `lerp`, `orbit`).
pub fn parse_sequence_json(s: &str) -> Result<Sequence, SequenceError> {
    let seq: Sequence = serde_json::from_str(s)?;
    seq.validate()?;
    Ok(seq)
}

pub fn sequence_to_json(seq: &Sequence) -> Result<String, SequenceError> {
    Ok(serde_json::to_string_pretty(seq)?)
}

/// A scene file: timeline plus optional clock mapping and materials.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    pub sequence: Sequence,
    #[serde(default)]
    pub config: Config,
    #[serde(default)]
    pub materials: Option<MaterialPlan>,
}

pub fn parse_scene_json(s: &str) -> Result<SceneDocument, SequenceError> {
    let doc: SceneDocument = serde_json::from_str(s)?;
    doc.sequence.validate()?;
    Ok(doc)
}
